use reqwest::Url;

/// Navigable locations of the app: `/`, `/about`, and everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Percent-decoded `page` query value, unvalidated.
    Todos { page: Option<String> },
    About,
    NotFound,
}

pub const HOME: &str = "/";
pub const ABOUT: &str = "/about";

/// Locations are app-relative; they are resolved against a fixed origin only to parse them.
const APP_ORIGIN: &str = "http://app.local/";

impl Route {
    pub fn parse(location: &str) -> Self {
        let Ok(url) = Url::parse(APP_ORIGIN).and_then(|origin| origin.join(location)) else {
            return Route::NotFound;
        };
        match url.path().trim_end_matches('/') {
            "" => Route::Todos { page: url.query_pairs().find(|(key, _)| key == "page").map(|(_, value)| value.into_owned()) },
            "/about" => Route::About,
            _ => Route::NotFound,
        }
    }
}

pub fn page_location(page: usize) -> String { format!("/?page={page}") }
