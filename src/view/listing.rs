use crate::domain::todo::Todo;

pub const PAGE_SIZE: usize = 8;
const TITLE_DISPLAY_LIMIT: usize = 36;
const TITLE_TRUNCATED_LEN: usize = 33;

/// Open todos whose title contains `search` (case-insensitive). Completed todos never show.
pub fn visible_todos<'a>(todos: &'a [Todo], search: &str) -> Vec<&'a Todo> {
    let needle = search.to_lowercase();
    todos
        .iter()
        .filter(|todo| !todo.is_completed)
        .filter(|todo| todo.title.to_lowercase().contains(&needle))
        .collect()
}

pub fn total_pages(count: usize) -> usize { count.div_ceil(PAGE_SIZE) }

/// Items on the 1-based `page`.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(items.len());
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResolution {
    Show(usize),
    /// Out of range or not a number; go back to the first page.
    Redirect,
}

/// Resolves the raw `page` query value against the filtered item count.
/// An absent value means page 1; an empty list still has a page 1.
pub fn resolve_page(raw: Option<&str>, filtered_count: usize) -> PageResolution {
    let page = match raw {
        None => 1,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(page) => page,
            Err(_) => return PageResolution::Redirect,
        },
    };
    let last = total_pages(filtered_count).max(1) as i64;
    if page < 1 || page > last { PageResolution::Redirect } else { PageResolution::Show(page as usize) }
}

/// Titles longer than 36 characters are cut to 33 and suffixed with `...`.
pub fn display_title(title: &str) -> String {
    if title.chars().count() > TITLE_DISPLAY_LIMIT {
        let cut: String = title.chars().take(TITLE_TRUNCATED_LEN).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}
