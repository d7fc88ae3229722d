use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, Frame, widgets::{Block, Borders, List, ListItem, Paragraph, ListState, Wrap}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};
use tracing_subscriber::EnvFilter;

use remote_todos::{
    application::{actions::TodoActions, coordinator::TodoCoordinator, debounce::Debouncer, store::{TodoState, TodoStore}},
    config::Config,
    domain::todo::{Todo, TodoQuery},
    infrastructure::airtable_gateway::AirtableGateway,
    view::{listing::{self, PageResolution}, route::{self, Route}},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config)?;
    let gateway = AirtableGateway::new(&config)?;
    tracing::info!(endpoint = %gateway.endpoint(), "starting");
    let actions = TodoActions::new(TodoCoordinator::new(gateway, TodoStore::default()));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, actions).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!("shutdown");
    res
}

/// Stdout belongs to the terminal UI, so logs go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Edit, Search }

struct App {
    /// Requests run as background tasks; the loop only redraws from the store.
    actions: TodoActions<AirtableGateway>,
    /// Query of the last remote fetch. `filter_text` lags `search_input` by the debounce.
    query: TodoQuery,
    search_input: String,
    search: Debouncer<String>,
    location: String,
    selected: usize,
    list_state: ListState,
    mode: Mode,
    draft: String,
    editing: Option<Todo>,
}

/// What the todos page shows for the current state and location.
struct PageView {
    items: Vec<Todo>,
    page: usize,
    total_pages: usize,
}

impl App {
    fn route(&self) -> Route { Route::parse(&self.location) }

    fn navigate(&mut self, location: impl Into<String>) {
        self.location = location.into();
        self.selected = 0;
    }

    /// Resolves the page for `state`, redirecting home when the page is out of range.
    fn page_view(&mut self, state: &TodoState) -> PageView {
        let visible: Vec<Todo> = listing::visible_todos(&state.todo_list, &self.search_input).into_iter().cloned().collect();
        let raw_page = match self.route() { Route::Todos { page } => page, _ => None };
        let page = match listing::resolve_page(raw_page.as_deref(), visible.len()) {
            PageResolution::Show(page) => page,
            PageResolution::Redirect => {
                tracing::debug!(location = %self.location, "invalid page, redirecting home");
                self.navigate(route::HOME);
                1
            }
        };
        let items = listing::page_slice(&visible, page).to_vec();
        if items.is_empty() { self.selected = 0; } else if self.selected >= items.len() { self.selected = items.len() - 1; }
        PageView { items, page, total_pages: listing::total_pages(visible.len()) }
    }

    fn selected_todo(&mut self) -> Option<Todo> {
        let state = self.actions.store().snapshot();
        self.page_view(&state).items.get(self.selected).cloned()
    }

    fn reload(&self) {
        self.actions.load(self.query.clone());
    }
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, actions: TodoActions<AirtableGateway>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App {
        actions,
        query: TodoQuery::default(),
        search_input: String::new(),
        search: Debouncer::default(),
        location: route::HOME.to_string(),
        selected: 0,
        list_state: ListState::default(),
        mode: Mode::View,
        draft: String::new(),
        editing: None,
    };
    app.reload();
    let mut last_tick = Instant::now();

    loop {
        let state = app.actions.store().snapshot();
        let view = app.page_view(&state);
        terminal.draw(|f| draw(f, &mut app, &state, &view))?;

        let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if let Some(search_due) = app.search.remaining(Instant::now()) { timeout = timeout.min(search_due); }
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                        KeyCode::Down => { if app.selected + 1 < view.items.len() { app.selected += 1; } }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            if let Some(todo) = app.selected_todo() {
                                app.actions.complete_todo(todo.id);
                            }
                        }
                        KeyCode::Char('n') => { app.mode = Mode::Create; app.draft.clear(); }
                        KeyCode::Char('e') => {
                            if let Some(todo) = app.selected_todo() {
                                app.draft = todo.title.clone();
                                app.editing = Some(todo);
                                app.mode = Mode::Edit;
                            }
                        }
                        KeyCode::Char('/') => app.mode = Mode::Search,
                        KeyCode::Char('s') => { app.query.sort_field = app.query.sort_field.toggled(); app.reload(); }
                        KeyCode::Char('o') => { app.query.sort_direction = app.query.sort_direction.toggled(); app.reload(); }
                        KeyCode::Left => { if view.page > 1 { app.navigate(route::page_location(view.page - 1)); } }
                        KeyCode::Right => { if view.page < view.total_pages { app.navigate(route::page_location(view.page + 1)); } }
                        KeyCode::Char('a') => app.navigate(route::ABOUT),
                        KeyCode::Char('h') | KeyCode::Esc => app.navigate(route::HOME),
                        KeyCode::Char('x') => app.actions.clear_error(),
                        _ => {}
                    },
                    Mode::Create => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft.clear(); }
                        KeyCode::Enter => {
                            if !app.draft.trim().is_empty() {
                                let title = std::mem::take(&mut app.draft);
                                app.actions.add_todo(title);
                                app.mode = Mode::View;
                            }
                        }
                        KeyCode::Backspace => { app.draft.pop(); }
                        KeyCode::Char(c) => app.draft.push(c),
                        _ => {}
                    },
                    Mode::Edit => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.draft.clear(); app.editing = None; }
                        KeyCode::Enter => {
                            if let Some(todo) = app.editing.take() {
                                let title = std::mem::take(&mut app.draft);
                                app.actions.update_todo(Todo { title, ..todo });
                            }
                            app.mode = Mode::View;
                        }
                        KeyCode::Backspace => { app.draft.pop(); }
                        KeyCode::Char(c) => app.draft.push(c),
                        _ => {}
                    },
                    Mode::Search => match key.code {
                        KeyCode::Enter => app.mode = Mode::View,
                        KeyCode::Esc => {
                            app.search_input.clear();
                            app.search.push(String::new(), Instant::now());
                            app.mode = Mode::View;
                        }
                        KeyCode::Backspace => { app.search_input.pop(); app.search.push(app.search_input.clone(), Instant::now()); }
                        KeyCode::Char(c) => { app.search_input.push(c); app.search.push(app.search_input.clone(), Instant::now()); }
                        _ => {}
                    },
                }
            }
        }
        if let Some(text) = app.search.poll(Instant::now()) {
            if text != app.query.filter_text {
                app.query.filter_text = text;
                app.reload();
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &mut App, state: &TodoState, view: &PageView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.size());

    let route = app.route();
    let nav = match route { Route::About => "Home | [About]", Route::NotFound => "Home | About", Route::Todos { .. } => "[Home] | About" };
    let header = Paragraph::new(format!("{nav}    (h: home, a: about, q: quit)"))
        .block(Block::default().borders(Borders::ALL).title("My Todos"));
    f.render_widget(header, chunks[0]);

    match route {
        Route::About => {
            let about = Paragraph::new("A todo list kept in a remote spreadsheet table.\n\nChanges show up immediately and are rolled back if the server rejects them.")
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("about"));
            f.render_widget(about, chunks[1]);
        }
        Route::NotFound => {
            let not_found = Paragraph::new("Page Not Found.\n\nPress h to go back home.")
                .block(Block::default().borders(Borders::ALL).title("not found"));
            f.render_widget(not_found, chunks[1]);
        }
        Route::Todos { .. } => {
            if state.is_loading {
                let loading = Paragraph::new("Todo list loading...").block(Block::default().borders(Borders::ALL).title("todos"));
                f.render_widget(loading, chunks[1]);
            } else {
                let items: Vec<ListItem> = view.items.iter().map(|t| ListItem::new(format!("[ ] {}", listing::display_title(&t.title)))).collect();
                if view.items.is_empty() { app.list_state.select(None); } else { app.list_state.select(Some(app.selected)); }
                let list = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title(format!(
                        "todos  Page {} of {}  (Enter: complete, e: edit, n: new, /: search, s/o: sort, ←/→: page)",
                        view.page, view.total_pages
                    )))
                    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                    .highlight_symbol(">> ");
                f.render_stateful_widget(list, chunks[1], &mut app.list_state);
            }
        }
    }

    let prompt = match app.mode {
        Mode::View => format!(
            "Sort by {} {}  |  Search: {}{}",
            app.query.sort_field.as_str(),
            app.query.sort_direction.as_str(),
            app.search_input,
            if state.is_saving { "  |  Saving..." } else { "" }
        ),
        Mode::Create => format!("New todo: {}_  |  (Enter to add, Esc to cancel)", app.draft),
        Mode::Edit => format!("Edit title: {}_  |  (Enter to update, Esc to cancel)", app.draft),
        Mode::Search => format!("Search: {}_  |  (Enter to keep, Esc to clear)", app.search_input),
    };
    let footer = Paragraph::new(prompt)
        .block(Block::default().borders(Borders::ALL).title(match app.mode { Mode::View => "view", Mode::Create => "create", Mode::Edit => "edit", Mode::Search => "search" }));
    f.render_widget(footer, chunks[2]);

    let banner = if state.error_message.is_empty() { String::new() } else { format!("{}  (x: dismiss)", state.error_message) };
    let error = Paragraph::new(banner)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title("error"));
    f.render_widget(error, chunks[3]);
}
