//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use booktrack_core::bootstrap;
use booktrack_core::store::{
    Action, AuthAction, BooksAction, MyBooksAction, Phase, Request,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{auth, catalog, collection};
use crate::overlays::{AddBookState, Overlay, OverlayRequest, OverlayTransition};
use crate::route::Route;
use crate::state::{AppState, TuiState};

/// State changes requested by feature and overlay key handlers.
///
/// Handlers only see their own slice of the UI; the reducer applies these
/// against the whole state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Guard, dispatch the pending action and spawn the request.
    Request(Request),
    /// Synchronous store action.
    Dispatch(Action),
    Navigate(Route),
    OpenOverlay(OverlayRequest),
    Notice(String),
    Logout,
    Effect(UiEffect),
}

/// Startup: issue the bootstrap requests.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    let requests = bootstrap::initial_requests(&app.tui.store);
    requests
        .into_iter()
        .flat_map(|request| start_request(&mut app.tui, request))
        .collect()
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            handle_paste(app, &text);
            vec![]
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Completed(action) => handle_completion(app, action),
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = &mut app.overlay {
        let update = overlay.handle_key(&app.tui, key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return apply_commands(app, update.commands);
    }

    // A focused text field takes every key before navigation does.
    if app.tui.is_editing()
        && let Some(commands) = handle_route_key(&mut app.tui, key)
    {
        return apply_commands(app, commands);
    }

    if let Some(commands) = handle_banner_key(&app.tui, key)
        .or_else(|| handle_global_key(&app.tui, key))
    {
        return apply_commands(app, commands);
    }

    handle_route_key(&mut app.tui, key)
        .map_or_else(Vec::new, |commands| apply_commands(app, commands))
}

fn handle_route_key(tui: &mut TuiState, key: KeyEvent) -> Option<Vec<Command>> {
    let loading = tui.store.auth.loading;
    match tui.route {
        Route::Home => catalog::handle_key(&mut tui.catalog, &tui.store, key),
        Route::MyBooks => collection::handle_key(&mut tui.collection, &tui.store, key),
        Route::Login | Route::Register => tui
            .auth_form_mut()
            .and_then(|form| auth::handle_key(form, loading, key)),
    }
}

/// Dismiss (`x`) and retry (`r`) for the fetch error banner.
fn handle_banner_key(tui: &TuiState, key: KeyEvent) -> Option<Vec<Command>> {
    tui.banner_error()?;
    let (clear, retry) = match tui.route {
        Route::Home => (
            Action::Books(BooksAction::ClearError),
            Request::FetchBooks,
        ),
        Route::MyBooks => (
            Action::MyBooks(MyBooksAction::ClearError),
            Request::FetchMyBooks,
        ),
        Route::Login | Route::Register => return None,
    };
    match key.code {
        KeyCode::Char('x') => Some(vec![Command::Dispatch(clear)]),
        KeyCode::Char('r') => Some(vec![Command::Dispatch(clear), Command::Request(retry)]),
        _ => None,
    }
}

/// Navigation keys available whenever no text field has focus.
fn handle_global_key(tui: &TuiState, key: KeyEvent) -> Option<Vec<Command>> {
    let authenticated = tui.is_authenticated();
    let command = match key.code {
        KeyCode::Char('q') => Command::Effect(UiEffect::Quit),
        KeyCode::Char('h') => Command::Navigate(Route::Home),
        KeyCode::Char('m') => Command::Navigate(Route::MyBooks),
        KeyCode::Char('l') if authenticated => Command::Logout,
        KeyCode::Char('l') => Command::Navigate(Route::Login),
        KeyCode::Char('u') if !authenticated => Command::Navigate(Route::Register),
        KeyCode::Esc if matches!(tui.route, Route::Login | Route::Register) => {
            Command::Navigate(Route::Home)
        }
        _ => return None,
    };
    Some(vec![command])
}

fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(overlay) = &mut app.overlay {
        overlay.handle_paste(text);
        return;
    }
    let tui = &mut app.tui;
    match tui.route {
        Route::Home if tui.catalog.searching => tui.catalog.paste(text),
        Route::MyBooks if tui.collection.searching => tui.collection.paste(text),
        Route::Login | Route::Register => {
            if let Some(form) = tui.auth_form_mut() {
                form.paste(text);
            }
        }
        _ => {}
    }
}

fn handle_completion(app: &mut AppState, action: Action) -> Vec<UiEffect> {
    let tui = &mut app.tui;
    tui.in_flight = tui.in_flight.saturating_sub(1);
    let was_authenticated = tui.is_authenticated();

    let mut commands = Vec::new();
    match &action {
        Action::Auth(AuthAction::Register(Phase::Fulfilled(response))) => {
            let notice = response
                .message
                .clone()
                .unwrap_or_else(|| "Registration successful. Please log in.".to_string());
            tui.register.reset();
            commands.push(Command::Navigate(Route::Login));
            commands.push(Command::Notice(notice));
        }
        Action::Auth(AuthAction::Login(Phase::Fulfilled(_))) => tui.login.reset(),
        Action::Books(BooksAction::Create(phase)) => {
            if let Some(Overlay::AddBook(modal)) = &mut app.overlay
                && modal.submitting
            {
                match phase {
                    Phase::Fulfilled(book) => {
                        app.overlay = None;
                        commands.push(Command::Notice(format!("Added \"{}\" to the catalog", book.title)));
                    }
                    Phase::Rejected(_) => modal.submitting = false,
                    Phase::Pending => {}
                }
            }
        }
        Action::MyBooks(MyBooksAction::Add {
            phase: Phase::Fulfilled(entry),
            ..
        }) => commands.push(Command::Notice(format!(
            "Added \"{}\" to your collection",
            entry.book.title
        ))),
        _ => {}
    }

    let tui = &mut app.tui;
    tui.store.dispatch(action);

    let mut effects: Vec<UiEffect> = bootstrap::requests_on_auth_change(was_authenticated, &tui.store)
        .into_iter()
        .flat_map(|request| start_request(tui, request))
        .collect();

    // Re-check the guard: a session can appear or vanish under any screen.
    commands.insert(0, Command::Navigate(tui.route));
    effects.extend(apply_commands(app, commands));
    effects
}

fn apply_commands(app: &mut AppState, commands: Vec<Command>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for command in commands {
        match command {
            Command::Request(request) => effects.extend(start_request(&mut app.tui, request)),
            Command::Dispatch(action) => app.tui.store.dispatch(action),
            Command::Navigate(route) => effects.extend(navigate(&mut app.tui, route)),
            Command::OpenOverlay(request) => effects.extend(open_overlay(app, request)),
            Command::Notice(message) => app.tui.notice = Some(message),
            Command::Logout => {
                app.tui.store.dispatch(Action::Auth(AuthAction::Logout));
                effects.push(UiEffect::ClearSession);
                effects.extend(navigate(&mut app.tui, Route::Home));
                app.tui.notice = Some("Logged out".to_string());
            }
            Command::Effect(effect) => effects.push(effect),
        }
    }
    effects
}

/// Runs the local guard, folds the pending action and hands the request to
/// the runtime. A refused request becomes a notice.
fn start_request(tui: &mut TuiState, request: Request) -> Vec<UiEffect> {
    if let Err(err) = tui.store.check(&request) {
        tracing::debug!(request = request.name(), error = %err, "request refused");
        tui.notice = Some(err.to_string());
        return vec![];
    }
    tui.store.dispatch(request.pending());
    tui.in_flight += 1;
    vec![UiEffect::Request(request)]
}

/// Moves to `target` after applying the route guard. Entering a list screen
/// reloads its data.
fn navigate(tui: &mut TuiState, target: Route) -> Vec<UiEffect> {
    let route = target.resolve(tui.is_authenticated());
    if route == tui.route {
        return vec![];
    }
    tui.route = route;
    tui.notice = None;
    match route {
        Route::Home => start_request(tui, Request::FetchBooks),
        Route::MyBooks => start_request(tui, Request::FetchMyBooks),
        Route::Login => {
            tui.login.focus_first();
            vec![]
        }
        Route::Register => {
            tui.register.focus_first();
            vec![]
        }
    }
}

fn open_overlay(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    match request {
        OverlayRequest::AddBook => {
            if !app.tui.is_authenticated() {
                app.tui.notice = Some("Log in to add books to the catalog".to_string());
                return navigate(&mut app.tui, Route::Login);
            }
            app.tui.store.dispatch(Action::Books(BooksAction::ClearError));
            app.overlay = Some(Overlay::AddBook(AddBookState::open()));
            vec![]
        }
    }
}
