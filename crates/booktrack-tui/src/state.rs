//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── store: Store            (auth, catalog and collection slices)
//! │   ├── route: Route            (current screen)
//! │   ├── catalog: CatalogView    (search, sort, selection)
//! │   ├── collection: CollectionView
//! │   ├── login / register: AuthForm
//! │   └── notice, in_flight, spinner, quit flag
//! └── overlay: Option<Overlay>    (add-book modal)
//! ```
//!
//! The overlay lives next to `TuiState` so its key handler can hold
//! `&mut self` while reading the rest of the UI.

use booktrack_core::store::AppState as Store;
use booktrack_core::view::SortKey;

use crate::features::{AuthForm, AuthFormKind, CatalogView, CollectionView};
use crate::overlays::Overlay;
use crate::route::Route;

/// Combined application state for the TUI.
#[derive(Debug)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(store: Store, default_sort: SortKey) -> Self {
        Self {
            tui: TuiState::new(store, default_sort),
            overlay: None,
        }
    }
}

/// Non-overlay UI state.
#[derive(Debug)]
pub struct TuiState {
    /// Data mirrored from the server. Only the reducer mutates it.
    pub store: Store,
    pub route: Route,
    pub catalog: CatalogView,
    pub collection: CollectionView,
    pub login: AuthForm,
    pub register: AuthForm,
    /// One-line informational message (e.g. after registering).
    pub notice: Option<String>,
    /// Requests spawned but not yet completed.
    pub in_flight: usize,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub viewport: (u16, u16),
}

impl TuiState {
    pub fn new(store: Store, default_sort: SortKey) -> Self {
        Self {
            store,
            route: Route::Home,
            catalog: CatalogView::default(),
            collection: CollectionView::with_sort(default_sort),
            login: AuthForm::new(AuthFormKind::Login),
            register: AuthForm::new(AuthFormKind::Register),
            notice: None,
            in_flight: 0,
            spinner_frame: 0,
            should_quit: false,
            viewport: (0, 0),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.auth.is_authenticated
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Fetch error to show as a banner on the current screen.
    pub fn banner_error(&self) -> Option<&str> {
        match self.route {
            Route::Home => self.store.books.error.as_deref(),
            Route::MyBooks => self.store.my_books.error.as_deref(),
            Route::Login | Route::Register => None,
        }
    }

    pub fn auth_form_mut(&mut self) -> Option<&mut AuthForm> {
        match self.route {
            Route::Login => Some(&mut self.login),
            Route::Register => Some(&mut self.register),
            Route::Home | Route::MyBooks => None,
        }
    }

    /// Whether the current screen has a text field capturing keys.
    pub fn is_editing(&self) -> bool {
        match self.route {
            Route::Home => self.catalog.searching,
            Route::MyBooks => self.collection.searching,
            Route::Login => self.login.is_editing(),
            Route::Register => self.register.is_editing(),
        }
    }
}
