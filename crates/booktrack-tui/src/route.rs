//! Screen routing.

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Shared catalog.
    #[default]
    Home,
    Login,
    Register,
    MyBooks,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::MyBooks => "/mybooks",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Catalog",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::MyBooks => "My Books",
        }
    }

    /// Where a navigation to `self` actually lands.
    ///
    /// The collection needs a session; the auth forms make no sense with one.
    pub fn resolve(self, authenticated: bool) -> Route {
        match self {
            Route::MyBooks if !authenticated => Route::Login,
            Route::Login | Route::Register if authenticated => Route::Home,
            route => route,
        }
    }

    /// Tabs shown in the navbar for the current session.
    pub fn tabs(authenticated: bool) -> &'static [Route] {
        if authenticated {
            &[Route::Home, Route::MyBooks]
        } else {
            &[Route::Home, Route::Login, Route::Register]
        }
    }
}
