//! Navigation surface
//!
//! The named routes of the client and the protection gate applied before
//! rendering them. The gate is what the web views wrap every protected page
//! in; here it decides what a command reports as its destination.

use talktemplate_core::SessionState;

/// Named routes of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Chat,
    Templates,
    TemplateDetail,
    Profile,
    Settings,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Chat,
        Route::Templates,
        Route::TemplateDetail,
        Route::Profile,
        Route::Settings,
        Route::NotFound,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Chat => "/chat",
            Route::Templates => "/templates",
            Route::TemplateDetail => "/templates/:id",
            Route::Profile => "/profile",
            Route::Settings => "/settings",
            Route::NotFound => "/404",
        }
    }

    /// Everything except home, login, register, and not-found requires an
    /// authenticated session
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Home | Route::Login | Route::Register | Route::NotFound
        )
    }

    /// Parse a route by name or path
    pub fn parse(raw: &str) -> Option<Route> {
        match raw.trim().to_lowercase().as_str() {
            "home" | "/" => Some(Route::Home),
            "login" | "/login" => Some(Route::Login),
            "register" | "/register" => Some(Route::Register),
            "dashboard" | "/dashboard" => Some(Route::Dashboard),
            "chat" | "/chat" => Some(Route::Chat),
            "templates" | "/templates" => Some(Route::Templates),
            "template-detail" | "/templates/:id" => Some(Route::TemplateDetail),
            "profile" | "/profile" => Some(Route::Profile),
            "settings" | "/settings" => Some(Route::Settings),
            "404" | "not-found" | "/404" => Some(Route::NotFound),
            _ => None,
        }
    }
}

/// Where the router actually lands for a requested route
///
/// `None` while the session is still restoring - the caller waits instead of
/// flashing the wrong screen. Unauthenticated callers are redirected from
/// every protected route to login; authenticated callers are redirected from
/// home/login/register into chat, and dashboard forwards to chat.
pub fn resolve(route: Route, state: &SessionState) -> Option<Route> {
    if matches!(state, SessionState::Restoring) {
        return None;
    }

    let authenticated = state.is_authenticated();

    if route.is_protected() && !authenticated {
        return Some(Route::Login);
    }
    if route == Route::Dashboard {
        return Some(Route::Chat);
    }
    if authenticated && matches!(route, Route::Home | Route::Login | Route::Register) {
        return Some(Route::Chat);
    }

    Some(route)
}
