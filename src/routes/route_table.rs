pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const FORGOT_PATH: &str = "/forgot";
pub const CHAT_PATH: &str = "/chat";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Signup,
    Forgot,
    Chat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Public,
    /// Redirects to the login page when nobody is signed in.
    RequiresSession,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub view: View,
    pub guard: Guard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(&'static str),
}

const STANDARD_ROUTES: &[Route] = &[
    Route { path: HOME_PATH, view: View::Home, guard: Guard::Public },
    Route { path: LOGIN_PATH, view: View::Login, guard: Guard::Public },
    Route { path: SIGNUP_PATH, view: View::Signup, guard: Guard::Public },
    Route { path: FORGOT_PATH, view: View::Forgot, guard: Guard::Public },
    Route { path: CHAT_PATH, view: View::Chat, guard: Guard::RequiresSession },
];

const CHAT_FALLBACK: Route = Route {
    path: CHAT_PATH,
    view: View::Chat,
    guard: Guard::RequiresSession,
};

/// Exact-path routes plus a fallback for everything else. There is no 404:
/// unknown paths render the fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: &'static [Route],
    fallback: Route,
}

impl RouteTable {
    pub const fn standard() -> Self {
        Self { routes: STANDARD_ROUTES, fallback: CHAT_FALLBACK }
    }

    pub fn route_for(&self, path: &str) -> Route {
        let path = normalize(path);
        self.routes
            .iter()
            .find(|route| route.path == path)
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn resolve(&self, path: &str, has_session: bool) -> Resolution {
        let route = self.route_for(path);
        match route.guard {
            Guard::RequiresSession if !has_session => Resolution::Redirect(LOGIN_PATH),
            _ => Resolution::Render(route.view),
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}
