//! Static route table and per-route metadata.

/// Path of the sign-in view; unauthenticated visitors are sent here.
pub const LOGIN_ROUTE: &str = "/login";
/// Fixed destination for routes flagged `requires_admin`.
pub const ADMIN_FALLBACK_ROUTE: &str = "/chat";

/// Flags attached to a route definition. Read-only at navigation time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
    /// Page title shown for the view, when it sets one.
    pub title: Option<String>,
}

impl RouteMeta {
    /// No restrictions, no title.
    #[must_use]
    pub fn public() -> Self {
        Self::default()
    }

    /// Signed-in users only.
    #[must_use]
    pub fn protected(title: &str) -> Self {
        Self { requires_auth: true, requires_admin: false, title: Some(title.to_owned()) }
    }

    #[must_use]
    pub fn admin(mut self) -> Self {
        self.requires_admin = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
}

impl Route {
    #[must_use]
    pub fn new(path: &str, name: &str, meta: RouteMeta) -> Self {
        Self { path: path.to_owned(), name: name.to_owned(), meta }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Find the route for `path`, ignoring any query, fragment or trailing slash.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let wanted = normalize_path(path);
        self.routes.iter().find(|route| route.path == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

impl Default for RouteTable {
    /// The application's views.
    fn default() -> Self {
        Self::new(vec![
            Route::new("/", "Home", RouteMeta::public()),
            Route::new(LOGIN_ROUTE, "Login", RouteMeta::public()),
            Route::new("/signup", "Signup", RouteMeta::public()),
            Route::new("/admin", "Admin", RouteMeta::protected("knowledge Dashboard")),
            Route::new(ADMIN_FALLBACK_ROUTE, "Chat", RouteMeta::protected("New Chat")),
        ])
    }
}

pub(crate) fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}
