//! Route registration.
//!
//! Routes are plain values collected in a [`RouteTable`]; the router builder
//! wraps each one in request tracing and mounts it. Nothing is registered
//! globally.

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::http::Request;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// A named HTTP route.
///
/// The handler is mounted for `method` only.
pub struct Route {
    pub name: &'static str,
    pub method: MethodFilter,
    pub pattern: &'static str,
    handler: MethodRouter<AppState>,
}

impl Route {
    pub fn new<H, T>(
        name: &'static str,
        method: MethodFilter,
        pattern: &'static str,
        handler: H,
    ) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            name,
            method,
            pattern,
            handler: on(method, handler),
        }
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of routes handed to [`build_router`].
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item service routes.
    pub fn items() -> Self {
        Self::new()
            .with(Route::new("pong", MethodFilter::GET, "/", handler::pong))
            .with(Route::new("healthz", MethodFilter::GET, "/healthz", handler::healthz))
            .with(Route::new("getAllItems", MethodFilter::GET, "/items", handler::get_all_items))
            .with(Route::new("setItemsPOST", MethodFilter::POST, "/items", handler::create_items))
            .with(Route::new("setItemsPUT", MethodFilter::PUT, "/items", handler::put_items))
            .with(Route::new("getItem", MethodFilter::GET, "/items/:id", handler::get_item))
            .with(Route::new("delItem", MethodFilter::DELETE, "/items/:id", handler::del_item))
    }

    pub fn with(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Build the axum router for `table` over `state`.
pub fn build_router(table: RouteTable, state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new();
    for route in table.routes {
        let name = route.name;
        let traced = route.handler.layer(TraceLayer::new_for_http().make_span_with(
            move |request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    route = name,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ));
        router = router.route(route.pattern, traced);
    }

    router
        .fallback(handler::not_found)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .with_state(state)
}
