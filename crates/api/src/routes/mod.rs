//! API route definitions.
//!
//! Procedures are exposed RPC-style as `/rpc/<namespace>.<procedure>`.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod content;
pub mod health;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Procedures that act on behalf of a caller
    let protected_routes = Router::new()
        .merge(content::protected_routes())
        .merge(upload::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(content::public_routes())
        .merge(protected_routes)
}
