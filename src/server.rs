//! Router assembly and the HTTP server loop.

use std::future::Future;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete application: REST routes, docs, and `/ws`.
pub fn build_app(state: AppState) -> Router {
    let doc = api::openapi::openapi(&state.info, &state.prompt_path);
    Router::new()
        .merge(api::build_router(&state.prompt_path))
        .merge(api::openapi::docs_routes(doc))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::GatewayConfig;
    use crate::service::EchoPromptService;

    #[test]
    fn accepted_prompt_paths_build_a_router() {
        for path in ["/v1/prompt", "/docsearch", "/a:b", "/"] {
            let Ok(config) = GatewayConfig::from_lookup(|key| {
                (key == "PROMPT_PATH").then(|| path.to_string())
            }) else {
                panic!("{path} must be accepted");
            };
            let state = AppState::new(
                Arc::new(EchoPromptService),
                config.info,
                &config.prompt_path,
            );
            let _app = build_app(state);
        }
    }
}
