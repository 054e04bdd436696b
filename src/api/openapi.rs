//! OpenAPI document and its documentation routes.

use axum::Router;
use utoipa::OpenApi;

use super::handlers::{prompt, system};
use crate::app_state::AppState;
use crate::config::ApiInfo;

/// Route serving the OpenAPI JSON document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Static part of the OpenAPI document, collected from handler annotations.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        prompt::get_prompt,
        prompt::post_prompt,
        system::health_handler,
        system::info_handler,
    ),
    tags(
        (name = "Prompt", description = "Query the language model"),
        (name = "System", description = "Health and service metadata"),
    )
)]
pub struct ApiDoc;

/// Path the prompt handlers are annotated with.
const ANNOTATED_PROMPT_PATH: &str = "/prompt";

/// Builds the OpenAPI document with the configured metadata, documenting
/// the prompt operations under `prompt_path`.
#[must_use]
pub fn openapi(info: &ApiInfo, prompt_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title.clone_from(&info.title);
    doc.info.description = Some(info.description.clone());
    doc.info.version.clone_from(&info.version);
    if let Some(item) = doc.paths.paths.remove(ANNOTATED_PROMPT_PATH) {
        doc.paths.paths.insert(prompt_path.to_string(), item);
    }
    doc
}

/// Swagger UI at `/docs` plus the JSON document.
#[cfg(feature = "swagger-ui")]
pub fn docs_routes(doc: utoipa::openapi::OpenApi) -> Router<AppState> {
    Router::new().merge(utoipa_swagger_ui::SwaggerUi::new("/docs").url(OPENAPI_PATH, doc))
}

/// JSON document only.
#[cfg(not(feature = "swagger-ui"))]
pub fn docs_routes(doc: utoipa::openapi::OpenApi) -> Router<AppState> {
    Router::new().route(
        OPENAPI_PATH,
        axum::routing::get(move || {
            let doc = doc.clone();
            async move { axum::Json(doc) }
        }),
    )
}
