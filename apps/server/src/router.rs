use anyhow::{Result, anyhow};
use axum::Router;
use gantry::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Result<Router> {
    let api = ApiDoc::openapi();
    let version = state.config.server.api_version.clone();

    // Mount every registered module under the configured API version prefix.
    let mut api_router =
        OpenApiRouter::with_openapi(api).merge(gantry::server::router::system_router());
    for module in state.modules.load_modules() {
        api_router = module
            .register_routers(&version, api_router)
            .map_err(|e| anyhow!("Module `{}` failed to register routers: {e}", module.name()))?;
    }

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = api_router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Merge all routes and then apply the state to the final router
    Ok(Router::new().merge(openapi_routes).merge(scalar_routes))
}
