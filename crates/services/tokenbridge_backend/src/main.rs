// File: services/tokenbridge_backend/src/main.rs
use axum::{routing::get, Router};
use std::process::ExitCode;
use std::sync::Arc;
use tokenbridge_common::logging;
use tokenbridge_config::{ensure_dotenv_loaded, load_config};
use tokenbridge_firebase::routes as firebase_routes;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Loads `.env` before the subscriber reads `RUST_LOG`.
///
/// Returns the dotenv path that was attempted.
fn init_logging() -> String {
    let dotenv_path = ensure_dotenv_loaded();
    logging::init();
    dotenv_path
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_path = init_logging();
    info!("Environment file: {}", dotenv_path);

    let loaded = logging::log_result(
        load_config(),
        "Configuration loaded",
        "Failed to load config",
    );
    let config = match loaded {
        Ok(config) => Arc::new(config),
        Err(_) => return ExitCode::FAILURE,
    };

    let mut api_router =
        Router::new().route("/", get(|| async { "Welcome to the token bridge API!" }));

    if config.use_firebase {
        match firebase_routes(config.clone()) {
            Ok(router) => api_router = api_router.merge(router),
            Err(err) => {
                error!("Failed to initialize Firebase routes: {}", err);
                return ExitCode::FAILURE;
            }
        }
        if config.firebase.is_none() {
            warn!(
                "use_firebase is set without a [firebase] section; credential mode is {:?}",
                config.credential_mode
            );
        }
    }

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use tokenbridge_firebase::openapi::FirebaseApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Token Bridge API",
                version = "0.1.0",
                description = "APNs to Firebase token import",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(FirebaseApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {}", addr, err);
            return ExitCode::FAILURE;
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(err) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
