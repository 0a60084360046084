// File: services/fleetbook_backend/src/main.rs
use fleetbook_backend::{app, service_factory};
use fleetbook_common::{log_result, logging};
use fleetbook_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Arc::new(log_result(
        load_config(),
        "Configuration loaded",
        "Failed to load config",
    )?);

    let store = service_factory::sheets_store(&config);
    let state = log_result(
        service_factory::booking_state(config.clone(), store),
        "Booking service ready",
        "Invalid fleet configuration",
    )?;

    // A failed first load is not fatal; POST /api/bookings/refresh retries.
    if state.session.reload().await.is_err() {
        warn!("Initial reservation load failed, serving errors until a refresh succeeds");
    }

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = app(state);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use fleetbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Fleetbook API",
                version = "0.1.0",
                description = "Vehicle booking service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
