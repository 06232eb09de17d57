use crate::application_ports::Locator;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub mod events;
pub mod health;

pub fn create_router<L: Locator + Send + Sync + Clone + 'static>() -> Router<L> {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/events", post(events::event_handler::<L>))
        .layer(TraceLayer::new_for_http())
}

#[instrument(level = "info", skip(locator))]
pub async fn run_api<L: Locator + Send + Sync + Clone + 'static>(
    locator: L,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let router: Router<()> = create_router::<L>().with_state(locator);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!(port, "Listening for user lifecycle events");

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
