use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use concierge::config::AppConfig;
use concierge::handlers;
use concierge::services::ai::openai::OpenAiProvider;
use concierge::services::ai::LlmProvider;
use concierge::services::calendar::google::GoogleCalendarClient;
use concierge::services::google_auth::GoogleAuth;
use concierge::services::mail::gmail::GmailClient;
use concierge::services::messaging::whatsapp::WhatsAppClient;
use concierge::services::sheets::google::GoogleSheetsClient;
use concierge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    config.warn_missing();

    let auth = Arc::new(GoogleAuth::new(config.clone()));
    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(config.clone()));

    let state = Arc::new(AppState {
        config: config.clone(),
        llm: Arc::clone(&llm),
        messaging: Box::new(WhatsAppClient::new(config.clone())),
        calendar: Box::new(GoogleCalendarClient::new(Arc::clone(&auth))),
        mail: Box::new(GmailClient::new(Arc::clone(&auth), llm)),
        sheets: Box::new(GoogleSheetsClient::new(config.clone(), auth)),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/webhook/whatsapp",
            get(handlers::webhook::verify).post(handlers::webhook::receive),
        )
        .route("/cron/check-emails", get(handlers::scanner::check_emails))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
