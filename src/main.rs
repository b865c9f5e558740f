// src/main.rs

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use haven::api::router::{api_router, health_handler};
use haven::config::CONFIG;
use haven::llm::gemini::GeminiClient;
use haven::llm::openai::OpenAiClient;
use haven::llm::ChatModel;
use haven::state::{create_app_state, StateOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting haven backend");
    info!("Chat model: {}", CONFIG.gemini_model);
    info!("Companion model: {}", CONFIG.companion_model);

    let pool = SqlitePoolOptions::new()
        .max_connections(CONFIG.sqlite_max_connections)
        .connect(&CONFIG.database_url)
        .await?;
    haven::db::run_migrations(&pool).await?;

    let chat_model: Arc<dyn ChatModel> = Arc::new(GeminiClient::new(
        CONFIG.gemini_key().map(str::to_string),
        CONFIG.gemini_model.clone(),
    ));
    let companion_model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(
        CONFIG.openai_key().map(str::to_string),
        CONFIG.openai_base_url.clone(),
        CONFIG.companion_model.clone(),
    ));

    let app_state = create_app_state(
        pool,
        StateOptions {
            chat_model,
            companion_model,
            enable_local_sentiment: CONFIG.enable_local_sentiment,
            news_api_key: CONFIG.news_key().map(str::to_string),
            news_api_url: CONFIG.news_api_url.clone(),
            news_staleness_hours: CONFIG.news_staleness_hours,
            news_timeout_secs: CONFIG.news_timeout_secs,
        },
    )?;

    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
