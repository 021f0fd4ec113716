mod app;
mod config;
mod db;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userbase=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = db::AppState::init().await?;

    // Startup fails hard if the table cannot be bootstrapped.
    db::ensure_users_table(&app_state.db).await?;
    tracing::info!("users table ready");

    let config = std::sync::Arc::clone(&app_state.config);
    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
