use std::net::TcpListener;

use anyhow::Context;

use cfp_service::app;
use cfp_service::settings::Settings;
use cfp_service::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber(telemetry::env_filter(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load()?;

    let pool = settings
        .database
        .pool_options()
        .connect_with(settings.database.with_db())
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, pool)?.await.context("Failed to run app")
}
