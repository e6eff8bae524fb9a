use anyhow::Context;
use lighter_web::{config, database, logging, server};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;

    logging::init(&config.observability).context("Failed to initialize logging")?;

    let db = database::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    server::run(config, db).await
}
