use localexplorer::config::Config;
use localexplorer::db::{MemoryStore, PgStore};
use localexplorer::engine::Engine;
use localexplorer::error::Error;
use localexplorer::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let engine = match &config.database_url {
        Some(database_url) => {
            let store = PgStore::new(database_url, config.database_max_connections).await?;
            Engine::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, points will be kept in memory");
            Engine::new(MemoryStore::new())
        }
    };

    serve(engine, config.listen_addr, config.cors_allowed_origins).await
}
