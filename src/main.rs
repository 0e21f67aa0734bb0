use dotenvy::dotenv;
use std::path::Path;
use storefront::{
    config::{
        catalog::load_catalog,
        database::{create_connection, create_tables, ensure_sqlite_dir, get_database_url},
        server::{ServerConfig, get_catalog_path},
    },
    core::catalog::seed_catalog,
    errors::{Error, Result},
    web::{self, AppState},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure the schema exists
    ensure_sqlite_dir(&get_database_url())?;
    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed the catalog if a seed file is present
    let catalog_path = get_catalog_path();
    if Path::new(&catalog_path).exists() {
        let catalog = load_catalog(&catalog_path)?;
        seed_catalog(&db, &catalog.items)
            .await
            .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
    } else {
        warn!("Catalog file {catalog_path} not found, skipping seeding.");
    }

    // 5. Serve
    let server = ServerConfig::from_env()?;
    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| Error::Server {
            message: format!("Failed to bind {address}: {e}"),
        })?;
    info!("Listening on http://{address}");

    axum::serve(listener, web::router(AppState::new(db)))
        .await
        .map_err(|e| Error::Server {
            message: e.to_string(),
        })?;

    Ok(())
}
