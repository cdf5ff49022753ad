use product_advisor::{
    api::{create_router, AppState},
    config::Config,
    db,
    services::ProductCatalog,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_advisor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let mut catalog = ProductCatalog::new(config.category.clone());
    if let Some(seed_file) = &config.seed_file {
        let report = db::load_file(&mut catalog, seed_file).await;
        tracing::info!(
            seed_file = %seed_file,
            added = report.added,
            rejected = report.rejected.len(),
            "Seed catalog loaded"
        );
    }

    let state = AppState::with_catalog(catalog, &config);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, category = %config.category, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
