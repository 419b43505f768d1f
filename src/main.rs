//! Pharmacy Product Admin
//!
//! Loads the product catalogue from the backend and reports the inventory state.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pharmacy_admin::config::LogFormat;
use pharmacy_admin::{Config, HttpProductApi, ProductAdmin};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Pharmacy Product Admin");
    tracing::info!("Products endpoint: {}", config.products_url());
    tracing::info!("Side effects encoding: {:?}", config.side_effects_encoding);

    // Warn if no session token is configured
    if config.session_token.is_none() {
        tracing::warn!(
            "No session token configured (PHARMACY_SESSION_TOKEN). Requests are unauthenticated!"
        );
    }

    let api = HttpProductApi::new(&config)?;
    let mut admin = ProductAdmin::new(api, &config);
    admin.load().await;

    let summary = admin.stock_summary();
    tracing::info!(
        "Catalogue: {} products, {} low stock, {} out of stock",
        summary.total,
        summary.low_stock,
        summary.out_of_stock
    );

    for product in admin.visible_products() {
        tracing::info!(
            "{} | {} | {} | {:.2} | {} ({})",
            product.id,
            product.name,
            product.category,
            product.price,
            product.stock_quantity,
            product.stock_level().label()
        );
    }

    Ok(())
}
