use std::sync::Arc;

use anyhow::Context;

use brand_kit::config::AppConfig;
use brand_kit::pipeline::BrandKitPipeline;
use brand_kit::routes::webhook_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let pipeline = BrandKitPipeline::from_config(&config).context("Failed to build pipeline")?;

    eprintln!("🎨 Brand Kit v{}", env!("CARGO_PKG_VERSION"));
    match &config.llm {
        Some(llm) => eprintln!("   Generator: {} via {}", llm.model, llm.base_url),
        None => eprintln!("   Generator: fallback only (OPENAI_API_KEY not set)"),
    }
    match &config.mail {
        Some(mail) => eprintln!(
            "   Email: enabled (SMTP: {}:{}, to: {})",
            mail.smtp_host, mail.smtp_port, mail.to_address
        ),
        None => eprintln!("   Email: disabled"),
    }
    eprintln!("   Webhook: http://0.0.0.0:{}/api/ghl-webhook\n", config.port);

    let app = webhook_routes(Arc::new(pipeline));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "Brand kit server started");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
