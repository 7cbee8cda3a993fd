use crate::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub fn init(config: &Config) -> anyhow::Result<()> {
    init_tracing()?;
    init_metrics(config)?;
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    // Standard formatting layer (STDOUT)
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kenneldesk=debug,tower_http=info".into());

    Registry::default().with(env_filter).with(fmt_layer).init();

    Ok(())
}

fn init_metrics(config: &Config) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;

    tracing::info!(
        "Metrics exporter (Prometheus) started on port {}",
        config.metrics_port
    );
    Ok(())
}
