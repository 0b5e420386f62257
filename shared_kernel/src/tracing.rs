use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

/// Installs the global tracing subscriber: env-filtered, JSON-formatted,
/// with ordinary `log` statements forwarded through the log tracer.
pub fn config_telemetry(service_name: &'static str) {
    tracing_log::LogTracer::init().expect("Failed to initialize log tracer");

    let subscriber = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_names(true),
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber");

    tracing::info!(service = service_name, "telemetry configured");
}
