//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros to the file-exporting OpenTelemetry pipeline.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
const SERVICE_NAME: &str = "citysearch";

/// File name of the span export inside the data directory.
pub const TRACE_FILE_NAME: &str = "citysearch-otlp.json";

/// Initializes the tracing subscriber with file-based span export.
///
/// The filter is taken from `config.trace_level` (default `"info"`) and
/// accepts any `EnvFilter` directive such as `"citysearch=debug,warn"`.
/// Spans are written to `<data_dir>/citysearch-otlp.json`.
///
/// Does nothing if the data directory cannot be created. Only the first call
/// installs a subscriber; later calls are ignored.
///
/// # Example
///
/// ```rust
/// use citysearch::observability::init_tracing;
/// use citysearch::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
