//! OpenTelemetry tracer provider exporting spans to a local file.
//!
//! Each finished span becomes one JSON object on its own line:
//!
//! ```json
//! {"service":"citysearch","name":"handle_event","trace_id":"4bf9...","span_id":"00f0...",
//!  "start_unix_nanos":1760890000000000000,"duration_micros":42,
//!  "attributes":{"event_type":"SetQuery(\"Al\")"},"events":[]}
//! ```

use super::file_writer::RotatingFileWriter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{Key, KeyValue};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

/// One exported span.
#[derive(Debug, Serialize)]
struct SpanRecord {
    service: String,
    name: String,
    trace_id: String,
    span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<String>,
    start_unix_nanos: u64,
    duration_micros: u64,
    attributes: BTreeMap<String, serde_json::Value>,
    events: Vec<EventRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventRecord {
    name: String,
    offset_micros: u64,
    attributes: BTreeMap<String, serde_json::Value>,
}

impl SpanRecord {
    fn from_span(service: &str, span: &SpanData) -> Self {
        let parent_span_id = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));

        let events = span
            .events
            .iter()
            .map(|event| EventRecord {
                name: event.name.to_string(),
                offset_micros: micros(elapsed(span.start_time, event.timestamp)),
                attributes: attribute_map(&event.attributes),
            })
            .collect();

        let error = match &span.status {
            Status::Error { description } => Some(description.to_string()),
            Status::Unset | Status::Ok => None,
        };

        Self {
            service: service.to_string(),
            name: span.name.to_string(),
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            start_unix_nanos: saturating_u64(elapsed(SystemTime::UNIX_EPOCH, span.start_time).as_nanos()),
            duration_micros: micros(elapsed(span.start_time, span.end_time)),
            attributes: attribute_map(&span.attributes),
            events,
            error,
        }
    }
}

fn elapsed(from: SystemTime, to: SystemTime) -> Duration {
    to.duration_since(from).unwrap_or_default()
}

fn micros(duration: Duration) -> u64 {
    saturating_u64(duration.as_micros())
}

fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, serde_json::Value> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

fn attribute_value(value: &opentelemetry::Value) -> serde_json::Value {
    use opentelemetry::Value;

    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::I64(i) => serde_json::Value::from(*i),
        Value::F64(f) => serde_json::Value::from(*f),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::Array(_) => serde_json::Value::String(value.to_string()),
    }
}

/// Span exporter writing [`SpanRecord`] lines through a rotating writer.
struct FileSpanExporter {
    writer: RotatingFileWriter,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        let service = resource
            .get(Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |value| value.to_string());

        Self {
            writer: RotatingFileWriter::new(file_path),
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> std::io::Result<()> {
        for span in batch {
            let record = SpanRecord::from_span(&self.service, span);
            self.writer.write_line(&serde_json::to_string(&record)?)?;
        }
        Ok(())
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Creates a tracer provider that exports every span as soon as it closes.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
