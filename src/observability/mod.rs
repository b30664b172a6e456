//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: one JSON object per finished span in
//!   `<data_dir>/citysearch-otlp.json`
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//! - **Resource Metadata**: every record carries the service name
//!
//! # Configuration
//!
//! The filter comes from `trace_level` in [`Config`](crate::Config), or the
//! `--trace-level` flag. Default: `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `tracer`: Tracer provider and span exporter
//! - `file_writer`: Rotating line writer

mod file_writer;
pub mod init;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
