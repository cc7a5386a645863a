//! Logging configuration and setup for the Tron wallet backend
//!
//! This module provides:
//! - The choice between JSON logging using Bunyan format or human-readable text logging
//! - Auto-detection based on whether the output is a TTY (JSON if non-TTY, Text if TTY)
//! - A custom writer that replaces "log." prefix with "backend_log." in Bunyan logs
//!   to avoid conflicts with reserved fields in log ingestion tools

use std::io::Write;

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::{config::LogFormat, constants::server::SERVICE_NAME};

/// Custom writer that replaces "log." prefix with "backend_log." in Bunyan logs
struct PrefixReplacingWriter<W: Write> {
    inner: W,
}

impl<W: Write> PrefixReplacingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for PrefixReplacingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(s) = std::str::from_utf8(buf) {
            let replaced = s.replace("\"log.", "\"backend_log.");
            self.inner.write_all(replaced.as_bytes())?;
            Ok(buf.len())
        } else {
            self.inner.write(buf)
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Wrapper to make PrefixReplacingWriter implement MakeWriter
struct PrefixReplacingMakeWriter;

impl<'a> MakeWriter<'a> for PrefixReplacingMakeWriter {
    type Writer = PrefixReplacingWriter<std::io::Stdout>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixReplacingWriter::new(std::io::stdout())
    }
}

/// Initialize logging with the specified format
///
/// The filter is read from `RUST_LOG`, defaulting to `info` when unset.
pub fn initialize_logging(log_format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_format.resolve() {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(
                    SERVICE_NAME.to_string(),
                    PrefixReplacingMakeWriter,
                ))
                .init();
        }
        // `resolve` never yields `Auto`
        LogFormat::Text | LogFormat::Auto => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_reserved_prefix() {
        let mut out = Vec::new();
        {
            let mut writer = PrefixReplacingWriter::new(&mut out);
            let line = br#"{"log.target":"backend","msg":"hi"}"#;
            assert_eq!(writer.write(line).unwrap(), line.len());
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"backend_log.target":"backend","msg":"hi"}"#
        );
    }
}
