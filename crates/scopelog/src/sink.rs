//! Emission sinks: where finished log records go.
//!
//! The core never formats or transports anything itself; it hands a fully
//! merged [`Record`] to a [`Sink`]. Provided sinks:
//!
//! - [`MemorySink`] — captures records in memory, for tests and assertions
//! - [`WriteSink`] — JSON lines to any `io::Write` (stdout, a file, a pipe)
//! - [`TracingSink`] — forwards to the `tracing` ecosystem

use std::io::Write;
use std::sync::{Mutex, RwLock};

use crate::logger::{Level, Record};

/// Destination for finished log records.
///
/// Implementations must be safe for unsynchronized concurrent use and must
/// never fail the caller: emission problems are the sink's to swallow.
pub trait Sink: Send + Sync {
    /// Consume one record.
    fn emit(&self, record: Record);
}

/// In-memory sink capturing every record, for tests.
///
/// Records are held behind an `RwLock`; [`MemorySink::records`] hands back
/// a snapshot clone.
#[derive(Default)]
pub struct MemorySink {
    records: RwLock<Vec<Record>>,
}

impl MemorySink {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn records(&self) -> Vec<Record> {
        self.records.read().expect("lock poisoned").clone()
    }

    /// Number of records emitted so far.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Discard all captured records.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: Record) {
        self.records.write().expect("lock poisoned").push(record);
    }
}

/// JSON-lines sink: one serialized record per line on an `io::Write`.
///
/// Write failures are swallowed after a `tracing::warn!`; a logging call
/// must never fail its caller.
pub struct WriteSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriteSink<W> {
    /// Wrap a writer. The sink serializes writes with an internal mutex.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> Sink for WriteSink<W> {
    fn emit(&self, record: Record) {
        let mut line = match serde_json::to_vec(&record) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!("dropping unserializable log record: {err}");
                return;
            }
        };
        line.push(b'\n');
        let mut writer = self.writer.lock().expect("lock poisoned");
        if let Err(err) = writer.write_all(&line) {
            tracing::warn!("log write failed: {err}");
        }
    }
}

/// Adapter forwarding records into the `tracing` ecosystem.
///
/// The merged fields are carried as one pre-encoded JSON value under the
/// `fields` key, since `tracing` events take a static field set.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for TracingSink {
    fn emit(&self, record: Record) {
        let fields = serde_json::to_string(&record.fields_as_map())
            .unwrap_or_else(|_| "{}".to_string());
        match record.level {
            Level::Debug => tracing::debug!(fields = %fields, "{}", record.message),
            Level::Info => tracing::info!(fields = %fields, "{}", record.message),
            Level::Warn => tracing::warn!(fields = %fields, "{}", record.message),
            Level::Error => tracing::error!(fields = %fields, "{}", record.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopelog_fields::Field;

    #[test]
    fn memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.emit(Record::new(Level::Info, "first", vec![]));
        sink.emit(Record::new(Level::Warn, "second", vec![]));
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].level, Level::Warn);
    }

    #[test]
    fn memory_sink_clear() {
        let sink = MemorySink::new();
        sink.emit(Record::new(Level::Info, "one", vec![]));
        assert!(!sink.is_empty());
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn write_sink_emits_json_lines() {
        let sink = WriteSink::new(Vec::new());
        sink.emit(Record::new(
            Level::Info,
            "processing request",
            vec![Field::new("request_id", "123"), Field::new("items", 5)],
        ));
        let buf = sink.writer.into_inner().unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["message"], "processing request");
        assert_eq!(parsed["request_id"], "123");
        assert_eq!(parsed["items"], 5);
    }

    /// `io::Write` + `MakeWriter` over a shared buffer, so a test can read
    /// back what the `tracing` subscriber formatted.
    #[derive(Clone, Default)]
    struct CaptureWriter(std::sync::Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().expect("lock poisoned").clone()).unwrap()
        }
    }

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("lock poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn tracing_sink_forwards_level_message_and_fields() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingSink::new();
            sink.emit(Record::new(
                Level::Warn,
                "slow query",
                vec![Field::new("request_id", "123"), Field::new("elapsed_ms", 250)],
            ));
            sink.emit(Record::new(Level::Debug, "noise", vec![]));
        });

        let out = writer.contents();
        assert!(out.contains("WARN"), "missing level in: {out}");
        assert!(out.contains("slow query"), "missing message in: {out}");
        // FieldMap encodes the merged fields as one JSON value, in order.
        assert!(
            out.contains(r#"{"request_id":"123","elapsed_ms":250}"#),
            "missing fields in: {out}"
        );
        assert!(out.contains("DEBUG"), "debug record dropped in: {out}");
    }

    #[test]
    fn write_sink_preserves_field_order() {
        let sink = WriteSink::new(Vec::new());
        sink.emit(Record::new(
            Level::Info,
            "m",
            vec![
                Field::new("zeta", 1),
                Field::new("alpha", 2),
                Field::new("mid", 3),
            ],
        ));
        let buf = sink.writer.into_inner().unwrap();
        let line = String::from_utf8(buf).unwrap();
        let zeta = line.find("zeta").unwrap();
        let alpha = line.find("alpha").unwrap();
        let mid = line.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }
}
