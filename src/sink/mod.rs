//! Metric record model and sinks.
//!
//! The collector does not store or transport metrics itself; it hands
//! every assembled record to a [`MetricSink`]. Sinks must be safe to
//! call from concurrent per-device collection threads.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use chrono::Utc;

/// A single typed metric field value.
///
/// The runtime variant always matches the path's declared type; a value
/// that fails conversion is omitted from the record instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

/// Receiver for assembled metric records.
///
/// The collector calls `add_fields` exactly once per device whose URL
/// parsed, per collection cycle. Calls may arrive concurrently and in
/// any order across devices.
pub trait MetricSink: Send + Sync {
    fn add_fields(
        &self,
        measurement: &str,
        fields: HashMap<String, FieldValue>,
        tags: HashMap<String, String>,
    );
}

/// A record captured by [`MemorySink`].
#[derive(Debug, Clone)]
pub struct Record {
    pub measurement: String,
    pub fields: HashMap<String, FieldValue>,
    pub tags: HashMap<String, String>,
}

/// Sink that keeps records in memory, in arrival order.
///
/// Used by the test suite and by embedders that want batch access to a
/// cycle's results.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records captured so far, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().expect("sink lock poisoned").clone()
    }
}

impl MetricSink for MemorySink {
    fn add_fields(
        &self,
        measurement: &str,
        fields: HashMap<String, FieldValue>,
        tags: HashMap<String, String>,
    ) {
        let record = Record {
            measurement: measurement.to_string(),
            fields,
            tags,
        };
        self.records.lock().expect("sink lock poisoned").push(record);
    }
}

/// Sink that writes one influx-style line per record to stdout.
///
/// This is the daemon's outbound collaborator; the host consuming the
/// stream (telegraf execd, a log shipper, ...) owns transport from
/// there. Keys are sorted so output is deterministic.
#[derive(Debug, Default)]
pub struct LineProtocolSink;

impl LineProtocolSink {
    pub fn new() -> Self {
        Self
    }

    fn render(
        measurement: &str,
        fields: &HashMap<String, FieldValue>,
        tags: &HashMap<String, String>,
        timestamp_nanos: i64,
    ) -> String {
        let mut line = escape_key(measurement);

        let mut tag_keys: Vec<&String> = tags.keys().collect();
        tag_keys.sort();
        for key in tag_keys {
            line.push(',');
            line.push_str(&escape_key(key));
            line.push('=');
            line.push_str(&escape_key(&tags[key]));
        }

        line.push(' ');
        let mut field_keys: Vec<&String> = fields.keys().collect();
        field_keys.sort();
        for (i, key) in field_keys.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(&escape_key(key));
            line.push('=');
            match &fields[*key] {
                FieldValue::Integer(v) => line.push_str(&format!("{}i", v)),
                FieldValue::Float(v) => line.push_str(&format!("{}", v)),
                FieldValue::Boolean(v) => line.push_str(if *v { "true" } else { "false" }),
                FieldValue::Text(v) => {
                    line.push('"');
                    line.push_str(&v.replace('\\', "\\\\").replace('"', "\\\""));
                    line.push('"');
                }
            }
        }

        line.push(' ');
        line.push_str(&timestamp_nanos.to_string());
        line
    }
}

/// Escapes the characters with structural meaning in measurement, tag
/// and field keys/values.
fn escape_key(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(' ', "\\ ")
        .replace('=', "\\=")
}

impl MetricSink for LineProtocolSink {
    fn add_fields(
        &self,
        measurement: &str,
        fields: HashMap<String, FieldValue>,
        tags: HashMap<String, String>,
    ) {
        let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let line = Self::render(measurement, &fields, &tags, timestamp);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // A broken stdout pipe means our consumer is gone; nothing
        // useful to do beyond dropping the line.
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_arrival_order() {
        let sink = MemorySink::new();
        sink.add_fields("lightware", HashMap::new(), HashMap::new());
        sink.add_fields(
            "lightware",
            HashMap::from([("result_code".to_string(), FieldValue::Integer(1))]),
            HashMap::new(),
        );

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].fields.is_empty());
        assert_eq!(
            records[1].fields.get("result_code"),
            Some(&FieldValue::Integer(1))
        );
    }

    #[test]
    fn test_line_render_sorts_and_types() {
        let fields = HashMap::from([
            ("result_code".to_string(), FieldValue::Integer(0)),
            ("gain".to_string(), FieldValue::Float(1.5)),
            ("present".to_string(), FieldValue::Boolean(true)),
            ("label".to_string(), FieldValue::Text("Room A".to_string())),
        ]);
        let tags = HashMap::from([
            ("host".to_string(), "10.0.0.2".to_string()),
            ("product".to_string(), "MX2-8x8".to_string()),
        ]);

        let line = LineProtocolSink::render("lightware", &fields, &tags, 42);
        assert_eq!(
            line,
            "lightware,host=10.0.0.2,product=MX2-8x8 \
             gain=1.5,label=\"Room A\",present=true,result_code=0i 42"
        );
    }

    #[test]
    fn test_line_render_escapes_tag_values() {
        let tags = HashMap::from([("label".to_string(), "rack 1,left".to_string())]);
        let fields = HashMap::from([("result_code".to_string(), FieldValue::Integer(0))]);

        let line = LineProtocolSink::render("lightware", &fields, &tags, 0);
        assert!(line.starts_with("lightware,label=rack\\ 1\\,left "));
    }
}
