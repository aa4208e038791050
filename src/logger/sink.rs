//! Structured writer for flushed records.
//!
//! # Responsibilities
//! - Serialize a record (level, timestamp, message, static tags, fields)
//! - Apply the minimum severity as a write threshold
//! - Own the output stream; only the batch worker ever writes to it
//!
//! # Design Decisions
//! - One self-contained line per record, so partial batches never interleave
//! - A field never replaces a key already in the record; a colliding key is
//!   written again under a `fields.` prefix
//! - `json` for machines, `console` for humans; both carry the same data

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::LoggerConfig;
use crate::logger::error::LoggerError;
use crate::logger::field::Field;
use crate::logger::level::{Level, LevelFilter};

/// Output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// One JSON object per line.
    Json,
    /// Tab-separated, human-readable line.
    Console,
}

impl FromStr for Encoding {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "structured" => Ok(Encoding::Json),
            "console" | "human-readable" => Ok(Encoding::Console),
            _ => Err(LoggerError::InvalidEncoding(s.to_string())),
        }
    }
}

/// Where records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl OutputTarget {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "stdout" => OutputTarget::Stdout,
            "stderr" => OutputTarget::Stderr,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }

    fn open(&self) -> Result<Box<dyn Write + Send>, LoggerError> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(io::stdout())),
            OutputTarget::Stderr => Ok(Box::new(io::stderr())),
            OutputTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LoggerError::SinkBuild {
                        target: path.display().to_string(),
                        source,
                    })?;
                Ok(Box::new(file))
            }
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("stdout"),
            OutputTarget::Stderr => f.write_str("stderr"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The structured writer.
pub struct Sink {
    writer: Box<dyn Write + Send>,
    encoding: Encoding,
    filter: LevelFilter,
    service: String,
    environment: String,
    line: Vec<u8>,
}

impl Sink {
    /// Build the sink described by `config`.
    pub fn build(config: &LoggerConfig) -> Result<Self, LoggerError> {
        let min: Level = config.level.parse()?;
        let encoding: Encoding = config.encoding.parse()?;
        let writer = OutputTarget::parse(&config.output).open()?;

        Ok(Self::with_writer(
            writer,
            encoding,
            min,
            &config.service,
            &config.environment,
        ))
    }

    /// Build a sink over an arbitrary writer.
    pub fn with_writer(
        writer: Box<dyn Write + Send>,
        encoding: Encoding,
        min: Level,
        service: &str,
        environment: &str,
    ) -> Self {
        Self {
            writer,
            encoding,
            filter: LevelFilter::new(min),
            service: service.to_string(),
            environment: environment.to_string(),
            line: Vec::with_capacity(256),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.filter.admits(level)
    }

    /// Write one record. Returns `false` when the record is below the threshold
    /// and nothing was written.
    ///
    /// Fields are written in order after the reserved keys (`level`, `ts`,
    /// `msg`, `service`, `env`), so earlier fields keep their key on collision.
    pub fn write(&mut self, level: Level, message: &str, fields: &[Field]) -> io::Result<bool> {
        if !self.enabled(level) {
            return Ok(false);
        }

        self.line.clear();
        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        match self.encoding {
            Encoding::Json => {
                let mut record = Map::new();
                record.insert("level".into(), Value::from(level.as_str()));
                record.insert("ts".into(), Value::from(ts));
                record.insert("msg".into(), Value::from(message));
                self.insert_tags(&mut record, fields);
                serde_json::to_writer(&mut self.line, &record)?;
            }
            Encoding::Console => {
                let mut context = Map::new();
                self.insert_tags(&mut context, fields);
                write!(self.line, "{}\t{}\t{}\t", ts, level.as_upper_str(), message)?;
                serde_json::to_writer(&mut self.line, &context)?;
            }
        }
        self.line.push(b'\n');

        self.writer.write_all(&self.line)?;
        Ok(true)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn insert_tags(&self, record: &mut Map<String, Value>, fields: &[Field]) {
        record.insert("service".into(), Value::from(self.service.as_str()));
        record.insert("env".into(), Value::from(self.environment.as_str()));
        for field in fields {
            let mut key = field.key.clone();
            while record.contains_key(&key) {
                key.insert_str(0, "fields.");
            }
            record.insert(key, field.value.clone());
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("encoding", &self.encoding)
            .field("min", &self.filter.min())
            .field("service", &self.service)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn sink(encoding: Encoding, min: Level) -> (Sink, Buffer) {
        let buffer = Buffer::default();
        let sink = Sink::with_writer(Box::new(buffer.clone()), encoding, min, "svc", "staging");
        (sink, buffer)
    }

    #[test]
    fn test_json_record_layout() {
        let (mut sink, buffer) = sink(Encoding::Json, Level::Info);
        sink.write(Level::Warn, "disk low", &fields!["free_mb" => 12, "mount" => "/var"])
            .unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let record: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(record["level"], "warn");
        assert_eq!(record["msg"], "disk low");
        assert_eq!(record["service"], "svc");
        assert_eq!(record["env"], "staging");
        assert_eq!(record["free_mb"], 12);
        assert_eq!(record["mount"], "/var");
        assert!(record["ts"].as_str().unwrap().ends_with('Z'));

        let keys: Vec<&str> = record.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(&keys[..5], &["level", "ts", "msg", "service", "env"]);
    }

    #[test]
    fn test_console_record_layout() {
        let (mut sink, buffer) = sink(Encoding::Console, Level::Debug);
        sink.write(Level::Debug, "cache miss", &fields!["key" => "k1"]).unwrap();

        let lines = buffer.lines();
        let parts: Vec<&str> = lines[0].split('\t').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], "DEBUG");
        assert_eq!(parts[2], "cache miss");
        let context: Value = serde_json::from_str(parts[3]).unwrap();
        assert_eq!(context["service"], "svc");
        assert_eq!(context["key"], "k1");
    }

    #[test]
    fn test_threshold_skips_lower_levels() {
        let (mut sink, buffer) = sink(Encoding::Json, Level::Warn);
        assert!(!sink.write(Level::Info, "skipped", &[]).unwrap());
        assert!(sink.write(Level::Error, "kept", &[]).unwrap());

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }

    #[test]
    fn test_fields_never_replace_reserved_keys() {
        let (mut sink, buffer) = sink(Encoding::Json, Level::Info);
        let fields = fields![
            "level" => "fatal",
            "msg" => "spoofed",
            "service" => "other",
            "env" => "prod",
            "user" => "a",
            "user" => "b",
        ];
        sink.write(Level::Info, "real message", &fields).unwrap();

        let record: Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(record["level"], "info");
        assert_eq!(record["msg"], "real message");
        assert_eq!(record["service"], "svc");
        assert_eq!(record["env"], "staging");
        assert_eq!(record["fields.level"], "fatal");
        assert_eq!(record["fields.msg"], "spoofed");
        assert_eq!(record["fields.service"], "other");
        assert_eq!(record["fields.env"], "prod");
        assert_eq!(record["user"], "a");
        assert_eq!(record["fields.user"], "b");
    }

    #[test]
    fn test_console_fields_keep_static_tags() {
        let (mut sink, buffer) = sink(Encoding::Console, Level::Info);
        sink.write(Level::Info, "hello", &fields!["service" => "other"]).unwrap();

        let lines = buffer.lines();
        let context: Value = serde_json::from_str(lines[0].split('\t').nth(3).unwrap()).unwrap();
        assert_eq!(context["service"], "svc");
        assert_eq!(context["fields.service"], "other");
    }

    #[test]
    fn test_encoding_aliases() {
        assert_eq!("structured".parse::<Encoding>().unwrap(), Encoding::Json);
        assert_eq!("human-readable".parse::<Encoding>().unwrap(), Encoding::Console);
        assert!("xml".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_build_fails_on_unopenable_file() {
        let config = LoggerConfig {
            output: "/nonexistent-dir/for/sure/app.log".to_string(),
            ..LoggerConfig::default()
        };
        let err = Sink::build(&config).unwrap_err();
        assert!(matches!(err, LoggerError::SinkBuild { .. }));
    }

    #[test]
    fn test_build_rejects_invalid_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert!(matches!(Sink::build(&config), Err(LoggerError::InvalidLevel(_))));
    }

    #[test]
    fn test_output_target_parse() {
        assert_eq!(OutputTarget::parse("stdout"), OutputTarget::Stdout);
        assert_eq!(OutputTarget::parse("stderr"), OutputTarget::Stderr);
        assert_eq!(
            OutputTarget::parse("/tmp/app.log"),
            OutputTarget::File(PathBuf::from("/tmp/app.log"))
        );
    }
}
