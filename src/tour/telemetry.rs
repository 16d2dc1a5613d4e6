//! JSON-lines history of tour notifications for offline inspection.
use std::{
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use crate::core::SessionClock;

use super::events::{LocationChangedEvent, TourCompletedEvent};

const DEFAULT_TOUR_TELEMETRY_LOG_PATH: &str = "logs/tour_history.jsonl";

/// Single history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TourTelemetryRecord {
    pub session_seconds: f64,
    pub event: TourTelemetryEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TourTelemetryEvent {
    Navigated {
        previous: usize,
        index: usize,
        location: String,
    },
    Completed {
        visited: usize,
        total: usize,
    },
}

/// Buffered log of tour notifications, appended to disk on flush.
#[derive(Resource, Debug)]
pub struct TourTelemetryLog {
    output_path: PathBuf,
    pending: Vec<TourTelemetryRecord>,
}

impl TourTelemetryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: TourTelemetryRecord) {
        self.pending.push(record);
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn pending(&self) -> &[TourTelemetryRecord] {
        &self.pending
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        self.write_pending(&mut file)?;
        file.flush()
    }

    /// Writes buffered records as JSON lines. On failure the record that
    /// failed and everything after it stay queued for the next flush.
    fn write_pending(&mut self, writer: &mut impl Write) -> std::io::Result<()> {
        let records = std::mem::take(&mut self.pending);
        for (written, record) in records.iter().enumerate() {
            if let Err(err) = write_record(writer, record) {
                self.pending = records[written..].to_vec();
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Default for TourTelemetryLog {
    fn default() -> Self {
        Self::new(DEFAULT_TOUR_TELEMETRY_LOG_PATH)
    }
}

/// Buffers navigation and completion notifications.
pub fn record_tour_telemetry(
    clock: Res<SessionClock>,
    mut log: ResMut<TourTelemetryLog>,
    mut changed: MessageReader<LocationChangedEvent>,
    mut completed: MessageReader<TourCompletedEvent>,
) {
    let now = clock.elapsed().as_secs_f64();

    for event in changed.read() {
        log.push(TourTelemetryRecord {
            session_seconds: now,
            event: TourTelemetryEvent::Navigated {
                previous: event.previous,
                index: event.index,
                location: event.location.name.clone(),
            },
        });
    }

    for event in completed.read() {
        log.push(TourTelemetryRecord {
            session_seconds: now,
            event: TourTelemetryEvent::Completed {
                visited: event.visited,
                total: event.total,
            },
        });
    }
}

fn write_record(writer: &mut impl Write, record: &TourTelemetryRecord) -> std::io::Result<()> {
    let serialisable: SerializableTourRecord = record.clone().into();
    serde_json::to_writer(&mut *writer, &serialisable)?;
    writer.write_all(b"\n")
}

/// Flushes pending records, warning if persistence fails.
pub fn flush_tour_telemetry_log(mut log: ResMut<TourTelemetryLog>) {
    if let Err(err) = log.flush() {
        warn!(
            "Failed to persist tour telemetry to {:?}: {} ({} records kept for retry)",
            log.path(),
            err,
            log.pending().len()
        );
    }
}

#[derive(Serialize)]
struct SerializableTourRecord {
    session_seconds: f64,
    event: SerializableTourEvent,
}

#[derive(Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum SerializableTourEvent {
    Navigated {
        previous: usize,
        index: usize,
        location: String,
    },
    Completed {
        visited: usize,
        total: usize,
    },
}

impl From<TourTelemetryRecord> for SerializableTourRecord {
    fn from(value: TourTelemetryRecord) -> Self {
        let event = match value.event {
            TourTelemetryEvent::Navigated {
                previous,
                index,
                location,
            } => SerializableTourEvent::Navigated {
                previous,
                index,
                location,
            },
            TourTelemetryEvent::Completed { visited, total } => {
                SerializableTourEvent::Completed { visited, total }
            }
        };

        Self {
            session_seconds: value.session_seconds,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::{env, fs, time::SystemTime};

    #[test]
    fn telemetry_log_writes_json_lines() {
        let unique_suffix = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = env::temp_dir()
            .join(format!("tour_log_test_{}", unique_suffix))
            .join("history.jsonl");

        let mut log = TourTelemetryLog::new(&path);
        log.push(TourTelemetryRecord {
            session_seconds: 4.5,
            event: TourTelemetryEvent::Navigated {
                previous: 0,
                index: 2,
                location: "Library".to_string(),
            },
        });
        log.push(TourTelemetryRecord {
            session_seconds: 9.0,
            event: TourTelemetryEvent::Completed {
                visited: 3,
                total: 3,
            },
        });
        log.flush().expect("telemetry log should flush");
        assert!(log.pending().is_empty());

        let raw = fs::read_to_string(&path).expect("log file should exist");
        let lines: Vec<_> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).expect("json line should parse");
        assert_eq!(first["event"]["event_type"], "navigated");
        assert_eq!(first["event"]["location"], "Library");
        assert_eq!(first["event"]["index"], 2);

        let second: Value = serde_json::from_str(lines[1]).expect("json line should parse");
        assert_eq!(second["event"]["event_type"], "completed");
        assert_eq!(second["session_seconds"], 9.0);

        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        budget: usize,
        accepted: Vec<u8>,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.accepted.len() + buf.len() > self.budget {
                return Err(std::io::Error::other("disk full"));
            }
            self.accepted.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn navigated(index: usize) -> TourTelemetryRecord {
        TourTelemetryRecord {
            session_seconds: index as f64,
            event: TourTelemetryEvent::Navigated {
                previous: 0,
                index,
                location: format!("L{index}"),
            },
        }
    }

    #[test]
    fn failed_write_keeps_unwritten_records() {
        let mut first_line = Vec::new();
        write_record(&mut first_line, &navigated(1)).expect("vec writer");

        let mut log = TourTelemetryLog::new("unused.jsonl");
        for index in 1..=3 {
            log.push(navigated(index));
        }

        let mut writer = ShortWriter {
            budget: first_line.len(),
            accepted: Vec::new(),
        };
        assert!(log.write_pending(&mut writer).is_err());
        assert_eq!(writer.accepted, first_line);
        assert_eq!(log.pending(), &[navigated(2), navigated(3)]);

        let mut retry = Vec::new();
        log.write_pending(&mut retry).expect("vec writer");
        assert!(log.pending().is_empty());
        assert_eq!(String::from_utf8_lossy(&retry).lines().count(), 2);
    }

    #[test]
    fn flushing_nothing_touches_no_files() {
        let mut log = TourTelemetryLog::new("/nonexistent/dir/never-written.jsonl");
        assert!(log.flush().is_ok());
    }
}
