// JSONL trace of every parser invocation
use crate::inventory::ServiceFact;
use crate::parsers::FileKind;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

#[derive(Serialize)]
struct HeuristicEntry<'a> {
    file: &'a Path,
    kind: FileKind,
    facts: &'a [ServiceFact],
    latency_us: u64,
    timestamp: u64,
}

/// Appends one JSON line per parsed file when a log file is configured.
///
/// Cloning shares the underlying writer, so concurrent discoveries can log to
/// the same file.
#[derive(Clone)]
pub struct HeuristicLogger {
    writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl HeuristicLogger {
    pub fn new(log_file: Option<PathBuf>) -> Self {
        let writer = log_file.and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => Some(Arc::new(Mutex::new(BufWriter::new(file)))),
                Err(e) => {
                    warn!("Failed to open heuristic log file {:?}: {}", path, e);
                    None
                }
            }
        });

        Self { writer }
    }

    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn log_file(&self, file: &Path, kind: FileKind, facts: &[ServiceFact], latency_us: u64) {
        let Some(writer) = &self.writer else {
            return;
        };

        let entry = HeuristicEntry {
            file,
            kind,
            facts,
            latency_us,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        };

        if let Ok(mut writer) = writer.lock() {
            match serde_json::to_string(&entry) {
                Ok(json) => {
                    if let Err(e) = writeln!(writer, "{}", json) {
                        warn!("Failed to write heuristic log entry: {}", e);
                    }
                    if let Err(e) = writer.flush() {
                        warn!("Failed to flush heuristic log: {}", e);
                    }
                }
                Err(e) => {
                    warn!("Failed to serialize heuristic entry for {:?}: {}", file, e);
                }
            }
        }

        debug!(file = %file.display(), %kind, facts = facts.len(), latency_us, "Heuristic log");
    }
}

impl Default for HeuristicLogger {
    fn default() -> Self {
        Self::disabled()
    }
}
