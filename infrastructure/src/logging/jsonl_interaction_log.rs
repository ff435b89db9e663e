//! JSONL file writer for interaction events.
//!
//! Each [`InteractionEvent`] is serialized as a single JSON line with a
//! `type` field, appended to the file via a buffered writer.

use async_trait::async_trait;
use shuffle_application::{InteractionSink, SinkError};
use shuffle_domain::InteractionEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Interaction log that appends one JSON object per event.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Existing contents are kept,
/// so one file can collect many runs. Flushes after every batch and on `Drop`.
pub struct JsonlInteractionLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInteractionLog {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist. Returns `None` if
    /// the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create interaction log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open interaction log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &InteractionEvent) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(event)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "type".to_string(),
                serde_json::Value::String("interaction".to_string()),
            );
        }
        serde_json::to_string(&value)
    }
}

#[async_trait]
impl InteractionSink for JsonlInteractionLog {
    async fn persist(&self, events: &[InteractionEvent]) -> Result<(), SinkError> {
        let lines = events
            .iter()
            .map(Self::record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SinkError::PersistFailed {
                count: events.len(),
                reason: e.to_string(),
            })?;

        let mut writer = self.writer.lock().map_err(|_| SinkError::PersistFailed {
            count: events.len(),
            reason: "interaction log lock poisoned".to_string(),
        })?;
        for line in &lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;

        debug!("Appended {} interaction(s) to {}", lines.len(), self.path.display());
        Ok(())
    }
}

impl Drop for JsonlInteractionLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuffle_domain::InteractionKind;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.jsonl");
        let log = JsonlInteractionLog::new(&path).unwrap();

        log.persist(&[
            InteractionEvent::now("scene-1", InteractionKind::View),
            InteractionEvent::now("scene-1", InteractionKind::Like),
        ])
        .await
        .unwrap();
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["type"], "interaction");
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["item_id"], "scene-1");
        assert_eq!(lines[0]["kind"], "view");
        assert_eq!(lines[1]["kind"], "like");
    }

    #[tokio::test]
    async fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("interactions.jsonl");

        for kind in [InteractionKind::Dislike, InteractionKind::Favorite] {
            let log = JsonlInteractionLog::new(&path).unwrap();
            log.persist(&[InteractionEvent::now("scene-2", kind)])
                .await
                .unwrap();
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "dislike");
        assert_eq!(lines[1]["kind"], "favorite");
    }

    #[tokio::test]
    async fn test_empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");
        let log = JsonlInteractionLog::new(&path).unwrap();
        log.persist(&[]).await.unwrap();
        drop(log);

        assert!(std::fs::read_to_string(&path).unwrap().is_empty());
    }
}
