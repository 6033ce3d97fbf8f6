//! JSONL transcript writer.
//!
//! Each chat event is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to one file per module via a
//! buffered writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use estate_domain::{Message, ModuleId, TeamRunReport};
use serde_json::json;
use tracing::warn;

/// JSONL transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open the transcript file for a module, creating it if needed.
    ///
    /// Transcripts append across sessions. Returns `None` if the file
    /// cannot be opened; transcript failures never block a run.
    pub fn for_module(dir: impl AsRef<Path>, module: &ModuleId) -> Option<Self> {
        let path = dir.as_ref().join(format!("{}.jsonl", module.as_str()));

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one chat message.
    pub fn log_message(&self, message: &Message) {
        let role = if message.is_user { "user" } else { "assistant" };
        self.log(
            "message",
            json!({
                "role": role,
                "content": message.content,
            }),
        );
    }

    /// Record the outcome of a team run.
    pub fn log_report(&self, report: &TeamRunReport) {
        let members: Vec<serde_json::Value> = report
            .members
            .iter()
            .map(|m| {
                json!({
                    "agent": m.agent,
                    "success": m.success,
                    "attempts": m.attempts,
                })
            })
            .collect();
        self.log(
            "team_run",
            json!({
                "team": report.team,
                "partial": report.partial,
                "failed_member": report.failed_member,
                "members": members,
            }),
        );
    }

    fn log(&self, event_type: &str, payload: serde_json::Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = payload {
            map.insert("type".to_string(), json!(event_type));
            map.insert("timestamp".to_string(), json!(timestamp));
            serde_json::Value::Object(map)
        } else {
            json!({
                "type": event_type,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only, flush each line for crash safety
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_domain::MemberReport;
    use std::io::Read;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .trim()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_transcript_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let module = ModuleId::from("module4");
        let logger = JsonlTranscriptLogger::for_module(dir.path(), &module).unwrap();
        let path = logger.path().to_path_buf();

        logger.log_message(&Message::user("What is the ROI on this flat?"));
        logger.log_report(&TeamRunReport::complete(
            "InvestmentAnalysis",
            "ROI is 5%.",
            vec![MemberReport::succeeded("ROI Calculator Agent", 1, "ROI is 5%.")],
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "message");
        assert_eq!(lines[0]["role"], "user");
        assert!(lines[0].get("timestamp").is_some());
        assert_eq!(lines[1]["type"], "team_run");
        assert_eq!(lines[1]["partial"], false);
        assert_eq!(lines[1]["members"][0]["agent"], "ROI Calculator Agent");
    }

    #[test]
    fn test_transcript_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let module = ModuleId::from("module1");

        let first = JsonlTranscriptLogger::for_module(dir.path(), &module).unwrap();
        first.log_message(&Message::user("first"));
        let path = first.path().to_path_buf();
        drop(first);

        let second = JsonlTranscriptLogger::for_module(dir.path(), &module).unwrap();
        second.log_message(&Message::assistant("second"));
        drop(second);

        assert_eq!(read_lines(&path).len(), 2);
    }
}
