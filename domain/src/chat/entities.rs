//! Chat session entities
//!
//! Sessions are append-only message sequences owned exclusively by the UI
//! layer. The orchestration core receives one user message at a time and
//! returns one response string; it never reads session state. Attachments
//! are passed by reference (path, name, size) rendered into the message
//! text; the core never opens the files itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One message in a chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message text
    pub content: String,
    /// True for user messages, false for team responses
    pub is_user: bool,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            timestamp: Utc::now(),
        }
    }
}

/// Reference to a file uploaded alongside a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Name the file was uploaded under
    pub original_name: String,
    /// Where the document store saved it
    pub stored_path: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Lowercased extension including the dot (e.g., ".pdf"), empty if none
    pub extension: String,
}

impl AttachmentRef {
    pub fn new(original_name: impl Into<String>, stored_path: impl Into<String>, size_bytes: u64) -> Self {
        let original_name = original_name.into();
        let extension = Path::new(&original_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self {
            original_name,
            stored_path: stored_path.into(),
            size_bytes,
            extension,
        }
    }

    /// Human-readable one-line reference for embedding in a message
    pub fn describe(&self) -> String {
        format!(
            "{} ({:.2} MB) - saved to: {}",
            self.original_name,
            self.size_bytes as f64 / (1024.0 * 1024.0),
            self.stored_path
        )
    }
}

/// Render attachment references as a text block appended to the user
/// message. Returns an empty string when there are no attachments.
pub fn render_attachments(attachments: &[AttachmentRef]) -> String {
    if attachments.is_empty() {
        return String::new();
    }
    let mut block = String::from("\n\nAttached files:\n");
    for attachment in attachments {
        block.push_str(&format!("- {}\n", attachment.describe()));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_roles() {
        let user = Message::user("Estimate this property");
        let bot = Message::assistant("Estimated value: 460000");
        assert!(user.is_user);
        assert!(!bot.is_user);
    }

    #[test]
    fn test_attachment_extension() {
        let attachment = AttachmentRef::new(
            "Inspection_Report.PDF",
            "documents/module1/20260830_Inspection_Report.PDF",
            2048,
        );
        assert_eq!(attachment.extension, ".pdf");
        assert!(attachment.describe().contains("Inspection_Report.PDF"));

        let bare = AttachmentRef::new("README", "documents/module1/README", 10);
        assert_eq!(bare.extension, "");
    }

    #[test]
    fn test_render_attachments() {
        assert_eq!(render_attachments(&[]), "");

        let block = render_attachments(&[AttachmentRef::new(
            "listing.txt",
            "documents/module1/20260830_listing.txt",
            100,
        )]);
        assert!(block.contains("Attached files:"));
        assert!(block.contains("listing.txt"));
    }
}
