//! Chat session types owned by the UI layer

pub mod entities;

pub use entities::{AttachmentRef, Message, render_attachments};
