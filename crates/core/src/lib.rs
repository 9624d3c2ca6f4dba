//! Meetlens Core Library
//!
//! Loads meeting analyses from the analysis backend, navigates chapter
//! timestamps, keeps the assistant chat history and exports meeting insights
//! as PDF, DOCX, plain text or JSON.

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod normalize;
pub mod session;
pub mod timestamp;
pub mod types;

// Re-export commonly used items at crate root
pub use backend::{HttpBackend, InsightsBackend, ScriptedChat};
pub use chat::ChatSession;
pub use config::Config;
pub use error::{MeetlensError, Result};
pub use export::{ExportData, ExportFormat, Serializer, export_all, export_file};
pub use format::{format_insight_readable, format_timestamp};
pub use normalize::{fetch_insight, normalize, segment_transcript};
pub use session::SessionContext;
pub use timestamp::{MediaElement, SeekTarget, parse_timestamp, seek};
pub use types::{ChatMessage, ChatRole, InsightChapter, MeetingInsight};
