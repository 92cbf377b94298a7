pub use category::Category;
pub use config::{Config, CredentialSource, ProviderConfig};
pub use error::{ErrorKind, GenerationError};
pub use llm::{CompletionBackend, ContentGenerator, GenerationClient, HttpBackend};
pub use orchestrator::{History, HistoryEntry, Orchestrator, OutputView, UiState};
pub use redaction::redact_sensitive_text;

pub mod category;
pub mod config;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod redaction;
