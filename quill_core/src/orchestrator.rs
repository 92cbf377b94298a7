use crate::category::Category;
use crate::error::GenerationError;
use crate::llm::ContentGenerator;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

pub const HISTORY_CAPACITY: usize = 10;
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub category: Category,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// Past results, newest first, never longer than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    selected: Category,
    loading: bool,
    error: Option<String>,
    content: String,
    history: History,
}

/// What the output region shows. Loading wins over error, error over content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputView<'a> {
    Loading,
    Error(&'a str),
    Content(&'a str),
    Placeholder,
}

impl UiState {
    pub fn selected(&self) -> Category {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_generate(&self) -> bool {
        !self.loading
    }

    pub fn output(&self) -> OutputView<'_> {
        if self.loading {
            OutputView::Loading
        } else if let Some(err) = self.error.as_deref() {
            OutputView::Error(err)
        } else if !self.content.is_empty() {
            OutputView::Content(&self.content)
        } else {
            OutputView::Placeholder
        }
    }
}

/// Sole owner of [`UiState`]. All mutation goes through the transition
/// methods below.
pub struct Orchestrator {
    state: UiState,
    generator: Arc<dyn ContentGenerator>,
    next_seq: u64,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            state: UiState::default(),
            generator,
            next_seq: 0,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.state.selected = category;
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn generator(&self) -> Arc<dyn ContentGenerator> {
        Arc::clone(&self.generator)
    }

    pub fn select_category(&mut self, category: Category) {
        self.state.selected = category;
    }

    /// Enters the loading state and returns the category the request must
    /// use, even if the selection changes before it completes.
    pub fn begin_generate(&mut self) -> Category {
        self.state.loading = true;
        self.state.error = None;
        self.state.content.clear();
        self.state.selected
    }

    pub fn complete_generate(
        &mut self,
        category: Category,
        result: Result<String, GenerationError>,
    ) {
        match result {
            Ok(content) => {
                let now = Utc::now();
                let entry = HistoryEntry {
                    id: self.next_entry_id(now),
                    category,
                    content: content.clone(),
                    created_at: now.timestamp_millis(),
                };
                tracing::info!(%category, id = %entry.id, "Generated content recorded");
                self.state.content = content;
                self.state.history.record(entry);
            }
            Err(e) => {
                tracing::warn!(%category, kind = ?e.kind(), "Generation failed");
                self.state.error = Some(display_message(&e));
            }
        }
        self.state.loading = false;
    }

    pub async fn generate(&mut self) {
        let category = self.begin_generate();
        let result = self.generator.generate_content(category).await;
        self.complete_generate(category, result);
    }

    /// Timestamp plus a per-orchestrator sequence number, so ids stay unique
    /// even when the wall clock repeats or steps backwards.
    fn next_entry_id(&mut self, now: DateTime<Utc>) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("{}-{}", now.to_rfc3339_opts(SecondsFormat::Millis, true), seq)
    }
}

fn display_message(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
