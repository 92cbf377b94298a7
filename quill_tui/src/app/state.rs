use quill_core::{Category, Config, ContentGenerator, GenerationError, Orchestrator};
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    SelectCategory(Category),
    Generate,
    Quit,
}

#[derive(Clone, Debug)]
pub struct ActionButton {
    pub rect: Rect,
    pub action: UiAction,
}

pub struct App {
    pub orchestrator: Orchestrator,
    pub config: Config,
    pub theme: Theme,
    pub buttons: Vec<ActionButton>,
    pub history_scroll: u16,
    pub history_max_scroll: u16,
    pub log_path: Option<PathBuf>,
    pub tick_count: u64,
    pub dirty: bool,
    pending_category: Option<Category>,
    generation_rx: Option<oneshot::Receiver<Result<String, GenerationError>>>,
}

impl App {
    pub fn new(
        config: Config,
        generator: Arc<dyn ContentGenerator>,
        category: Category,
        log_path: Option<PathBuf>,
    ) -> Self {
        let theme = Theme::from_config(&config.theme);
        Self {
            orchestrator: Orchestrator::new(generator).with_category(category),
            config,
            theme,
            buttons: Vec::new(),
            history_scroll: 0,
            history_max_scroll: 0,
            log_path,
            tick_count: 0,
            dirty: true,
            pending_category: None,
            generation_rx: None,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.orchestrator.state().is_loading()
    }

    pub fn select_category(&mut self, category: Category) {
        if self.orchestrator.state().selected() != category {
            tracing::debug!(%category, "Category selected");
        }
        self.orchestrator.select_category(category);
        self.dirty = true;
    }

    /// Starts a request on a background task. Ignored while one is in
    /// flight, which is how the disabled trigger behaves.
    pub fn start_generation(&mut self) -> bool {
        if !self.orchestrator.state().can_generate() {
            return false;
        }

        let category = self.orchestrator.begin_generate();
        let generator = self.orchestrator.generator();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let res = generator.generate_content(category).await;
            let _ = tx.send(res);
        });

        self.pending_category = Some(category);
        self.generation_rx = Some(rx);
        self.dirty = true;
        true
    }

    /// Applies a finished request, if any. Returns true when state changed.
    pub fn poll_generation(&mut self) -> bool {
        let Some(rx) = &mut self.generation_rx else {
            return false;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => {
                tracing::error!("Generation task ended without a result");
                Err(GenerationError::GenerationFailed)
            }
        };

        self.generation_rx = None;
        let category = self
            .pending_category
            .take()
            .unwrap_or_else(|| self.orchestrator.state().selected());
        self.orchestrator.complete_generate(category, result);
        self.history_scroll = 0;
        self.dirty = true;
        true
    }

    pub fn scroll_history_up(&mut self, lines: u16) {
        self.history_scroll = self.history_scroll.saturating_sub(lines);
        self.dirty = true;
    }

    pub fn scroll_history_down(&mut self, lines: u16) {
        self.history_scroll = self
            .history_scroll
            .saturating_add(lines)
            .min(self.history_max_scroll);
        self.dirty = true;
    }

    pub fn button_at(&self, col: u16, row: u16) -> Option<UiAction> {
        self.buttons
            .iter()
            .find(|b| point_in_rect(b.rect, col, row))
            .map(|b| b.action)
    }
}

pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
