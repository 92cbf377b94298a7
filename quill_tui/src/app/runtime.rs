use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::actions::{handle_key, perform_action};
use crate::app::state::App;
use crate::ui::main_view::ui;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick_count += 1;
        app.poll_generation();

        if app.dirty || app.is_processing() {
            terminal.draw(|f| ui(f, app))?;
            app.dirty = false;
        }

        let poll_ms = if app.is_processing() { 50 } else { 200 };
        if event::poll(Duration::from_millis(poll_ms))? {
            app.dirty = true;
            if handle_runtime_event(app, event::read()?) {
                return Ok(());
            }
        }
    }
}

fn handle_runtime_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match app.button_at(mouse.column, mouse.row)
            {
                Some(action) => perform_action(app, action),
                None => false,
            },
            MouseEventKind::ScrollUp => {
                app.scroll_history_up(1);
                false
            }
            MouseEventKind::ScrollDown => {
                app.scroll_history_down(1);
                false
            }
            _ => false,
        },
        _ => false,
    }
}
