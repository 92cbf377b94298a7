use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};

static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);
static MOUSE_CAPTURE: AtomicBool = AtomicBool::new(false);

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the raw-mode, alternate-screen terminal. Dropping it puts the shell
/// back the way it was, including on early returns and unwinding panics.
pub struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);

        match setup_screen() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = restore();
                Err(err)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    pub fn restore(self) -> Result<()> {
        restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}

fn setup_screen() -> Result<AppTerminal> {
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;

    // Mouse support enables clickable buttons.
    let mouse = execute!(out, EnableMouseCapture).is_ok();
    MOUSE_CAPTURE.store(mouse, Ordering::SeqCst);

    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Leaves raw mode and the alternate screen. Only the first call after
/// [`TerminalGuard::enter`] does anything.
pub fn restore() -> Result<()> {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }

    let mut out = stdout();
    if MOUSE_CAPTURE.swap(false, Ordering::SeqCst) {
        let _ = execute!(out, DisableMouseCapture);
    }
    let screen = execute!(out, LeaveAlternateScreen, Show);
    disable_raw_mode()?;
    screen?;
    Ok(())
}

/// Restores the terminal before the default hook prints the panic, so the
/// message lands on the normal screen.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}
