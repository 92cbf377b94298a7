use anyhow::{anyhow, Result};
use quill_core::{Category, Config, GenerationClient};
use std::sync::Arc;

mod app;
mod theme;
mod ui;

use app::runtime::run_app;
use app::session_log::init_session_logging;
use app::state::App;
use app::terminal::{install_panic_hook, TerminalGuard};

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = init_session_logging();

    let config = Config::load().await?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let category = parse_category_arg(&args)?.unwrap_or(config.default_category);

    let generator = Arc::new(GenerationClient::new(&config.provider));
    tracing::info!(
        model = %generator.model(),
        %category,
        "Quill starting"
    );

    install_panic_hook();
    let mut guard = TerminalGuard::enter()?;

    let mut app = App::new(config, generator, category, log_path);
    let res = run_app(guard.terminal_mut(), &mut app).await;

    guard.restore()?;

    if let Err(err) = res {
        tracing::error!(error = %format!("{:#}", err), "Quill exited with an error");
        println!("{:?}", err);
    }
    if let Some(path) = &app.log_path {
        tracing::info!(path = %path.display(), "Session log closed");
    }

    Ok(())
}

fn parse_category_arg(args: &[String]) -> Result<Option<Category>> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--category=") {
            return Ok(Some(value.parse()?));
        }
        if arg == "--category" {
            let value = iter
                .next()
                .ok_or_else(|| anyhow!("--category requires a value (story, joke, quote)"))?;
            return Ok(Some(value.parse()?));
        }
    }
    Ok(None)
}
