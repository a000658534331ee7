mod app;
mod bootstrap;
mod cli;
mod commands;
mod event;
#[cfg(test)]
mod test_support;

use std::io;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ktx_core::ContextConfig;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::App;
use crate::bootstrap::Loaded;
use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut loaded = bootstrap::load()?;

    let message = match cli.command() {
        Command::Current => commands::current(&mut loaded.contexts)?,
        Command::Use(identifier) => commands::use_context(&mut loaded.contexts, &identifier)?,
        Command::SwitchBack => commands::switch_back(&mut loaded.contexts)?,
        Command::Pick { config_filter, context_filter } => {
            let mut contexts = pick(loaded, &config_filter, &context_filter).await?;
            commands::current(&mut contexts)?
        }
    };
    println!("{message}");

    Ok(())
}

async fn pick(loaded: Loaded, config_filter: &str, context_filter: &str) -> anyhow::Result<ContextConfig> {
    install_panic_hook();

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(loaded.contexts, &loaded.config, config_filter, context_filter);
    let result = app.run(&mut terminal).await;

    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result?;
    Ok(app.into_contexts())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
