use anyhow::{bail, Context};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use xblock_client::{CounterClient, HttpClient, WorkbenchCounter};
use xblock_config::AppConfig;

mod actions;
mod comms;
mod dispatcher;
mod logger;
mod middleware;
mod modules;
mod store;
mod thunk;
mod thunk_actions;
mod uris;
mod view_models;
mod views;
mod xblock;

use xblock::{CounterXBlock, Element, LmsRuntime, XBlockData};

const USAGE: &str = "usage: counter-xblock [--offline] [--count N]";

/// Command line flags
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    /// Serve the increment handler in-process instead of calling the LMS
    offline: bool,
    /// Overrides the configured initial count
    count: Option<i64>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--offline" => parsed.offline = true,
                "--count" => {
                    let value = args.next().context("--count needs a value")?;
                    let count = value
                        .parse()
                        .with_context(|| format!("invalid count {:?}", value))?;
                    parsed.count = Some(count);
                }
                other => bail!("unknown argument {:?}\n{}", other, USAGE),
            }
        }
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    // .env may set RUST_LOG
    dotenvy::dotenv().ok();
    let log_file = logger::init()?;

    log::info!("Starting counter-xblock, logging to {}", log_file.display());

    let mut config = AppConfig::load();
    if let Some(count) = args.count {
        config.initial_count = count;
    }

    let client: Arc<dyn CounterClient> = if args.offline {
        log::info!("Offline: serving the increment handler in-process");
        Arc::new(WorkbenchCounter::new(config.initial_count))
    } else {
        Arc::new(HttpClient::new(config.csrf_token.clone()))
    };

    let mut xblock = CounterXBlock::new(
        Arc::new(LmsRuntime::new(config.lms_url.as_str())),
        Element::new(config.usage_id.as_str()),
        XBlockData {
            count: config.initial_count,
        },
        client,
        config.environment,
    )?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut xblock).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    }
    log::info!("Exiting counter-xblock");
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    xblock: &mut CounterXBlock,
) -> anyhow::Result<()> {
    loop {
        xblock.tick();

        let vm = xblock.view_model();
        terminal.draw(|frame| views::render(&vm, frame.area(), frame))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => xblock.click(),
            KeyCode::Char('c') => {
                if let Err(e) = xblock.handle_element_click().await {
                    log::error!("Direct increment failed: {:#}", e);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
        assert_eq!(
            parse(&["--offline", "--count", "4"]).unwrap(),
            Args {
                offline: true,
                count: Some(4)
            }
        );
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse(&["--count"]).is_err());
        assert!(parse(&["--count", "many"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
