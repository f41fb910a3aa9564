use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::Path, time::Duration};

use dashboard_nav::{
    app::App,
    cli::{Cli, Commands},
    command::Command,
    config::NavConfig,
    debounce::Debouncer,
    error::{NavError, Result},
    event, main_lib, screenshot, ui,
};

const LOG_ENV: &str = "DASHBOARD_NAV_LOG";

fn init_logging(verbose: bool) -> Result<()> {
    if let Ok(log_file) = std::env::var(LOG_ENV) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| NavError::Generic(format!("Failed to open log file {}: {}", log_file, e)))?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();
        log::info!("dashboard-nav starting up");
    } else if verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = NavConfig::load(cli.config.as_deref().map(Path::new))?;

    let command = cli.command.unwrap_or(Commands::Run {
        tree: None,
        translations: None,
    });

    match command {
        Commands::Run { tree, translations } => {
            run_interactive(tree.as_deref(), translations.as_deref(), config).await
        }
        Commands::Screenshot {
            snapshot,
            output,
            width,
            height,
        } => screenshot::generate_screenshot(&snapshot, output.as_deref(), width, height, &config),
        Commands::Execute {
            snapshot,
            command,
            output,
            screenshot,
            width,
            height,
        } => main_lib::execute_command(
            &snapshot,
            &command,
            output.as_deref(),
            screenshot,
            width,
            height,
            &config,
        ),
        Commands::SaveState {
            tree,
            location,
            output,
        } => main_lib::save_state(tree.as_deref(), &location, output.as_deref(), &config),
        Commands::Match { location, href } => {
            main_lib::match_route(&location, &href);
            Ok(())
        }
        Commands::Check { tree } => {
            let issues = main_lib::check_tree(&tree)?;
            if issues > 0 {
                return Err(NavError::Generic(format!("{} issue(s) found in {}", issues, tree)));
            }
            Ok(())
        }
    }
}

async fn run_interactive(tree_path: Option<&str>, translations_path: Option<&str>, config: NavConfig) -> Result<()> {
    let tree = main_lib::load_tree(tree_path)?;
    let translations = main_lib::load_translations(translations_path)?;
    let debounce = config.search_debounce();

    let mut app = App::new(tree, translations, config);
    let (debouncer, mut search_receiver) = Debouncer::new(debounce);
    app.enable_debounced_search(debouncer);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.apply_command(Command::Resize(size.width))?;

    let tick_rate = Duration::from_millis(250);
    let result = loop {
        if let Err(e) = terminal.draw(|f| ui::draw(f, &mut app)) {
            break Err(e.into());
        }

        match crossterm::event::poll(tick_rate) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => {
                    if let Err(e) = event::handle_event(event, &mut app) {
                        log::error!("Error handling event: {}", e);
                        app.status_message = format!("Error: {}", e);
                    }
                }
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }

        while let Ok(delivery) = search_receiver.try_recv() {
            if let Err(e) = app.apply_search_delivery(delivery) {
                app.status_message = format!("Search failed: {}", e);
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
