// Headless entry points behind the CLI subcommands

use std::fs;

use crate::app::App;
use crate::command::Command;
use crate::config::NavConfig;
use crate::error::Result;
use crate::executor::Executor;
use crate::providers::Translations;
use crate::render::MAX_DEPTH;
use crate::route::is_active;
use crate::snapshot::Snapshot;
use crate::tree::NavTree;

/// Load a tree file, falling back to the built-in sample
pub fn load_tree(path: Option<&str>) -> Result<NavTree> {
    match path {
        Some(path) => {
            let tree = NavTree::load_from_file(path)?;
            log::info!("Loaded {} top-level navigation items from {}", tree.items.len(), path);
            Ok(tree)
        }
        None => Ok(NavTree::sample()),
    }
}

pub fn load_translations(path: Option<&str>) -> Result<Translations> {
    match path {
        Some(path) => Translations::load_from_file(path),
        None => Ok(Translations::default()),
    }
}

fn write_output(output_path: Option<&str>, content: &str, what: &str) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} saved to: {}", what, path);
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

pub fn execute_command(
    snapshot_path: &str,
    command_str: &str,
    output_path: Option<&str>,
    generate_screenshot: bool,
    width: u16,
    height: u16,
    config: &NavConfig,
) -> Result<()> {
    let snapshot = Snapshot::load_from_file(snapshot_path)?;
    let command = Command::from_string(command_str)?;

    let result = Executor::execute(&snapshot, command, config)?;
    let result_json = serde_json::to_string_pretty(&result.snapshot)?;
    write_output(output_path, &result_json, "Result")?;

    for action in &result.actions {
        eprintln!("Action: {:?}", action);
    }
    if let Some(status) = result.status_message {
        eprintln!("Status: {}", status);
    }
    if result.should_quit {
        eprintln!("Command resulted in quit");
    }

    if generate_screenshot {
        let screenshot_path = output_path
            .map(|p| format!("{}.screenshot.txt", p.trim_end_matches(".json")))
            .unwrap_or_else(|| "command_result_screenshot.txt".to_string());

        let mut app = App::from_snapshot(&result.snapshot, config.clone());
        let screen = crate::screenshot::render_to_string(&mut app, width, height)?;
        fs::write(&screenshot_path, screen)?;
        eprintln!("Screenshot saved to: {}", screenshot_path);
    }

    Ok(())
}

/// Build the snapshot a fresh session would show at `location`
pub fn build_state(tree: NavTree, location: &str, config: &NavConfig) -> Result<Snapshot> {
    let mut app = App::new(tree, Translations::default(), config.clone());
    app.apply_command(Command::Goto(location.to_string()))?;
    app.status_message = "Ready".to_string();
    Ok(Snapshot::from_app(&app))
}

pub fn save_state(tree_path: Option<&str>, location: &str, output_path: Option<&str>, config: &NavConfig) -> Result<()> {
    let tree = load_tree(tree_path)?;
    let snapshot = build_state(tree, location, config)?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    write_output(output_path, &json, "Current state")
}

pub fn match_route(location: &str, href: &str) -> bool {
    let active = is_active(location, Some(href));
    println!("{}", active);
    active
}

/// Print tree diagnostics. Returns the number of issues found.
pub fn check_tree(tree_path: &str) -> Result<usize> {
    let tree = NavTree::load_from_file(tree_path)?;
    for (title, count) in tree.duplicate_titles() {
        println!("duplicate title: '{}' ({} times)", title, count);
    }
    if let Some(depth) = tree.max_depth() {
        if depth > MAX_DEPTH {
            println!("tree depth {} exceeds render limit {}", depth, MAX_DEPTH);
        }
    }
    let issues = tree.validate(MAX_DEPTH);
    if issues == 0 {
        println!("ok: {} top-level items", tree.items.len());
    }
    Ok(issues)
}
