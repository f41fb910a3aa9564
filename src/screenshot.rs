use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;

use crate::{app::App, config::NavConfig, error::Result, snapshot::Snapshot, ui};

/// Draw `app` once on an off-screen terminal and return the text
pub fn render_to_string(app: &mut App, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    terminal.draw(|frame| {
        ui::draw(frame, app);
    })?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn generate_screenshot(
    snapshot_path: &str,
    output_path: Option<&str>,
    width: u16,
    height: u16,
    config: &NavConfig,
) -> Result<()> {
    let snapshot = Snapshot::load_from_file(snapshot_path)?;
    let mut app = App::from_snapshot(&snapshot, config.clone());

    let screenshot = render_to_string(&mut app, width, height)?;

    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path);
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let sym = buffer[(x, y)].symbol();
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}
