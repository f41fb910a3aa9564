use crate::{
    app::App,
    command::Command,
    config::NavConfig,
    error::Result,
    navigator::NavAction,
    snapshot::Snapshot,
};

/// Result of executing a command
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub snapshot: Snapshot,
    pub actions: Vec<NavAction>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

/// Executes commands against saved snapshots
pub struct Executor;

impl Executor {
    /// Execute a command against a snapshot and return the resulting state
    pub fn execute(snapshot: &Snapshot, command: Command, config: &NavConfig) -> Result<ExecutionResult> {
        let mut app = App::from_snapshot(snapshot, config.clone());
        let status_before = app.status_message.clone();

        log::debug!("Executor: applying '{}'", command);
        let actions = app.apply_command(command)?;

        let status_message = if app.status_message != status_before {
            Some(app.status_message.clone())
        } else {
            None
        };

        Ok(ExecutionResult {
            snapshot: Snapshot::from_app(&app),
            actions,
            status_message,
            should_quit: app.should_quit,
        })
    }
}
