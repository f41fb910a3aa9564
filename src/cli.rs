use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dashboard-nav")]
#[command(about = "Route-aware navigation sidebar for admin dashboards")]
pub struct Cli {
    /// Path to a JSON config file (defaults to $DASHBOARD_NAV_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log debug output to stderr for headless commands
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive sidebar (default)
    Run {
        /// Navigation tree JSON (defaults to the built-in sample)
        #[arg(short, long)]
        tree: Option<String>,
        /// Translation table JSON
        #[arg(long)]
        translations: Option<String>,
    },
    /// Render a snapshot to text
    Screenshot {
        /// Path to the JSON snapshot
        #[arg(short, long)]
        snapshot: String,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Terminal width for rendering
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "30")]
        height: u16,
    },
    /// Execute a command against a snapshot and output the result
    Execute {
        /// Path to the JSON snapshot
        #[arg(short, long)]
        snapshot: String,
        /// Command to execute (e.g., "down", "enter", "goto:/users?role=TEACHER")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting snapshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Also generate a screenshot of the result
        #[arg(long)]
        screenshot: bool,
        /// Terminal width for screenshot (if enabled)
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for screenshot (if enabled)
        #[arg(long, default_value = "30")]
        height: u16,
    },
    /// Save a snapshot for a tree positioned at a location
    SaveState {
        /// Navigation tree JSON (defaults to the built-in sample)
        #[arg(short, long)]
        tree: Option<String>,
        /// Location to open, e.g. /users?role=TEACHER
        #[arg(short, long, default_value = "/")]
        location: String,
        /// Output file for the snapshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check whether an href is active for a location
    Match {
        /// Current location, path plus optional query
        location: String,
        /// Candidate href
        href: String,
    },
    /// Report duplicate titles and excessive depth in a tree
    Check {
        /// Navigation tree JSON
        tree: String,
    },
}
