pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod executor;
pub mod expansion;
pub mod main_lib;
pub mod navigator;
pub mod providers;
pub mod render;
pub mod route;
pub mod screenshot;
pub mod snapshot;
pub mod theme;
pub mod tree;
pub mod ui;

pub use error::{NavError, Result};
pub use navigator::{NavAction, NavigatorEvent, NavigatorState};
pub use route::{is_active, Location};
pub use tree::{NavItem, NavTree};
