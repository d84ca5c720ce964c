//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and application state handling.

pub mod app;
pub mod host;
pub mod playback;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::App;
pub use host::ExerciseHost;
pub use playback::Playback;
pub use screens::{ExploreScreen, HistoryScreen, MenuScreen, TaskAction, TaskScreen};
pub use state::{AppState, NavigationAction, StateManager};
pub use tui::Tui;
