//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod explore;
pub mod history;
pub mod menu;
pub mod task;

pub use explore::ExploreScreen;
pub use history::HistoryScreen;
pub use menu::{MenuItem, MenuScreen};
pub use task::{TaskAction, TaskScreen};
