//! Application state management
//!
//! Handles screen transitions, navigation logic, and keyboard event processing
//! for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Exercise menu with Play, History, Quit
    #[default]
    Menu,
    /// Running exercise
    Explore,
    /// Hand-off screen reached through the exercise's call-to-action
    Task,
    /// Saved exercise records
    History,
}

impl AppState {
    /// Route of the screen in the hosting application
    pub fn route(&self) -> &'static str {
        match self {
            AppState::Menu => "/explore",
            AppState::Explore => "/explore/play",
            AppState::Task => "/task",
            AppState::History => "/explore/history",
        }
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug, Default)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<AppState> {
        self.previous_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            tracing::debug!(
                "Navigating {} -> {}",
                self.current_state.route(),
                new_state.route()
            );
            self.previous_state = Some(self.current_state);
            self.current_state = new_state;
        }
    }

    /// Go back to the previous state if available, otherwise to the menu
    pub fn go_back(&mut self) {
        self.current_state = self.previous_state.take().unwrap_or_default();
    }

    /// Handle the navigation actions every screen shares
    pub fn handle_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.should_quit = true,
            NavigationAction::Back => match self.current_state {
                AppState::Menu => self.should_quit = true,
                _ => self.go_back(),
            },
            _ => {}
        }
    }

    /// Convert keyboard event to navigation action.
    ///
    /// Not used while an exercise is in progress: there every key is input.
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            _ => NavigationAction::None,
        }
    }

    /// Whether a key always leaves the application, even mid-exercise
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_manager_creation() {
        let state_manager = StateManager::new();
        assert_eq!(state_manager.current_state(), AppState::Menu);
        assert!(!state_manager.should_quit());
        assert!(state_manager.previous_state().is_none());
    }

    #[test]
    fn test_state_transitions() {
        let mut state_manager = StateManager::new();

        state_manager.transition_to(AppState::Explore);
        assert_eq!(state_manager.current_state(), AppState::Explore);
        assert_eq!(state_manager.previous_state(), Some(AppState::Menu));

        state_manager.transition_to(AppState::Task);
        assert_eq!(state_manager.current_state(), AppState::Task);
        assert_eq!(state_manager.previous_state(), Some(AppState::Explore));

        // Same-state transitions keep history intact
        state_manager.transition_to(AppState::Task);
        assert_eq!(state_manager.previous_state(), Some(AppState::Explore));
    }

    #[test]
    fn test_go_back() {
        let mut state_manager = StateManager::new();

        state_manager.transition_to(AppState::History);
        state_manager.go_back();
        assert_eq!(state_manager.current_state(), AppState::Menu);
        assert!(state_manager.previous_state().is_none());

        // Nothing to go back to stays on the menu
        state_manager.go_back();
        assert_eq!(state_manager.current_state(), AppState::Menu);
    }

    #[test]
    fn test_back_from_menu_quits() {
        let mut state_manager = StateManager::new();
        state_manager.handle_navigation(NavigationAction::Back);
        assert!(state_manager.should_quit());
    }

    #[test]
    fn test_back_elsewhere_goes_back() {
        let mut state_manager = StateManager::new();
        state_manager.transition_to(AppState::History);
        state_manager.handle_navigation(NavigationAction::Back);
        assert_eq!(state_manager.current_state(), AppState::Menu);
        assert!(!state_manager.should_quit());
    }

    #[test]
    fn test_routes() {
        assert_eq!(AppState::Menu.route(), "/explore");
        assert_eq!(AppState::Explore.route(), "/explore/play");
        assert_eq!(AppState::Task.route(), "/task");
    }

    #[test]
    fn test_key_to_navigation() {
        let nav = |code: KeyCode, modifiers: KeyModifiers| {
            StateManager::key_to_navigation(KeyEvent::new(code, modifiers))
        };

        assert_eq!(nav(KeyCode::Char('q'), KeyModifiers::NONE), NavigationAction::Quit);
        assert_eq!(nav(KeyCode::Char('c'), KeyModifiers::CONTROL), NavigationAction::Quit);
        assert_eq!(nav(KeyCode::Up, KeyModifiers::NONE), NavigationAction::Up);
        assert_eq!(nav(KeyCode::Char('j'), KeyModifiers::NONE), NavigationAction::Down);
        assert_eq!(nav(KeyCode::Left, KeyModifiers::NONE), NavigationAction::Left);
        assert_eq!(nav(KeyCode::Char('l'), KeyModifiers::NONE), NavigationAction::Right);
        assert_eq!(nav(KeyCode::Enter, KeyModifiers::NONE), NavigationAction::Select);
        assert_eq!(nav(KeyCode::Esc, KeyModifiers::NONE), NavigationAction::Back);
        assert_eq!(nav(KeyCode::F(1), KeyModifiers::NONE), NavigationAction::None);
    }

    #[test]
    fn test_force_quit() {
        assert!(StateManager::is_force_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!StateManager::is_force_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }
}
