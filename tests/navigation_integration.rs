//! Integration tests for screen navigation

use explore_keys::app::screens::{MenuItem, MenuScreen, TaskAction, TaskScreen};
use explore_keys::app::{AppState, NavigationAction, StateManager};
use explore_keys::models::{CompletionReason, ExerciseRecord};

#[test]
fn test_menu_screen_integration() {
    let mut menu = MenuScreen::new("Explore the keyboard");

    assert_eq!(menu.selected_item(), MenuItem::Play);
    menu.select_next();
    assert_eq!(menu.selected_item(), MenuItem::History);
    menu.select_previous();
    menu.select_previous();
    assert_eq!(menu.selected_item(), MenuItem::Quit);
}

#[test]
fn test_exercise_to_task_flow() {
    let mut state_manager = StateManager::new();
    assert_eq!(state_manager.current_state(), AppState::Menu);

    state_manager.transition_to(AppState::Explore);
    assert_eq!(state_manager.current_state().route(), "/explore/play");

    let mut task = TaskScreen::new();
    task.set_record(ExerciseRecord::new(
        61,
        12,
        "Ninja",
        CompletionReason::TimeLimit,
    ));
    state_manager.transition_to(AppState::Task);
    assert_eq!(state_manager.current_state().route(), "/task");
    assert_eq!(task.selected_action(), TaskAction::Save);

    // Back from the task screen returns to where the exercise was started
    state_manager.transition_to(AppState::Menu);
    assert_eq!(state_manager.current_state(), AppState::Menu);
    assert_eq!(state_manager.previous_state(), Some(AppState::Task));
}

#[test]
fn test_quit_handling() {
    let mut state_manager = StateManager::new();
    state_manager.transition_to(AppState::History);

    state_manager.handle_navigation(NavigationAction::Back);
    assert_eq!(state_manager.current_state(), AppState::Menu);
    assert!(!state_manager.should_quit());

    state_manager.handle_navigation(NavigationAction::Quit);
    assert!(state_manager.should_quit());
}
