//! Main application controller
//!
//! Manages the TUI, application state, and screen rendering loop.

use crate::{
    app::{
        host::ExerciseHost,
        playback::Playback,
        screens::{ExploreScreen, HistoryScreen, MenuItem, MenuScreen, TaskAction, TaskScreen},
        state::{AppState, NavigationAction, StateManager},
        tui::{Tui, DEFAULT_POLL_INTERVAL},
    },
    audio::{self, AudioOutput},
    config::{ConfigManager, ExploreConfig},
    error::user_friendly_message,
    i18n::{self, Catalog},
    ExploreError, Result, MAX_RECORDS_HISTORY,
};
use crossterm::event::{KeyCode, KeyEvent};
use std::io;

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Application state manager
    state_manager: StateManager,
    /// Application config
    config: ExploreConfig,
    /// Texts for the configured language
    catalog: Catalog,
    /// Screen components
    menu_screen: MenuScreen,
    explore_screen: ExploreScreen,
    task_screen: TaskScreen,
    history_screen: HistoryScreen,
    /// Sound output and narration
    playback: Playback,
    /// The exercise while it is shown
    exercise: Option<ExerciseHost>,
    /// Saved exercise records
    manager: ConfigManager,
}

impl App {
    /// Create the application with the sound device the config asks for
    pub fn new(config: ExploreConfig, catalog: Catalog) -> Result<Self> {
        let output = audio::select_output(config.audio.enabled);
        Self::with_output(config, catalog, output)
    }

    /// Create the application around a given audio output
    pub fn with_output(
        config: ExploreConfig,
        catalog: Catalog,
        output: Box<dyn AudioOutput>,
    ) -> Result<Self> {
        let manager = ConfigManager::new()?;
        Ok(Self {
            tui: Tui::new(DEFAULT_POLL_INTERVAL)?,
            state_manager: StateManager::new(),
            menu_screen: MenuScreen::new(catalog.t(i18n::INTRO_HEADER)),
            explore_screen: ExploreScreen::new(catalog.t(i18n::NEXT), config.character.clone()),
            task_screen: TaskScreen::new(),
            history_screen: HistoryScreen::default(),
            playback: Playback::new(&config, output),
            exercise: None,
            manager,
            config,
            catalog,
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| ExploreError::TuiError(format!("cannot set up terminal: {}", e)))
    }

    /// Run the main application loop. Must be called inside a tokio runtime.
    pub fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            self.pump();
            self.draw()?;
            self.handle_events()?;
        }
        self.leave_exercise();
        Ok(())
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui
            .restore()
            .map_err(|e| ExploreError::TuiError(format!("cannot restore terminal: {}", e)))
    }

    /// Apply timer ticks, refresh the exercise view and play finished narration
    fn pump(&mut self) {
        if let Some(exercise) = &mut self.exercise {
            exercise.pump(&mut self.playback);
            if let Some(snapshot) = exercise.take_snapshot() {
                self.explore_screen.update_snapshot(snapshot);
            }
            if exercise.take_focus_request() {
                self.explore_screen.focus_call_to_action();
            }
        }
        self.playback.poll_narration();
    }

    /// Draw the current screen
    fn draw(&mut self) -> io::Result<()> {
        let state = self.state_manager.current_state();
        let Self {
            tui,
            menu_screen,
            explore_screen,
            task_screen,
            history_screen,
            ..
        } = self;

        tui.draw(|f| match state {
            AppState::Menu => menu_screen.render(f),
            AppState::Explore => explore_screen.render(f),
            AppState::Task => task_screen.render(f),
            AppState::History => history_screen.render(f),
        })
    }

    /// Handle keyboard events and update state
    fn handle_events(&mut self) -> Result<()> {
        let Some(key) = self.tui.next_key()? else {
            return Ok(());
        };

        // Every key but Esc and Ctrl+C belongs to the exercise
        if self.state_manager.current_state() == AppState::Explore {
            self.handle_explore_screen_events(key);
            return Ok(());
        }

        let nav_action = StateManager::key_to_navigation(key);
        if nav_action == NavigationAction::Quit {
            self.state_manager.quit();
            return Ok(());
        }

        match self.state_manager.current_state() {
            AppState::Menu => self.handle_menu_screen_events(nav_action),
            AppState::Task => self.handle_task_screen_events(nav_action),
            AppState::History => self.handle_history_screen_events(nav_action),
            AppState::Explore => {}
        }
        Ok(())
    }

    fn handle_menu_screen_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.menu_screen.select_previous(),
            NavigationAction::Down => self.menu_screen.select_next(),
            NavigationAction::Select => match self.menu_screen.selected_item() {
                MenuItem::Play => self.enter_exercise(),
                MenuItem::History => self.open_history(),
                MenuItem::Quit => self.state_manager.quit(),
            },
            other => self.state_manager.handle_navigation(other),
        }
    }

    fn handle_explore_screen_events(&mut self, key: KeyEvent) {
        if StateManager::is_force_quit(&key) {
            self.leave_exercise();
            self.state_manager.quit();
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.leave_exercise();
                self.state_manager.transition_to(AppState::Menu);
            }
            KeyCode::Enter
                if self.explore_screen.is_completed() && self.explore_screen.is_cta_focused() =>
            {
                let record = self.exercise.as_ref().and_then(ExerciseHost::record);
                self.leave_exercise();
                match record {
                    Some(record) => {
                        tracing::info!("Continuing to task: {}", record.summary());
                        self.task_screen.set_record(record);
                        self.state_manager.transition_to(AppState::Task);
                    }
                    None => self.state_manager.transition_to(AppState::Menu),
                }
            }
            _ => {
                if let Some(exercise) = &mut self.exercise {
                    exercise.key_down(&key, &mut self.playback);
                }
            }
        }
    }

    fn handle_task_screen_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Left => self.task_screen.select_previous_action(),
            NavigationAction::Right => self.task_screen.select_next_action(),
            NavigationAction::Select => match self.task_screen.selected_action() {
                TaskAction::Save => self.save_record(),
                TaskAction::Back => self.state_manager.transition_to(AppState::Menu),
            },
            NavigationAction::Back => self.state_manager.transition_to(AppState::Menu),
            _ => {}
        }
    }

    fn handle_history_screen_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.history_screen.select_previous(),
            NavigationAction::Down => self.history_screen.select_next(),
            NavigationAction::Back => self.state_manager.transition_to(AppState::Menu),
            _ => {}
        }
    }

    /// Mount a fresh exercise and show it
    fn enter_exercise(&mut self) {
        self.leave_exercise();

        let mut exercise = ExerciseHost::new(&self.config, &self.catalog);
        exercise.mount(&mut self.playback);
        self.explore_screen.reset(exercise.snapshot());
        self.exercise = Some(exercise);
        self.state_manager.transition_to(AppState::Explore);
    }

    /// Unmount the exercise if one is shown
    fn leave_exercise(&mut self) {
        if let Some(mut exercise) = self.exercise.take() {
            exercise.unmount(&mut self.playback);
        }
    }

    fn open_history(&mut self) {
        match self.manager.get_recent_records(MAX_RECORDS_HISTORY) {
            Ok(records) => self.history_screen.set_records(records),
            Err(e) => {
                tracing::error!("Loading history failed: {}", e);
                self.history_screen.set_error(user_friendly_message(&e));
            }
        }
        self.state_manager.transition_to(AppState::History);
    }

    fn save_record(&mut self) {
        if self.task_screen.is_saved() {
            return;
        }
        if let Some(record) = self.task_screen.record().cloned() {
            let outcome = self.manager.save_record(record);
            self.task_screen.complete_save(outcome);
        }
    }
}
