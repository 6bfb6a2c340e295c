//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::store::{FileStorage, ProgressStore};

/// The progress store handle screens read and write.
pub type Progress = ProgressStore<FileStorage>;

/// The result of handling an event on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::update`]
/// to drive the [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen — no state change.
    Stay,
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Navigate to the level-select screen.
    GoToLevelSelect,
    /// Navigate to the interactive tutorial.
    GoToTutorial,
    /// Start (or restart) a game on the given level.
    GoToGame {
        /// Level id to play.
        level: u8,
    },
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its state, renders its UI, and handles key events. The
/// controller calls these methods in the event loop; [`Screen::update`]
/// gives time-driven screens (session ticks, solved auto-advance) a chance
/// to transition without input.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, progress: &Progress);

    /// Handles a key event and returns the resulting transition.
    fn handle_key(&mut self, key: KeyEvent, progress: &Progress) -> ScreenTransition;

    /// Called once per loop iteration for time-driven state changes.
    fn update(&mut self, _progress: &Progress) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
