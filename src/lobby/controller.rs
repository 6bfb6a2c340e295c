//! Lobby controller — the state machine driving the multi-screen TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{Progress, Screen, ScreenTransition};
use crate::lobby::screens::{GameScreen, LevelSelectScreen, MainMenuScreen, TutorialScreen};

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    LevelSelect(LevelSelectScreen),
    Tutorial(TutorialScreen),
    Game(GameScreen),
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug)]
pub struct LobbyController {
    progress: Progress,
    start_level: Option<u8>,
}

impl LobbyController {
    /// Creates a new lobby controller over the given progress store.
    ///
    /// `start_level` skips the menus and opens the game screen directly,
    /// so a level can be launched straight from the command line.
    #[instrument(skip(progress))]
    pub fn new(progress: Progress, start_level: Option<u8>) -> Self {
        info!(?start_level, "Creating LobbyController");
        Self {
            progress,
            start_level,
        }
    }

    /// Runs the lobby event loop until the user quits.
    ///
    /// Renders the active screen, applies time-driven updates (session
    /// ticks, solved auto-advance), and dispatches key events at a 100 ms
    /// poll.
    #[instrument(skip(self, terminal))]
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let mut screen = match self.start_level {
            Some(level) => ActiveScreen::Game(GameScreen::new(level, &self.progress)),
            None => ActiveScreen::MainMenu(MainMenuScreen::new()),
        };

        loop {
            // Render current screen.
            terminal.draw(|frame| match &screen {
                ActiveScreen::MainMenu(s) => s.render(frame, &self.progress),
                ActiveScreen::LevelSelect(s) => s.render(frame, &self.progress),
                ActiveScreen::Tutorial(s) => s.render(frame, &self.progress),
                ActiveScreen::Game(s) => s.render(frame, &self.progress),
            })?;

            // Time-driven transitions first, so ticks and the auto-advance
            // fire even when no key is pressed.
            let transition = match &mut screen {
                ActiveScreen::MainMenu(s) => s.update(&self.progress),
                ActiveScreen::LevelSelect(s) => s.update(&self.progress),
                ActiveScreen::Tutorial(s) => s.update(&self.progress),
                ActiveScreen::Game(s) => s.update(&self.progress),
            };
            screen = match self.apply_transition(transition, screen) {
                Some(next) => next,
                None => {
                    info!("Lobby quitting");
                    return Ok(());
                }
            };

            // Poll for input with a short timeout to keep the loop live.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = match &mut screen {
                    ActiveScreen::MainMenu(s) => s.handle_key(key, &self.progress),
                    ActiveScreen::LevelSelect(s) => s.handle_key(key, &self.progress),
                    ActiveScreen::Tutorial(s) => s.handle_key(key, &self.progress),
                    ActiveScreen::Game(s) => s.handle_key(key, &self.progress),
                };
                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("Lobby quitting");
                        return Ok(());
                    }
                };
            }
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to
    /// quit. Navigating away from a screen drops it, which discards its
    /// session and any pending auto-advance.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToMainMenu => {
                info!("Navigating to MainMenu");
                Some(ActiveScreen::MainMenu(MainMenuScreen::new()))
            }

            ScreenTransition::GoToLevelSelect => {
                info!("Navigating to LevelSelect");
                Some(ActiveScreen::LevelSelect(LevelSelectScreen::new()))
            }

            ScreenTransition::GoToTutorial => {
                info!("Navigating to Tutorial");
                Some(ActiveScreen::Tutorial(TutorialScreen::new()))
            }

            ScreenTransition::GoToGame { level } => {
                info!(level, "Navigating to Game");
                Some(ActiveScreen::Game(GameScreen::new(level, &self.progress)))
            }

            ScreenTransition::Quit => None,
        }
    }
}
