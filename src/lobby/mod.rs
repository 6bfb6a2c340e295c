//! Multi-screen terminal UI: controller, screen trait, and screens.

mod controller;
mod screen;
mod screens;

pub use controller::LobbyController;
pub use screen::{Progress, Screen, ScreenTransition};
pub use screens::{GameScreen, LevelSelectScreen, MainMenuScreen, TutorialScreen};
