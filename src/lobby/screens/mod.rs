//! Screens of the lobby state machine.

mod game;
mod level_select;
mod main_menu;
mod tutorial;

pub use game::GameScreen;
pub use level_select::LevelSelectScreen;
pub use main_menu::MainMenuScreen;
pub use tutorial::TutorialScreen;
