//! Level-select screen — tutorial plus levels 1..=5 with unlock gating.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::levels::{LEVEL_COUNT, level_config};
use crate::lobby::screen::{Progress, Screen, ScreenTransition};

/// One selectable entry on the level-select screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelEntry {
    Tutorial,
    Level(u8),
}

impl LevelEntry {
    fn all() -> Vec<LevelEntry> {
        let mut entries = vec![Self::Tutorial];
        entries.extend((1..=LEVEL_COUNT).map(Self::Level));
        entries
    }

    fn label(self) -> String {
        match self {
            Self::Tutorial => "Tutorial".to_string(),
            Self::Level(level) => {
                let size = level_config(level).size();
                format!("Level {level} — {size}×{size}")
            }
        }
    }

    /// Whether the entry can be opened given the unlocked level.
    ///
    /// The tutorial is always available; level `n` needs `unlocked >= n`.
    fn is_unlocked(self, unlocked: u8) -> bool {
        match self {
            Self::Tutorial => true,
            Self::Level(level) => level <= unlocked,
        }
    }
}

/// State for the level-select screen.
#[derive(Debug)]
pub struct LevelSelectScreen {
    list_state: ListState,
}

impl LevelSelectScreen {
    /// Creates a new level-select screen.
    #[instrument]
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { list_state: state }
    }

    fn select_previous(&mut self) {
        let count = LevelEntry::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = LevelEntry::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_entry(&self) -> LevelEntry {
        let entries = LevelEntry::all();
        let idx = self.list_state.selected().unwrap_or(0);
        entries[idx.min(entries.len() - 1)]
    }
}

impl Default for LevelSelectScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LevelSelectScreen {
    fn render(&self, frame: &mut Frame, progress: &Progress) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Select a Level")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let unlocked = progress.unlocked_level();
        let items: Vec<ListItem> = LevelEntry::all()
            .iter()
            .map(|entry| {
                if entry.is_unlocked(unlocked) {
                    ListItem::new(entry.label())
                } else {
                    ListItem::new(format!("{} (locked)", entry.label()))
                        .style(Style::default().fg(Color::DarkGray))
                }
            })
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Levels"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Play | Esc: Menu | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, progress))]
    fn handle_key(&mut self, key: KeyEvent, progress: &Progress) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let entry = self.selected_entry();
                if !entry.is_unlocked(progress.unlocked_level()) {
                    debug!(entry = ?entry, "Locked level selected; ignoring");
                    return ScreenTransition::Stay;
                }
                info!(entry = ?entry, "Level entry selected");
                match entry {
                    LevelEntry::Tutorial => ScreenTransition::GoToTutorial,
                    LevelEntry::Level(level) => ScreenTransition::GoToGame { level },
                }
            }
            KeyCode::Esc => ScreenTransition::GoToMainMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
