//! Game screen — renders the board and drives a [`GameSession`].
//!
//! Arrow keys slide the tile on that side of the blank; the engine ignores
//! anything illegal, so a bad keypress simply does nothing.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::levels::level_config;
use crate::lobby::screen::{Progress, Screen, ScreenTransition};
use crate::puzzle::{GameSession, MoveOutcome, SolveSummary};
use crate::store::HighscoreRecord;

/// Delay before the solved screen advances to the next level on its own.
const AUTO_ADVANCE: Duration = Duration::from_secs(4);

/// Tile, border, and accent colors for one level.
#[derive(Debug, Clone, Copy)]
struct LevelTheme {
    tile: Color,
    border: Color,
    accent: Color,
}

/// Color theme for a level id, defaulting to the level-1 palette.
fn theme_for(level: u8) -> LevelTheme {
    match level {
        2 => LevelTheme {
            tile: Color::Rgb(0xf1, 0xf5, 0xff),
            border: Color::Rgb(0x63, 0x66, 0xf1),
            accent: Color::Rgb(0x63, 0x66, 0xf1),
        },
        3 => LevelTheme {
            tile: Color::Rgb(0xf9, 0xf8, 0x71),
            border: Color::Rgb(0xfb, 0xbf, 0x24),
            accent: Color::Rgb(0xfb, 0xbf, 0x24),
        },
        4 => LevelTheme {
            tile: Color::Rgb(0xfc, 0xa5, 0xa5),
            border: Color::Rgb(0xef, 0x44, 0x44),
            accent: Color::Rgb(0xef, 0x44, 0x44),
        },
        5 => LevelTheme {
            tile: Color::Rgb(0xa5, 0xf3, 0xfc),
            border: Color::Rgb(0x0e, 0xa5, 0xe9),
            accent: Color::Rgb(0x0e, 0xa5, 0xe9),
        },
        _ => LevelTheme {
            tile: Color::White,
            border: Color::Rgb(0x63, 0x66, 0xf1),
            accent: Color::Rgb(0x5e, 0xea, 0xd4),
        },
    }
}

/// State for the game screen.
#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
    theme: LevelTheme,
    entry_highscore: Option<HighscoreRecord>,
    summary: Option<SolveSummary>,
    auto_advance_at: Option<Instant>,
}

impl GameScreen {
    /// Creates a game screen for the given level, shuffling a fresh board.
    #[instrument(skip(progress))]
    pub fn new(level: u8, progress: &Progress) -> Self {
        let config = level_config(level);
        let session = GameSession::new(level, config);
        let entry_highscore = progress.highscore(level);
        Self {
            session,
            theme: theme_for(level),
            entry_highscore,
            summary: None,
            auto_advance_at: None,
        }
    }

    /// Maps an arrow key to the index of the tile that would slide.
    ///
    /// Up moves the tile below the blank, Left moves the tile right of the
    /// blank, and so on. Row wraparound is left for the engine to reject.
    fn move_index_for(&self, code: KeyCode) -> Option<usize> {
        let board = self.session.board();
        let blank = board.blank();
        let size = board.size();
        match code {
            KeyCode::Up => Some(blank + size).filter(|&i| i < size * size),
            KeyCode::Down => blank.checked_sub(size),
            KeyCode::Left => Some(blank + 1).filter(|&i| i < size * size),
            KeyCode::Right => blank.checked_sub(1),
            _ => None,
        }
    }

    /// Runs the solved-handling procedure once and arms the auto-advance.
    fn on_solved(&mut self, progress: &Progress) {
        let summary = self.session.solve_summary(progress);
        if summary.next_level().is_some() {
            self.auto_advance_at = Some(Instant::now() + AUTO_ADVANCE);
        }
        self.summary = Some(summary);
    }

    /// Info text shown below the title, matching the in-game formats.
    fn info_text(&self) -> String {
        if let Some(summary) = &self.summary {
            return self.solved_text(summary);
        }
        let config = self.session.config();
        let mut text = if config.timer_enabled() {
            format!(
                "Moves: {} | Time: {}s",
                self.session.move_count(),
                self.session.elapsed_seconds()
            )
        } else if self.session.move_count() > 0 {
            format!("{}\nMoves: {}", config.info_text(), self.session.move_count())
        } else {
            config.info_text().to_string()
        };
        if let Some(prev) = &self.entry_highscore {
            text.push('\n');
            text.push_str(&format_highscore(prev));
        }
        text
    }

    /// Banner text for the solved state.
    fn solved_text(&self, summary: &SolveSummary) -> String {
        let level = self.session.level();
        let score = summary.score();
        let mut text = match score.elapsed_seconds() {
            Some(seconds) => format!(
                "Solved! Level {level} finished in {} moves and {seconds}s.",
                score.move_count()
            ),
            None => format!(
                "Solved! You finished the puzzle in {} moves.",
                score.move_count()
            ),
        };
        if *summary.is_best() {
            text.push_str("\nNew highscore!");
        } else if let Some(prev) = summary.previous() {
            text.push('\n');
            text.push_str(&format_highscore(prev));
        }
        match summary.next_level() {
            Some(next) => {
                text.push_str(&format!("\nNext level ({next}) in 4s — or press n."));
            }
            None => text.push_str("\nAll levels complete!"),
        }
        text
    }

    /// Builds one styled line per board row (plus spacing lines).
    fn board_lines(&self) -> Vec<Line<'static>> {
        let state = self.session.render_state();
        let size = state.size();
        let solved = state.solved();
        let tile_style = if solved {
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x5e, 0xea, 0xd4))
        } else {
            Style::default().fg(self.theme.accent).bg(self.theme.tile)
        };
        let blank_style = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::with_capacity(size * 2);
        for row in 0..size {
            let mut spans = Vec::with_capacity(size * 2);
            for col in 0..size {
                let tile = state.tiles()[row * size + col];
                if tile == 0 {
                    spans.push(Span::styled("  ·  ", blank_style));
                } else {
                    spans.push(Span::styled(format!(" {tile:>2}  "), tile_style));
                }
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Screen for GameScreen {
    fn render(&self, frame: &mut Frame, _progress: &Progress) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("Level {}", self.session.level()))
            .style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let info = Paragraph::new(self.info_text())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(info, chunks[1]);

        let board = Paragraph::new(self.board_lines())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            );
        frame.render_widget(board, chunks[2]);

        let help = Paragraph::new("←↑↓→: Slide | r: Reshuffle | Esc: Levels | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, progress))]
    fn handle_key(&mut self, key: KeyEvent, progress: &Progress) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                if self.summary.is_none()
                    && let Some(index) = self.move_index_for(key.code)
                    && self.session.request_move(index) == MoveOutcome::Solved
                {
                    self.on_solved(progress);
                }
                ScreenTransition::Stay
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                info!(level = self.session.level(), "Reshuffling");
                self.session.reshuffle();
                self.summary = None;
                self.auto_advance_at = None;
                self.entry_highscore = progress.highscore(self.session.level());
                ScreenTransition::Stay
            }
            KeyCode::Char('n') | KeyCode::Char('N') => match &self.summary {
                Some(summary) => match summary.next_level() {
                    Some(next) => ScreenTransition::GoToGame { level: *next },
                    None => ScreenTransition::Stay,
                },
                None => ScreenTransition::Stay,
            },
            KeyCode::Esc => ScreenTransition::GoToLevelSelect,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _progress: &Progress) -> ScreenTransition {
        if self.summary.is_none() {
            self.session.poll_tick(Instant::now());
            return ScreenTransition::Stay;
        }
        if let (Some(deadline), Some(summary)) = (self.auto_advance_at, &self.summary)
            && Instant::now() >= deadline
            && let Some(next) = summary.next_level()
        {
            debug!(next = *next, "Auto-advancing to next level");
            return ScreenTransition::GoToGame { level: *next };
        }
        ScreenTransition::Stay
    }
}

/// Formats a stored highscore for display.
fn format_highscore(record: &HighscoreRecord) -> String {
    match record.elapsed_seconds() {
        Some(seconds) => format!("Highscore: {} moves, {seconds}s", record.move_count()),
        None => format!("Highscore: {} moves", record.move_count()),
    }
}
