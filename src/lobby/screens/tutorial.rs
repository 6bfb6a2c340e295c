//! Tutorial screen — walks the player through the scripted 2×2 board.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use crate::lobby::screen::{Progress, Screen, ScreenTransition};
use crate::tutorial::{StepAction, Tutorial};

/// State for the tutorial screen.
#[derive(Debug)]
pub struct TutorialScreen {
    tutorial: Tutorial,
    unlocked: bool,
}

impl TutorialScreen {
    /// Creates a tutorial screen at the first step.
    #[instrument]
    pub fn new() -> Self {
        Self {
            tutorial: Tutorial::new(),
            unlocked: false,
        }
    }

    /// Applies the final step's unlock exactly once.
    fn maybe_finish(&mut self, progress: &Progress) {
        if !self.unlocked && self.tutorial.step().action() == StepAction::Finish {
            self.tutorial.finish(progress);
            self.unlocked = true;
        }
    }

    /// Builds one styled line per board row (plus spacing lines).
    fn board_lines(&self) -> Vec<Line<'static>> {
        let board = self.tutorial.board();
        let highlight = self.tutorial.step().highlight();
        let size = board.size();
        let tile_style = Style::default()
            .fg(Color::Rgb(0x63, 0x66, 0xf1))
            .bg(Color::White);
        let highlight_style = Style::default()
            .fg(Color::Rgb(0x5e, 0xea, 0xd4))
            .bg(Color::Rgb(0xe0, 0xfd, 0xfa))
            .add_modifier(Modifier::BOLD);
        let blank_style = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::with_capacity(size * 2);
        for row in 0..size {
            let mut spans = Vec::with_capacity(size * 2);
            for col in 0..size {
                let idx = row * size + col;
                let tile = board.tiles()[idx];
                if tile == 0 {
                    spans.push(Span::styled("  ·  ", blank_style));
                } else if highlight.contains(&idx) {
                    spans.push(Span::styled(format!(" {tile:>2}  "), highlight_style));
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

impl Default for TutorialScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TutorialScreen {
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

        let step = self.tutorial.current_step() + 1;
        let title = Paragraph::new(format!(
            "Tutorial — step {step}/{}",
            Tutorial::step_count()
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let text = Paragraph::new(self.tutorial.step().text())
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(text, chunks[1]);

        let board = Paragraph::new(self.board_lines())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Rgb(0x63, 0x66, 0xf1))),
            );
        frame.render_widget(board, chunks[2]);

        let help = Paragraph::new("Enter: Next | 1-4: Slide tile | Esc: Levels | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, progress))]
    fn handle_key(&mut self, key: KeyEvent, progress: &Progress) -> ScreenTransition {
        match key.code {
            KeyCode::Enter => {
                if self.tutorial.is_finished() {
                    self.maybe_finish(progress);
                    return ScreenTransition::GoToLevelSelect;
                }
                self.tutorial.advance();
                self.maybe_finish(progress);
                ScreenTransition::Stay
            }
            KeyCode::Char(ch @ '1'..='4') => {
                let index = ch as usize - '1' as usize;
                if self.tutorial.try_move(index) {
                    self.maybe_finish(progress);
                } else {
                    debug!(index, "Tutorial move ignored");
                }
                ScreenTransition::Stay
            }
            KeyCode::Esc => ScreenTransition::GoToLevelSelect,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
