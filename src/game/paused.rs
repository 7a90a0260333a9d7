use super::difficulty::Difficulty;
use crate::command::Command;
use crate::consts;
use crate::util::{difficulty_picker, EnumExt, DIFFICULTY_PICKER_WIDTH};
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// A widget for displaying a pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// The currently-selected item in the pause menu
    selection: PauseOpt,

    /// The difficulty shown in the menu
    difficulty: Difficulty,
}

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = (PauseOpt::LENGTH as u16) + 2;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 2 /* border */ + 2 /* padding */ + 2 /* pointer */ + 11 + DIFFICULTY_PICKER_WIDTH;

    pub(super) fn new(difficulty: Difficulty) -> Paused {
        Paused {
            selection: PauseOpt::min(),
            difficulty,
        }
    }

    pub(super) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Handle an input event.  Returns `Some` if the user made a choice or
    /// changed the difficulty.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<PauseOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Esc | Command::P => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::M => return Some(PauseOpt::MainMenu),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter if self.selection != PauseOpt::Difficulty => {
                return Some(self.selection)
            }
            Command::Left if self.selection == PauseOpt::Difficulty => {
                let d = self.difficulty.prev()?;
                self.difficulty = d;
                return Some(PauseOpt::Difficulty);
            }
            Command::Right if self.selection == PauseOpt::Difficulty => {
                let d = self.difficulty.next()?;
                self.difficulty = d;
                return Some(PauseOpt::Difficulty);
            }
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => self.selection = PauseOpt::min(),
            Command::End => self.selection = PauseOpt::max(),
            _ => (),
        }
        None
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    /// Unpause/resume the game
    Resume,

    /// Start the game over
    Restart,

    /// The difficulty was changed; it takes effect on resumption
    Difficulty,

    /// Return to the main menu
    MainMenu,

    /// Quit the application
    Quit,
}

impl PauseOpt {
    fn to_line(self, selected: bool, difficulty: Difficulty) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        let (label, key) = match self {
            PauseOpt::Resume => ("Resume", "Esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::Difficulty => {
                line.push_span("Difficulty ");
                line.push_span(Span::styled(
                    difficulty_picker(difficulty),
                    consts::KEY_STYLE,
                ));
                return line.style(selection_style(selected));
            }
            PauseOpt::MainMenu => ("Main Menu", "m"),
            PauseOpt::Quit => ("Quit", "q"),
        };
        line.push_span(format!("{label} ("));
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(")");
        line.style(selection_style(selected))
    }
}

fn selection_style(selected: bool) -> Style {
    if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    }
}

impl Widget for Paused {
    /*
     * ┌──────── PAUSED ─────────┐
     * │ » Resume (Esc)          │
     * │   Restart (r)           │
     * │   Difficulty ◀ Normal ▶ │
     * │   Main Menu (m)         │
     * │   Quit (q)              │
     * └─────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt, self.difficulty)
                .render(row, buf);
        }
    }
}
