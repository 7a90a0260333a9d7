mod widgets;
use self::widgets::{Instructions, Title};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::{Difficulty, Game};
use crate::util::{difficulty_picker, get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        MainMenu {
            selection: Selection::min(),
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit | Command::Q) | (Selection::QuitButton, Command::Enter) => {
                return Some(Screen::Quit)
            }
            (_, Command::P) | (Selection::PlayButton, Command::Enter) => {
                return Some(Screen::Game(Box::new(Game::new(self.globals.clone()))))
            }
            (_, Command::R) | (Selection::HighScore, Command::Enter) => self.reset_high_score(),
            (Selection::Difficulty, Command::Left) => {
                if let Some(d) = self.globals.settings.difficulty().prev() {
                    self.globals.settings.set_difficulty(d);
                }
            }
            (Selection::Difficulty, Command::Right) => {
                if let Some(d) = self.globals.settings.difficulty().next() {
                    self.globals.settings.set_difficulty(d);
                }
            }
            (_, Command::Up) => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            (_, Command::Down) => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            (_, Command::Next) => self.selection = self.selection.next().unwrap_or_else(Selection::min),
            (_, Command::Prev) => self.selection = self.selection.prev().unwrap_or_else(Selection::max),
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            _ => (),
        }
        None
    }

    fn reset_high_score(&mut self) {
        self.globals.settings.reset_high_score();
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, instructions_area, play_area, settings_area, quit_area] =
            Layout::vertical([1, Instructions::HEIGHT, 1, SettingsBox::HEIGHT, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        Title.render(title_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [settings_area] = Layout::horizontal([SettingsBox::WIDTH])
            .flex(Flex::Center)
            .areas(settings_area);
        SettingsBox {
            selection: self.selection,
            high_score: self.globals.settings.high_score(),
            difficulty: self.globals.settings.difficulty(),
        }
        .render(settings_area, buf);

        button("Quit", "q", self.selection == Selection::QuitButton).render(quit_area, buf);
    }
}

fn button(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let style = selection_style(selected);
    Line::from_iter([
        Span::styled(format!("[{label} ("), style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

fn selection_style(selected: bool) -> Style {
    if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum Selection {
    PlayButton,
    Difficulty,
    HighScore,
    QuitButton,
}

/// The bordered box holding the difficulty picker and the high score
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct SettingsBox {
    selection: Selection,
    high_score: u32,
    difficulty: Difficulty,
}

impl SettingsBox {
    const HEIGHT: u16 = 2 + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_WIDTH: u16 = 10;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const VALUE_WIDTH: u16 = 18;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + Self::LABEL_WIDTH + Self::LABEL_VALUE_GUTTER + Self::VALUE_WIDTH;

    fn row(&self, key: Selection, label: &str, value: Vec<Span<'static>>) -> Line<'static> {
        let selected = key == self.selection;
        let mut line = Line::from(format!(
            "{pointer:pwidth$}{label:lwidth$}{space:gutter$}",
            pointer = if selected { "»" } else { "" },
            pwidth = usize::from(Self::POINTER_WIDTH),
            lwidth = usize::from(Self::LABEL_WIDTH),
            space = "",
            gutter = usize::from(Self::LABEL_VALUE_GUTTER),
        ));
        for span in value {
            line.push_span(span);
        }
        line.style(selection_style(selected))
    }
}

impl Widget for SettingsBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Settings: ")
            .padding(Padding::horizontal(Self::HORIZONTAL_PADDING));
        let inner = block.inner(area);
        block.render(area, buf);
        let [difficulty_row, score_row] = Layout::vertical([1, 1]).areas(inner);
        self.row(
            Selection::Difficulty,
            "Difficulty",
            vec![Span::raw(difficulty_picker(self.difficulty))],
        )
        .render(difficulty_row, buf);
        self.row(
            Selection::HighScore,
            "High Score",
            vec![
                Span::raw(format!("{:<5} [Reset (", self.high_score)),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(")]"),
            ],
        )
        .render(score_row, buf);
    }
}
