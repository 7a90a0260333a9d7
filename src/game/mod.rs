mod bonus;
mod difficulty;
mod direction;
mod food;
mod grid;
mod notify;
mod paused;
mod render;
mod scheduler;
mod simulation;
mod snake;
pub(crate) use self::difficulty::{Difficulty, Speed};
pub(crate) use self::grid::{Grid, Position};
pub(crate) use self::notify::Notification;
use self::direction::Direction;
use self::notify::{Bell, NotificationSink};
use self::paused::{PauseOpt, Paused};
use self::scheduler::{GameState, Scheduler, SchedulerError};
use crate::app::Screen;
use crate::command::Command;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    widgets::Widget,
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: the board plus the pause menu
#[derive(Debug)]
pub(crate) struct Game<R = ThreadRng, S = Bell> {
    scheduler: Scheduler<R>,
    sink: S,
    globals: Globals,
    /// `Some` while the game is paused
    paused: Option<Paused>,
}

impl Game<ThreadRng, Bell> {
    pub(crate) fn new(globals: Globals) -> Self {
        let sink = Bell::new(globals.config.sound.enabled_events());
        Game::new_with_parts(globals, rand::rng(), sink)
    }
}

impl<R: Rng, S: NotificationSink> Game<R, S> {
    pub(crate) fn new_with_parts(globals: Globals, rng: R, sink: S) -> Game<R, S> {
        let scheduler = Scheduler::new_with_rng(
            globals.config.game.grid,
            globals.settings.difficulty(),
            globals.settings.high_score(),
            rng,
        );
        Game {
            scheduler,
            sink,
            globals,
            paused: None,
        }
    }

    /// Wait for either input or the scheduler's next deadline, whichever
    /// comes first, and handle it.  Returns once there is something new to
    /// draw.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        loop {
            let Some(deadline) = self.scheduler.next_deadline() else {
                return Ok(self.handle_event(read()?));
            };
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                if self.advance(Instant::now()) {
                    return Ok(None);
                }
            } else {
                return Ok(self.handle_event(read()?));
            }
        }
    }

    /// Run the scheduler's due tasks.  Returns `true` if the screen should be
    /// redrawn.
    fn advance(&mut self, now: Instant) -> bool {
        let p = self.scheduler.poll(now, &mut self.sink);
        if let Some(score) = p.high_score {
            self.globals.settings.set_high_score(score);
        }
        p.redraw
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let now = Instant::now();
        if let Some(ref mut paused) = self.paused {
            match paused.handle_event(event)? {
                PauseOpt::Resume => {
                    self.paused = None;
                    report(self.scheduler.resume(now));
                }
                PauseOpt::Restart => {
                    self.paused = None;
                    report(self.scheduler.restart(now));
                }
                PauseOpt::Difficulty => {
                    let difficulty = paused.difficulty();
                    report(self.scheduler.select_difficulty(difficulty));
                    self.globals.settings.set_difficulty(difficulty);
                }
                PauseOpt::MainMenu => return Some(self.main_menu()),
                PauseOpt::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        if event == Event::FocusLost {
            if self.scheduler.state() == GameState::Running {
                self.pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match (self.scheduler.state(), cmd) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (GameState::Running, Command::Up) => self.turn(Direction::Up),
            (GameState::Running, Command::Down) => self.turn(Direction::Down),
            (GameState::Running, Command::Left) => self.turn(Direction::Left),
            (GameState::Running, Command::Right) => self.turn(Direction::Right),
            (GameState::Running, Command::Esc | Command::P) => self.pause(),
            (GameState::Idle, Command::Enter) | (GameState::GameOver, Command::Enter | Command::R) => {
                report(self.scheduler.confirm(now));
            }
            (GameState::Idle | GameState::GameOverAnimating | GameState::GameOver, Command::M) => {
                return Some(self.main_menu())
            }
            (GameState::Idle | GameState::GameOverAnimating | GameState::GameOver, Command::Q) => {
                return Some(Screen::Quit)
            }
            _ => (),
        }
        None
    }

    fn turn(&mut self, dir: Direction) {
        report(self.scheduler.queue_direction(dir));
    }

    fn pause(&mut self) {
        report(self.scheduler.pause());
        if self.scheduler.state() == GameState::Paused {
            self.paused = Some(Paused::new(self.scheduler.selected_difficulty()));
        }
    }

    fn main_menu(&self) -> Screen {
        Screen::Main(MainMenu::new(self.globals.clone()))
    }
}

impl<R, S> Game<R, S> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }
}

/// Log a rejected scheduler command
fn report(r: Result<(), SchedulerError>) {
    if let Err(e) = r {
        tracing::warn!("{e}");
    }
}

impl<R, S> Widget for &Game<R, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        self.scheduler.snapshot().render(display, buf);
        if let Some(paused) = self.paused {
            let pause_area = center_rect(
                display,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            paused.render(pause_area, buf);
        }
    }
}
