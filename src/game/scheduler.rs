use super::difficulty::{Difficulty, DifficultySelection};
use super::direction::Direction;
use super::food::SpawnExhausted;
use super::grid::Grid;
use super::notify::{deliver, Notification, NotificationSink};
use super::render::Snapshot;
use super::simulation::{Collision, Simulation};
use crate::consts;
use rand::{rngs::ThreadRng, Rng};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Runs a [`Simulation`] on two clocks: a logic task that advances the game
/// at the snake's current speed and a render task that fires once per display
/// frame.  Also owns the game's state machine.
///
/// Time is passed in by the caller, so nothing here ever sleeps or reads the
/// clock.
#[derive(Clone, Debug)]
pub(crate) struct Scheduler<R = ThreadRng> {
    rng: R,
    sim: Simulation,
    selection: DifficultySelection,
    state: GameState,
    logic: RepeatingTask,
    render: RepeatingTask,
    /// When the last frame ran, for measuring how much time bonus food has
    /// been on the board
    last_frame: Option<Instant>,
    game_over_frame: u32,
    run_end: Option<RunEnd>,
}

impl Scheduler<ThreadRng> {
    pub(crate) fn new(grid: Grid, difficulty: Difficulty, high_score: u32) -> Self {
        Scheduler::new_with_rng(grid, difficulty, high_score, rand::rng())
    }
}

impl<R: Rng> Scheduler<R> {
    pub(crate) fn new_with_rng(
        grid: Grid,
        difficulty: Difficulty,
        high_score: u32,
        rng: R,
    ) -> Scheduler<R> {
        let sim = Simulation::new(grid, difficulty, high_score);
        let logic = RepeatingTask::new(sim.speed().interval());
        Scheduler {
            rng,
            sim,
            selection: DifficultySelection::new(difficulty),
            state: GameState::Idle,
            logic,
            render: RepeatingTask::new(consts::FRAME_PERIOD),
            last_frame: None,
            game_over_frame: 0,
            run_end: None,
        }
    }

    /// Begin a new run
    ///
    /// # Errors
    ///
    /// Returns `Err` if not idle or over, or if there is nowhere to put the
    /// food.
    pub(crate) fn start(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.check(Action::Start, &[GameState::Idle, GameState::GameOver])?;
        self.logic.stop();
        self.render.stop();
        let _ = self.selection.reconcile();
        self.sim.reset(self.selection.in_effect());
        self.sim.ensure_food(&mut self.rng)?;
        self.run_end = None;
        self.game_over_frame = 0;
        self.run(now);
        tracing::info!(
            difficulty = %self.sim.difficulty(),
            speed = %self.sim.speed(),
            high_score = self.sim.high_score(),
            "Starting new game"
        );
        Ok(())
    }

    /// Start a new run if the game is idle or over
    ///
    /// # Errors
    ///
    /// Same as [`Scheduler::start()`]
    pub(crate) fn confirm(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.check(Action::Confirm, &[GameState::Idle, GameState::GameOver])?;
        self.start(now)
    }

    /// # Errors
    ///
    /// Returns `Err` if the game is not running.
    pub(crate) fn pause(&mut self) -> Result<(), SchedulerError> {
        self.check(Action::Pause, &[GameState::Running])?;
        self.logic.stop();
        self.render.stop();
        self.last_frame = None;
        self.state = GameState::Paused;
        tracing::debug!(score = self.sim.score(), "Game paused");
        Ok(())
    }

    /// Abandon a paused run and begin a new one
    ///
    /// # Errors
    ///
    /// Returns `Err` if the game is not paused, or if there is nowhere to put
    /// the food.  In the latter case the game is left idle.
    pub(crate) fn restart(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.check(Action::Restart, &[GameState::Paused])?;
        tracing::info!(score = self.sim.score(), "Abandoning game");
        self.state = GameState::Idle;
        self.start(now)
    }

    /// Continue a paused run, first switching it to the selected difficulty
    /// if that was changed while paused
    ///
    /// # Errors
    ///
    /// Returns `Err` if the game is not paused.
    pub(crate) fn resume(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.check(Action::Resume, &[GameState::Paused])?;
        if let Some(difficulty) = self.selection.reconcile() {
            let _ = self.sim.set_difficulty(difficulty);
        }
        self.run(now);
        tracing::debug!("Game resumed");
        Ok(())
    }

    /// Choose the difficulty.  While paused, the change is only applied on
    /// resumption; when there is no run in progress, it applies to the next
    /// run.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a run is in progress and not paused.
    pub(crate) fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SchedulerError> {
        match self.state {
            GameState::Idle | GameState::GameOver => self.selection.apply(difficulty),
            GameState::Paused => self.selection.select(difficulty),
            state @ (GameState::Running | GameState::GameOverAnimating) => {
                return Err(SchedulerError::InvalidTransition {
                    action: Action::SelectDifficulty,
                    state,
                })
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `Err` if the game is not running.
    pub(crate) fn queue_direction(&mut self, dir: Direction) -> Result<(), SchedulerError> {
        self.check(Action::Turn, &[GameState::Running])?;
        self.sim.queue_direction(dir);
        Ok(())
    }

    /// Run whichever tasks are due at `now`, logic tick first
    pub(crate) fn poll(&mut self, now: Instant, sink: &mut dyn NotificationSink) -> Poll {
        let mut poll = Poll::default();
        if self.logic.fire(now) {
            self.logic_tick(now, sink, &mut poll);
        }
        if self.render.fire(now) {
            self.frame(now);
            poll.redraw = true;
        }
        poll
    }

    fn logic_tick(&mut self, now: Instant, sink: &mut dyn NotificationSink, poll: &mut Poll) {
        poll.redraw = true;
        let report = self.sim.tick(&mut self.rng);
        for event in report.notifications {
            deliver(sink, event);
        }
        if report.high_score_changed {
            poll.high_score = Some(self.sim.high_score());
        }
        let end = match (report.collision, report.exhausted) {
            (Some(collision), _) => Some(RunEnd::Collided(collision)),
            (None, Some(_)) => Some(RunEnd::Exhausted),
            (None, None) => None,
        };
        if let Some(end) = end {
            self.end_run(end, sink);
            poll.ended = true;
        } else if report.speed_changed {
            self.logic.restart(now, self.sim.speed().interval());
        }
    }

    fn end_run(&mut self, end: RunEnd, sink: &mut dyn NotificationSink) {
        tracing::info!(
            score = self.sim.score(),
            length = self.sim.snake().len(),
            ?end,
            "Game over"
        );
        self.logic.stop();
        self.sim.clear_queue();
        self.state = GameState::GameOverAnimating;
        self.run_end = Some(end);
        self.game_over_frame = 0;
        deliver(sink, Notification::GameOver);
    }
}

impl<R> Scheduler<R> {
    fn check(&self, action: Action, valid: &[GameState]) -> Result<(), SchedulerError> {
        if valid.contains(&self.state) {
            Ok(())
        } else {
            Err(SchedulerError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn run(&mut self, now: Instant) {
        self.logic.restart(now, self.sim.speed().interval());
        self.render.start(now);
        self.last_frame = Some(now);
        self.state = GameState::Running;
    }

    fn frame(&mut self, now: Instant) {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |then| now.saturating_duration_since(then));
        self.last_frame = Some(now);
        match self.state {
            GameState::Running => self.sim.decay_bonus(elapsed),
            GameState::GameOverAnimating => {
                self.game_over_frame = self.game_over_frame.saturating_add(1);
                if self.game_over_frame >= consts::GAME_OVER_FRAMES {
                    self.render.stop();
                    self.last_frame = None;
                    self.state = GameState::GameOver;
                }
            }
            GameState::Idle | GameState::Paused | GameState::GameOver => (),
        }
    }

    /// The earliest time at which a task will be due, or `None` if neither
    /// task is running
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (self.logic.deadline(), self.render.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// The difficulty the player has chosen, which may not be in effect yet
    pub(crate) fn selected_difficulty(&self) -> Difficulty {
        self.selection.selected()
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.sim.grid(),
            snake: self.sim.snake(),
            velocity: self.sim.velocity(),
            food: self.sim.food(),
            bonus: self.sim.bonus().active().copied(),
            score: self.sim.score(),
            high_score: self.sim.high_score(),
            difficulty: self.selection.selected(),
            speed: self.sim.speed(),
            state: self.state,
            run_end: self.run_end,
            game_over_frame: self.game_over_frame,
        }
    }
}

/// What a call to [`Scheduler::poll()`] did
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Poll {
    /// Something changed that should be drawn
    pub(crate) redraw: bool,

    /// The new high score, if it changed
    pub(crate) high_score: Option<u32>,

    /// The run ended
    pub(crate) ended: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    /// No run has been started yet
    Idle,
    Running,
    Paused,
    /// The run has ended, and the game-over animation is playing
    GameOverAnimating,
    /// The run has ended and the animation has finished
    GameOver,
}

impl GameState {
    fn as_str(self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::GameOverAnimating => "animating the end of a game",
            GameState::GameOver => "over",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How a run came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RunEnd {
    Collided(Collision),
    /// The snake filled up the board so that there was nowhere left to put
    /// food
    Exhausted,
}

/// The commands that a [`Scheduler`] accepts
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    Start,
    Confirm,
    Pause,
    Resume,
    Restart,
    SelectDifficulty,
    Turn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Start => "start",
            Action::Confirm => "confirm",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Restart => "restart",
            Action::SelectDifficulty => "change difficulty",
            Action::Turn => "turn",
        };
        f.pad(s)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SchedulerError {
    #[error("cannot {action} while game is {state}")]
    InvalidTransition { action: Action, state: GameState },
    #[error(transparent)]
    SpawnExhausted(#[from] SpawnExhausted),
}

/// A cancellable task that should run once every `period`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RepeatingTask {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    pub(crate) fn new(period: Duration) -> RepeatingTask {
        RepeatingTask {
            period,
            next_due: None,
        }
    }

    /// Start running one period from `now`
    pub(crate) fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Change the period and start over from `now`
    pub(crate) fn restart(&mut self, now: Instant, period: Duration) {
        self.period = period;
        self.start(now);
    }

    /// Stop running.  Stopping a stopped task does nothing.
    pub(crate) fn stop(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// If the task is due at `now`, schedule its next run and return `true`.
    /// A task that has fallen more than a period behind skips the runs it
    /// missed.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SNAKE_ORIGIN;
    use crate::game::difficulty::Speed;
    use crate::game::grid::Position;
    use crate::game::notify::testing::{Broken, Recorder};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn scheduler(difficulty: Difficulty) -> Scheduler<ChaCha12Rng> {
        Scheduler::new_with_rng(
            Grid::new(30, 18),
            difficulty,
            0,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    /// Poll the scheduler at the moment the next logic tick is due
    fn tick(sched: &mut Scheduler<ChaCha12Rng>, sink: &mut dyn NotificationSink) -> Poll {
        let due = sched
            .logic
            .deadline()
            .expect("logic task should be running");
        sched.poll(due, sink)
    }

    #[test]
    fn start_then_tick() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        assert_eq!(sched.state(), GameState::Idle);
        assert_eq!(sched.next_deadline(), None);
        sched.start(now).unwrap();
        assert_eq!(sched.state(), GameState::Running);
        assert_eq!(sched.simulation().snake().head(), SNAKE_ORIGIN);
        assert_eq!(
            sched.logic.deadline(),
            Some(now + Speed::from_tenths(70).interval())
        );
        assert_eq!(sched.next_deadline(), Some(now + consts::FRAME_PERIOD));
        let food = sched.simulation().food().unwrap();
        assert!(food.chebyshev(SNAKE_ORIGIN) > 1);

        let mut sink = Recorder::default();
        let poll = tick(&mut sched, &mut sink);
        assert!(poll.redraw);
        assert!(!poll.ended);
        assert_eq!(
            sched.simulation().snake().head(),
            Position::new(SNAKE_ORIGIN.x + 1, SNAKE_ORIGIN.y)
        );
        assert_eq!(sched.simulation().snake().len(), 1);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn frames_do_not_move_the_snake() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        sched.start(now).unwrap();
        let mut sink = Recorder::default();
        let poll = sched.poll(now + consts::FRAME_PERIOD, &mut sink);
        assert!(poll.redraw);
        assert_eq!(sched.simulation().snake().head(), SNAKE_ORIGIN);
        let poll = sched.poll(now + consts::FRAME_PERIOD, &mut sink);
        assert_eq!(poll, Poll::default());
    }

    #[test]
    fn wall_collision_after_width_minus_x_ticks() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Hard);
        sched.start(now).unwrap();
        let mut sink = Recorder::default();
        let ticks = 30 - SNAKE_ORIGIN.x;
        for _ in 1..ticks {
            let poll = tick(&mut sched, &mut sink);
            assert!(!poll.ended);
            assert_eq!(sched.state(), GameState::Running);
        }
        let poll = tick(&mut sched, &mut sink);
        assert!(poll.ended);
        assert_eq!(sched.state(), GameState::GameOverAnimating);
        assert_eq!(
            sched.snapshot().run_end,
            Some(RunEnd::Collided(Collision::Wall))
        );
        assert_eq!(sink.0.last(), Some(&Notification::GameOver));
        assert!(!sched.logic.is_running());
        assert!(sched.render.is_running());
    }

    #[test]
    fn filling_the_board_ends_the_run() {
        let now = Instant::now();
        let mut sched = Scheduler::new_with_rng(
            Grid::new(7, 7),
            Difficulty::Normal,
            0,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        sched.start(now).unwrap();
        sched.sim.set_snake(&[
            (4, 1),
            (3, 1),
            (2, 1),
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 4),
            (3, 4),
            (4, 4),
            (5, 4),
        ]);
        sched.sim.set_food(Position::new(5, 1));
        let mut sink = Recorder::default();
        let poll = tick(&mut sched, &mut sink);
        assert!(poll.ended);
        assert_eq!(poll.high_score, Some(10));
        assert_eq!(sched.state(), GameState::GameOverAnimating);
        assert_eq!(sched.snapshot().run_end, Some(RunEnd::Exhausted));
        assert_eq!(sched.simulation().score(), 10);
        assert_eq!(
            sink.0,
            [
                Notification::AteFood,
                Notification::BeatHighScore,
                Notification::GameOver
            ]
        );
        assert!(!sched.logic.is_running());
        assert!(sched.render.is_running());
    }

    fn run_into_wall(sched: &mut Scheduler<ChaCha12Rng>, sink: &mut dyn NotificationSink) {
        while sched.state() == GameState::Running {
            let _ = tick(sched, sink);
        }
    }

    #[test]
    fn game_over_animation() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        sched.start(now).unwrap();
        let mut sink = Recorder::default();
        run_into_wall(&mut sched, &mut sink);
        assert_eq!(sched.state(), GameState::GameOverAnimating);
        assert_eq!(
            sink.0
                .iter()
                .filter(|&&ev| ev == Notification::GameOver)
                .count(),
            1
        );
        let mut frames = 0;
        while sched.state() == GameState::GameOverAnimating {
            let due = sched
                .next_deadline()
                .expect("render task should be running");
            let _ = sched.poll(due, &mut sink);
            frames += 1;
            assert!(frames <= consts::GAME_OVER_FRAMES, "animation never ended");
        }
        assert_eq!(sched.state(), GameState::GameOver);
        assert_eq!(sched.snapshot().game_over_frame, consts::GAME_OVER_FRAMES);
        assert_eq!(sched.next_deadline(), None);
        assert!(matches!(
            sched.queue_direction(Direction::Up),
            Err(SchedulerError::InvalidTransition { .. })
        ));

        let later = Instant::now() + Duration::from_secs(60);
        sched.confirm(later).unwrap();
        assert_eq!(sched.state(), GameState::Running);
        assert_eq!(sched.simulation().score(), 0);
        assert_eq!(sched.simulation().snake().head(), SNAKE_ORIGIN);
        assert_eq!(sched.snapshot().run_end, None);
        assert_eq!(sched.snapshot().game_over_frame, 0);
    }

    #[test]
    fn broken_sink_is_tolerated() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        sched.start(now).unwrap();
        let mut sink = Broken;
        run_into_wall(&mut sched, &mut sink);
        assert_eq!(sched.state(), GameState::GameOverAnimating);
    }

    #[test]
    fn invalid_transitions() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        assert_eq!(
            sched.pause(),
            Err(SchedulerError::InvalidTransition {
                action: Action::Pause,
                state: GameState::Idle
            })
        );
        assert_eq!(
            sched.resume(now),
            Err(SchedulerError::InvalidTransition {
                action: Action::Resume,
                state: GameState::Idle
            })
        );
        sched.start(now).unwrap();
        assert_eq!(
            sched.start(now),
            Err(SchedulerError::InvalidTransition {
                action: Action::Start,
                state: GameState::Running
            })
        );
        assert_eq!(
            sched.select_difficulty(Difficulty::Hard),
            Err(SchedulerError::InvalidTransition {
                action: Action::SelectDifficulty,
                state: GameState::Running
            })
        );
        sched.pause().unwrap();
        assert_eq!(
            sched.pause(),
            Err(SchedulerError::InvalidTransition {
                action: Action::Pause,
                state: GameState::Paused
            })
        );
        assert_eq!(
            sched.queue_direction(Direction::Up),
            Err(SchedulerError::InvalidTransition {
                action: Action::Turn,
                state: GameState::Paused
            })
        );
        assert_eq!(sched.state(), GameState::Paused);
    }

    #[test]
    fn error_message() {
        let e = SchedulerError::InvalidTransition {
            action: Action::Resume,
            state: GameState::Running,
        };
        assert_eq!(e.to_string(), "cannot resume while game is running");
    }

    #[test]
    fn pause_and_resume() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        sched.start(now).unwrap();
        let mut sink = Recorder::default();
        let _ = tick(&mut sched, &mut sink);
        let head = sched.simulation().snake().head();
        sched.pause().unwrap();
        assert_eq!(sched.state(), GameState::Paused);
        assert_eq!(sched.next_deadline(), None);
        let poll = sched.poll(now + Duration::from_secs(5), &mut sink);
        assert_eq!(poll, Poll::default());
        assert_eq!(sched.simulation().snake().head(), head);

        let later = now + Duration::from_secs(30);
        sched.resume(later).unwrap();
        assert_eq!(sched.state(), GameState::Running);
        assert_eq!(
            sched.logic.deadline(),
            Some(later + Speed::from_tenths(70).interval())
        );
        assert_eq!(sched.next_deadline(), Some(later + consts::FRAME_PERIOD));
        assert_eq!(sched.simulation().snake().head(), head);
    }

    #[test]
    fn difficulty_change_applies_on_resume() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Hard);
        sched.start(now).unwrap();
        sched.sim.set_score(120);
        sched.pause().unwrap();
        sched.select_difficulty(Difficulty::Normal).unwrap();
        assert_eq!(sched.selected_difficulty(), Difficulty::Normal);
        assert_eq!(sched.simulation().difficulty(), Difficulty::Hard);
        assert_eq!(sched.simulation().speed(), Speed::from_tenths(100));
        sched.resume(now).unwrap();
        assert_eq!(sched.simulation().difficulty(), Difficulty::Normal);
        assert_eq!(sched.simulation().speed(), Speed::from_tenths(90));
        assert_eq!(
            sched.logic.deadline(),
            Some(now + Speed::from_tenths(90).interval())
        );
    }

    #[test]
    fn difficulty_changed_back_while_paused() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Hard);
        sched.start(now).unwrap();
        sched.sim.set_score(120);
        sched.pause().unwrap();
        sched.select_difficulty(Difficulty::Easy).unwrap();
        sched.select_difficulty(Difficulty::Hard).unwrap();
        sched.resume(now).unwrap();
        assert_eq!(sched.simulation().speed(), Speed::from_tenths(100));
    }

    #[test]
    fn difficulty_before_start() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        sched.select_difficulty(Difficulty::Easy).unwrap();
        sched.start(now).unwrap();
        assert_eq!(sched.simulation().difficulty(), Difficulty::Easy);
        assert_eq!(sched.simulation().speed(), Speed::from_tenths(50));
    }

    #[test]
    fn restart_from_pause() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        assert_eq!(
            sched.restart(now),
            Err(SchedulerError::InvalidTransition {
                action: Action::Restart,
                state: GameState::Idle
            })
        );
        sched.start(now).unwrap();
        let mut sink = Recorder::default();
        let _ = tick(&mut sched, &mut sink);
        let _ = tick(&mut sched, &mut sink);
        sched.pause().unwrap();
        sched.select_difficulty(Difficulty::Easy).unwrap();
        let later = now + Duration::from_secs(10);
        sched.restart(later).unwrap();
        assert_eq!(sched.state(), GameState::Running);
        assert_eq!(sched.simulation().snake().head(), SNAKE_ORIGIN);
        assert_eq!(sched.simulation().score(), 0);
        assert_eq!(sched.simulation().difficulty(), Difficulty::Easy);
        assert_eq!(
            sched.logic.deadline(),
            Some(later + Speed::from_tenths(50).interval())
        );
    }

    #[test]
    fn queued_turn_applies_on_next_tick() {
        let now = Instant::now();
        let mut sched = scheduler(Difficulty::Normal);
        sched.start(now).unwrap();
        sched.queue_direction(Direction::Up).unwrap();
        let mut sink = Recorder::default();
        let _ = tick(&mut sched, &mut sink);
        assert_eq!(
            sched.simulation().snake().head(),
            Position::new(SNAKE_ORIGIN.x, SNAKE_ORIGIN.y - 1)
        );
    }

    #[test]
    fn task_fires_on_schedule() {
        let now = Instant::now();
        let period = Duration::from_millis(100);
        let mut task = RepeatingTask::new(period);
        assert!(!task.fire(now + period));
        task.start(now);
        assert!(!task.fire(now + Duration::from_millis(99)));
        assert!(task.fire(now + Duration::from_millis(130)));
        assert_eq!(task.deadline(), Some(now + Duration::from_millis(200)));
        assert!(!task.fire(now + Duration::from_millis(130)));
    }

    #[test]
    fn late_task_skips_missed_runs() {
        let now = Instant::now();
        let period = Duration::from_millis(100);
        let mut task = RepeatingTask::new(period);
        task.start(now);
        assert!(task.fire(now + Duration::from_millis(450)));
        assert_eq!(task.deadline(), Some(now + Duration::from_millis(550)));
    }

    #[test]
    fn stopping_twice() {
        let now = Instant::now();
        let mut task = RepeatingTask::new(Duration::from_millis(100));
        task.start(now);
        task.stop();
        task.stop();
        assert!(!task.is_running());
        assert!(!task.fire(now + Duration::from_secs(1)));
    }
}
