//! Assorted constants & hard-coded configuration
use crate::game::{Position, Speed};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Name of the per-user directories holding the configuration, data, and log
/// files
pub(crate) const APP_DIR_NAME: &str = "snake-arcade";

/// Environment variable that overrides the configured log filter
pub(crate) const LOG_ENV_VAR: &str = "SNAKE_ARCADE_LOG";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Size of one grid cell in canvas units
pub(crate) const CELL_SIZE: u16 = 20;

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_COLUMNS: u16 = 2;

/// Smallest permitted grid width, in cells
pub(crate) const MIN_GRID_WIDTH: u16 = 12;

/// Largest grid width, in cells, that fits in [`DISPLAY_SIZE`]
pub(crate) const MAX_GRID_WIDTH: u16 = 39;

/// Smallest permitted grid height, in cells
pub(crate) const MIN_GRID_HEIGHT: u16 = 12;

/// Largest grid height, in cells, that fits in [`DISPLAY_SIZE`] along with the
/// score bar, the bonus timer, and the two message lines
pub(crate) const MAX_GRID_HEIGHT: u16 = 18;

/// Cell in which the snake's head starts every run
pub(crate) const SNAKE_ORIGIN: Position = Position::new(10, 10);

/// Maximum number of pending direction changes
pub(crate) const DIRECTION_QUEUE_DEPTH: usize = 3;

/// Points for eating a regular piece of food
pub(crate) const FOOD_REWARD: u32 = 10;

/// A milestone notification fires whenever the score crosses a multiple of
/// this
pub(crate) const MILESTONE_INTERVAL: u32 = 100;

/// The snake speeds up whenever eating food makes the score cross a multiple
/// of this
pub(crate) const SPEED_UP_INTERVAL: u32 = 50;

/// Upper bound on the snake's speed
pub(crate) const MAX_SPEED: Speed = Speed::from_tenths(150);

/// Number of random placements tried before falling back to scanning every
/// cell of the grid for a place to put food
pub(crate) const SPAWN_ATTEMPTS: u32 = 64;

/// How long bonus food stays on the board
pub(crate) const BONUS_LIFETIME: Duration = Duration::from_secs(10);

/// Points for bonus food eaten immediately after it appears
pub(crate) const BONUS_MAX_VALUE: u32 = 100;

/// Points for bonus food eaten just before it expires
pub(crate) const BONUS_MIN_VALUE: u32 = 10;

/// Bonus values are always a multiple of this
pub(crate) const BONUS_VALUE_STEP: u32 = 10;

/// Display size of freshly-spawned bonus food
pub(crate) const BONUS_MAX_SIZE: f64 = 30.0;

/// Display size of bonus food about to expire
pub(crate) const BONUS_MIN_SIZE: f64 = 10.0;

/// Bonus food at least this big is drawn with [`BONUS_LARGE_SYMBOL`]
pub(crate) const BONUS_LARGE_SIZE: f64 = 20.0;

/// Chance of bonus food appearing each time the bonus interval elapses
pub(crate) const BONUS_SPAWN_PROBABILITY: f64 = 0.15;

/// Time between render frames (roughly 60 per second)
pub(crate) const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Number of render frames the game-over animation lasts
pub(crate) const GAME_OVER_FRAMES: u32 = 50;

/// The board border flashes during this many frames at the start of the
/// game-over animation
pub(crate) const GAME_OVER_FLASH_FRAMES: u32 = 35;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head before it has started moving
pub(crate) const SNAKE_HEAD_STILL_SYMBOL: char = '@';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '■';

/// Glyph for regular food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for fresh bonus food
pub(crate) const BONUS_LARGE_SYMBOL: char = '◉';

/// Glyph for shrunken bonus food
pub(crate) const BONUS_SMALL_SYMBOL: char = '•';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Glyph making up the bonus countdown bar
pub(crate) const BONUS_TIMER_SYMBOL: char = '━';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for regular food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for bonus food
pub(crate) const BONUS_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for the bonus countdown bar
pub(crate) const BONUS_TIMER_STYLE: Style = Style::new().fg(Color::LightBlue);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the board border while the game-over animation flashes
pub(crate) const FLASH_STYLE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the title on the main menu
pub(crate) const TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
