use crate::consts;
use crate::game::{Difficulty, Grid, Notification};
use ratatui::layout::Size;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Board size and default difficulty
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Which events ring the terminal bell
    #[serde(default)]
    pub(crate) sound: SoundConfig,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(consts::APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the path of the file in which the difficulty & high score are
    /// stored: the file given in the configuration or, if that is not set,
    /// the default data file path.  Return `None` if no path is configured
    /// and the default could not be computed.
    pub(crate) fn data_file(&self) -> Option<PathBuf> {
        self.files
            .data_file
            .clone()
            .or_else(|| data_dir().map(|p| p.join("data.json")))
    }

    /// Return the path of the log file, defaulting like
    /// [`Config::data_file()`]
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| data_dir().map(|p| p.join("snake-arcade.log")))
    }
}

fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(consts::APP_DIR_NAME))
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// The playing field, derived from the configured canvas size
    pub(crate) grid: Grid,

    /// Difficulty to use when none has been saved yet
    pub(crate) default_difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid: Grid::from_canvas(RawGameConfig::default().canvas()),
            default_difficulty: Difficulty::default(),
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    canvas_width: u16,
    canvas_height: u16,
    default_difficulty: Difficulty,
}

impl RawGameConfig {
    fn canvas(&self) -> Size {
        Size {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            canvas_width: 600,
            canvas_height: 360,
            default_difficulty: Difficulty::default(),
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GridSizeError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, GridSizeError> {
        let canvas = value.canvas();
        let grid = Grid::from_canvas(canvas);
        if (consts::MIN_GRID_WIDTH..=consts::MAX_GRID_WIDTH).contains(&grid.width())
            && (consts::MIN_GRID_HEIGHT..=consts::MAX_GRID_HEIGHT).contains(&grid.height())
        {
            Ok(GameConfig {
                grid,
                default_difficulty: value.default_difficulty,
            })
        } else {
            Err(GridSizeError { canvas, grid })
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error(
    "canvas of {}x{} units makes a grid of {}x{} cells, but the grid must be {}-{} cells wide and {}-{} cells high",
    .canvas.width,
    .canvas.height,
    .grid.width(),
    .grid.height(),
    consts::MIN_GRID_WIDTH,
    consts::MAX_GRID_WIDTH,
    consts::MIN_GRID_HEIGHT,
    consts::MAX_GRID_HEIGHT
)]
pub(crate) struct GridSizeError {
    canvas: Size,
    grid: Grid,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the difficulty & high score should be stored
    pub(crate) data_file: Option<PathBuf>,

    /// Whether to load & save the difficulty & high score in a file
    pub(crate) save_data: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            data_file: None,
            save_data: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct SoundConfig {
    /// Whether to ring the terminal bell at all
    pub(crate) bell: bool,

    /// The events to ring it for
    pub(crate) events: Vec<Notification>,
}

impl SoundConfig {
    /// The events that should actually ring the bell
    pub(crate) fn enabled_events(&self) -> Vec<Notification> {
        if self.bell {
            self.events.clone()
        } else {
            Vec::new()
        }
    }
}

impl Default for SoundConfig {
    fn default() -> SoundConfig {
        SoundConfig {
            bell: true,
            events: vec![
                Notification::CrossedMilestone,
                Notification::BeatHighScore,
                Notification::AteBonus,
                Notification::GameOver,
            ],
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    pub(crate) enabled: bool,
    pub(crate) file: Option<PathBuf>,
    /// A `tracing-subscriber` filter directive
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        let raw = RawLogConfig::default();
        LogConfig {
            enabled: raw.enabled,
            file: raw.file,
            level: raw.level,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLogConfig {
    enabled: bool,
    file: Option<PathBuf>,
    level: String,
}

impl Default for RawLogConfig {
    fn default() -> RawLogConfig {
        RawLogConfig {
            enabled: true,
            file: None,
            level: String::from("info"),
        }
    }
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = tracing_subscriber::filter::ParseError;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, Self::Error> {
        let _ = EnvFilter::try_new(&value.level)?;
        Ok(LogConfig {
            enabled: value.enabled,
            file: value.file,
            level: value.level,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
