mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod menu;
mod store;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::util::Globals;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run { config })
    }
}

const USAGE: &str = "\
Usage: snake-arcade [-c|--config <FILE>]

Play snake in the terminal.

Options:
  -c, --config <FILE>   Read configuration from the given file
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

fn main() -> ExitCode {
    let invocation = match Invocation::from_parser(Parser::from_env()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("snake-arcade: {e}");
            eprintln!("Run `snake-arcade --help` for usage.");
            return ExitCode::from(2);
        }
    };
    match invocation {
        Invocation::Help => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Invocation::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Invocation::Run { config } => {
            let config = match load_config(config) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("snake-arcade: {e:?}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = logging::init(&config) {
                eprintln!("snake-arcade: warning: continuing without logging: {e:#}");
            }
            let globals = Globals::new(config);
            let terminal = ratatui::init();
            let r = execute!(io::stdout(), EnableFocusChange)
                .and_then(|()| App::new(globals).run(terminal));
            let _ = execute!(io::stdout(), DisableFocusChange);
            ratatui::restore();
            tracing::info!("Exiting");
            io_exit(r)
        }
    }
}

/// Load the configuration from `path`, or from the default location if
/// `path` is `None`.  Only a missing default file is tolerated.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let (path, allow_missing) = match path {
        Some(p) => (p, false),
        None => (Config::default_path()?, true),
    };
    Config::load(&path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "I/O error");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
