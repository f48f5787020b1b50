//! # bundle-cli: Bundle Builder Front End
//!
//! Composition root for the bundle builder. Loads configuration, builds the
//! engine, subscribes a renderer and feeds it one command per input line.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. init_tracing()         RUST_LOG or the format default, to stderr    │
//! │  2. AppConfig::load()      defaults → TOML file → BUNDLE_* env          │
//! │  3. build_engine()         catalog + settings validated                 │
//! │  4. Session::new()         renderer subscribed to the engine            │
//! │  5. Session::start()       preselected products applied, first render   │
//! │  6. run_script()           one command per line until EOF or `quit`     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutation output goes to stdout; line errors go to stderr. Line errors
//! never change the exit status.

pub mod command;
pub mod config;
pub mod error;
pub mod session;
pub mod view;

use std::io::{BufRead, IsTerminal, Write};

use tracing_subscriber::EnvFilter;

pub use command::Command;
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode, ErrorReport};
pub use session::{Flow, RunStats, Session};
pub use view::{OutputFormat, View};

const DEFAULT_LOG_FILTER: &str = "warn,bundle=info";

/// Quieter default for `--json`, where stderr carries one error report per line.
const JSON_LOG_FILTER: &str = "error";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command and override
/// - `RUST_LOG=bundle_core=trace` - Engine internals only
/// - Default: warnings plus info from the bundle crates, or errors only
///   with `--json`
///
/// Logs always go to stderr so stdout stays parseable. Colour is used only
/// when stderr is a terminal.
pub fn init_tracing(format: OutputFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(format)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => DEFAULT_LOG_FILTER,
        OutputFormat::Json => JSON_LOG_FILTER,
    }
}

/// Builds a session from `config` and runs `input` through it.
pub fn run<R, W, E>(
    config: &AppConfig,
    format: OutputFormat,
    input: R,
    output: W,
    errors: E,
) -> AppResult<RunStats>
where
    R: BufRead,
    W: Write + 'static,
    E: Write,
{
    let engine = config.build_engine()?;
    let view = View::new(engine.catalog().clone(), config.currency_symbol.clone(), format);

    let mut session = Session::new(engine, view, output, errors);
    session.start();
    session.run_script(input)
}
