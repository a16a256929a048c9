//! Stderr logging for the command-line front end.

use colored::{Color, Colorize};
use log::{Level, LevelFilter};

/// Level implied by the verbosity flags.
#[must_use]
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Dispatcher filtered to `level`, with dependency noise capped at `Warn`.
pub fn base(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .level(level.min(LevelFilter::Warn))
        .level_for("usingsguard", level)
}

/// Formats records as `level: message` with a colored prefix on stderr.
pub fn stderr(base: fern::Dispatch) -> fern::Dispatch {
    base.format(move |out, message, record| {
        let level = record.level();
        let color = match level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Blue,
            Level::Debug => Color::Magenta,
            Level::Trace => Color::Green,
        };
        out.finish(format_args!(
            "{} {}",
            format!("{}:", level.as_str().to_lowercase()).color(color),
            message
        ));
    })
    .chain(std::io::stderr())
}

/// Installs the global logger. Later calls are ignored so repeated
/// in-process runs (tests, embedding) keep the first dispatcher.
pub fn init(level: LevelFilter) {
    if stderr(base(level)).apply().is_err() {
        log::set_max_level(level);
    }
}
