//! `novelkit_cli` v1:
//! Shared command-line plumbing for the `novel-xlsx` and `novel-viz` binaries.

use std::io::Write;

use clap::Args;
use env_logger::Builder;
use log::LevelFilter;

/// Verbosity flags shared by every binary.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ArgsLog {
    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl ArgsLog {
    /// Log level implied by the flags; `quiet` wins over `verbose`.
    pub fn level(&self) -> LevelFilter {
        derive_log_level(self.verbose, self.quiet)
    }
}

/// Map verbosity flags to a level filter.
pub fn derive_log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize `env_logger` with a compact `[LEVEL] message` format.
pub fn init_logging(args: ArgsLog) {
    Builder::new()
        .filter_level(args.level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(derive_log_level(0, false), LevelFilter::Info);
        assert_eq!(derive_log_level(1, false), LevelFilter::Debug);
        assert_eq!(derive_log_level(3, false), LevelFilter::Trace);
        assert_eq!(derive_log_level(2, true), LevelFilter::Error);
    }
}
