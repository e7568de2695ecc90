use anyhow::Result;
use clap::Parser;
use prettylog::{scan, HandlerOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reads structured logs from stdin, makes them pretty on stdout.
#[derive(Parser)]
#[command(name = "prettylog", version, about)]
struct Cli {
    /// Keys to skip when rendering a log entry
    #[arg(long, value_name = "KEY", conflicts_with = "keep")]
    skip: Vec<String>,

    /// Keys to keep when rendering a log entry (drops all others)
    #[arg(long, value_name = "KEY")]
    keep: Vec<String>,

    /// Sort fields by length after having sorted lexicographically
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    sort_longest: bool,

    /// Skip fields that have the same value as in the previous entry
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    skip_unchanged: bool,

    /// Truncate values that are longer than --truncate-length
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    truncate: bool,

    /// Truncate values that are longer than this many characters
    #[arg(long, value_name = "N", default_value_t = 15)]
    truncate_length: usize,

    /// Use black as the base foreground color (for light terminal backgrounds)
    #[arg(long)]
    light_bg: bool,

    /// Output time layout, strftime syntax
    #[arg(long, value_name = "LAYOUT", default_value = "%b %e %H:%M:%S")]
    time_format: String,
}

impl Cli {
    fn into_options(self) -> HandlerOptions {
        HandlerOptions {
            skip: self.skip.into_iter().collect(),
            keep: self.keep.into_iter().collect(),
            time_format: self.time_format,
            truncates: self.truncate,
            truncate_length: self.truncate_length,
            sort_longest: self.sort_longest,
            skip_unchanged: self.skip_unchanged,
            light_bg: self.light_bg,
            ..Default::default()
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prettylog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let opts = Cli::parse().into_options();

    tracing::debug!("reading stdin");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    scan(stdin.lock(), stdout.lock(), &opts)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_handler_defaults() {
        let opts = Cli::parse_from(["prettylog"]).into_options();
        let defaults = HandlerOptions::default();
        assert_eq!(opts.sort_longest, defaults.sort_longest);
        assert_eq!(opts.skip_unchanged, defaults.skip_unchanged);
        assert_eq!(opts.truncates, defaults.truncates);
        assert_eq!(opts.truncate_length, defaults.truncate_length);
        assert_eq!(opts.time_format, defaults.time_format);
    }

    #[test]
    fn test_boolean_flags_can_be_disabled() {
        let opts = Cli::parse_from(["prettylog", "--skip-unchanged=false"]).into_options();
        assert!(!opts.skip_unchanged);
    }

    #[test]
    fn test_skip_and_keep_are_exclusive() {
        let parsed = Cli::try_parse_from(["prettylog", "--skip", "a", "--keep", "b"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_skip_collects_multiple_keys() {
        let opts = Cli::parse_from(["prettylog", "--skip", "a", "--skip", "b"]).into_options();
        assert!(opts.skip.contains("a"));
        assert!(opts.skip.contains("b"));
    }
}
