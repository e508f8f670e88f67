use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use difflens_types::Granularity;

#[derive(Parser)]
#[command(
    name = "difflens",
    about = "difflens: minimal, stable text diffs with inline highlights",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./difflens.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the differences between two files
    Diff(DiffArgs),
    /// Show only change counts between two files
    Stats(DiffArgs),
    /// Serve framed diff requests on stdin/stdout
    Worker(WorkerArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Left ("old") file, or - for stdin
    pub left: PathBuf,
    /// Right ("new") file, or - for stdin
    pub right: PathBuf,

    #[command(flatten)]
    pub flags: OptionFlags,

    /// Exit with status 1 when the inputs differ
    #[arg(long)]
    pub exit_code: bool,
}

/// Flags that override `[options]` and `[limits]` from the config file.
#[derive(Args, Debug, Default)]
pub struct OptionFlags {
    /// Comparison unit: line, word, or char
    #[arg(short, long)]
    pub granularity: Option<Granularity>,

    #[arg(short = 'w', long)]
    pub ignore_whitespace: bool,

    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    #[arg(long)]
    pub trim_trailing_whitespace: bool,

    #[arg(short = 'B', long)]
    pub ignore_blank_lines: bool,

    /// Give up once the edit distance is known to exceed this
    #[arg(long)]
    pub max_edit_distance: Option<usize>,
}

#[derive(Args)]
pub struct WorkerArgs {
    /// Do not send progress messages
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print built-in defaults instead of the loaded file
    #[arg(long)]
    pub defaults: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["difflens", "diff", "a.txt", "b.txt"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.left, PathBuf::from("a.txt"));
            assert_eq!(args.right, PathBuf::from("b.txt"));
            assert!(args.flags.granularity.is_none());
            assert!(!args.exit_code);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_flags() {
        let cli = Cli::try_parse_from([
            "difflens", "diff", "-g", "word", "-w", "-i", "-B", "--trim-trailing-whitespace",
            "--max-edit-distance", "50", "--exit-code", "a", "b",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.flags.granularity, Some(Granularity::Word));
            assert!(args.flags.ignore_whitespace);
            assert!(args.flags.ignore_case);
            assert!(args.flags.ignore_blank_lines);
            assert!(args.flags.trim_trailing_whitespace);
            assert_eq!(args.flags.max_edit_distance, Some(50));
            assert!(args.exit_code);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_granularity_aliases() {
        let cli = Cli::try_parse_from(["difflens", "stats", "--granularity", "chars", "a", "b"]).unwrap();
        if let Command::Stats(args) = cli.command {
            assert_eq!(args.flags.granularity, Some(Granularity::Character));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reject_unknown_granularity() {
        assert!(Cli::try_parse_from(["difflens", "diff", "-g", "paragraph", "a", "b"]).is_err());
    }

    #[test]
    fn parse_diff_requires_two_paths() {
        assert!(Cli::try_parse_from(["difflens", "diff", "a"]).is_err());
    }

    #[test]
    fn parse_worker() {
        let cli = Cli::try_parse_from(["difflens", "worker", "--no-progress"]).unwrap();
        if let Command::Worker(args) = cli.command {
            assert!(args.no_progress);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::try_parse_from(["difflens", "config", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::Config(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["difflens", "--verbose", "config"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["difflens", "--format", "json", "stats", "a", "b"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
