use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use c3l_core::LinearizerConfig;

#[derive(Parser)]
#[command(
    name = "c3l",
    about = "c3linear: C3 resolution order for multiple-inheritance hierarchies",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Override the recursion depth bound from the hierarchy file
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Disable per-call memoization of ancestor linearizations
    #[arg(long, global = true)]
    pub no_memo: bool,
}

impl Cli {
    /// Layer command-line overrides on top of a file's `[config]` section.
    pub fn linearizer_config(&self, file: &LinearizerConfig) -> LinearizerConfig {
        let mut config = file.clone();
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if self.no_memo {
            config.memoize = false;
        }
        config
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the C3 linearization of a class
    Linearize(LinearizeArgs),
    /// Linearize every class in a hierarchy file
    Check(CheckArgs),
    /// Merge sequences directly (comma-separated; the last is the parent list)
    Merge(MergeArgs),
    /// Find the most specific ancestor two classes share
    Common(CommonArgs),
    /// List declared classes and their parents
    Show(ShowArgs),
}

#[derive(Args)]
pub struct LinearizeArgs {
    pub file: PathBuf,
    pub class: String,
}

#[derive(Args)]
pub struct CheckArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct MergeArgs {
    #[arg(required = true)]
    pub sequences: Vec<String>,
}

#[derive(Args)]
pub struct CommonArgs {
    pub file: PathBuf,
    pub a: String,
    pub b: String,
}

#[derive(Args)]
pub struct ShowArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_linearize() {
        let cli = Cli::try_parse_from(["c3l", "linearize", "h.toml", "C1"]).unwrap();
        if let Command::Linearize(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("h.toml"));
            assert_eq!(args.class, "C1");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_linearize_requires_class() {
        assert!(Cli::try_parse_from(["c3l", "linearize", "h.toml"]).is_err());
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["c3l", "check", "h.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_merge_sequences() {
        let cli = Cli::try_parse_from(["c3l", "merge", "C,A,Root", "D,B,Root", "C,D"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.sequences, vec!["C,A,Root", "D,B,Root", "C,D"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_requires_a_sequence() {
        assert!(Cli::try_parse_from(["c3l", "merge"]).is_err());
    }

    #[test]
    fn parse_common() {
        let cli = Cli::try_parse_from(["c3l", "common", "h.toml", "A", "B"]).unwrap();
        if let Command::Common(args) = cli.command {
            assert_eq!((args.a.as_str(), args.b.as_str()), ("A", "B"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["c3l", "show", "h.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["c3l", "--verbose", "check", "h.toml"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["c3l", "--format", "json", "check", "h.toml"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn flags_override_file_config() {
        let cli = Cli::try_parse_from(["c3l", "check", "h.toml", "--max-depth", "3", "--no-memo"]).unwrap();
        let file = LinearizerConfig::default().with_max_depth(64);
        let config = cli.linearizer_config(&file);
        assert_eq!(config.max_depth, 3);
        assert!(!config.memoize);
    }

    #[test]
    fn file_config_survives_without_flags() {
        let cli = Cli::try_parse_from(["c3l", "check", "h.toml"]).unwrap();
        let file = LinearizerConfig::default().with_max_depth(64);
        assert_eq!(cli.linearizer_config(&file), file);
    }
}
