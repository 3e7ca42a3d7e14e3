//! CLI argument definitions for dotaconstants

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dotaconstants")]
#[command(about = "Build the Dota 2 constants bundle", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every source, write the JSON files and the index module
    #[command(visible_alias = "b")]
    Build {
        /// Output directory for the generated JSON files
        #[arg(short, long, env = "DOTACONSTANTS_OUTPUT")]
        output: Option<PathBuf>,

        /// Directory of hand-maintained JSON files copied into the output
        #[arg(long, env = "DOTACONSTANTS_JSON_DIR")]
        json_dir: Option<PathBuf>,

        /// Path of the generated index module
        #[arg(long)]
        index: Option<PathBuf>,

        /// Read `<location>.json` files from this directory instead of fetching
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,

        /// Only build these sources (repeatable)
        #[arg(long = "only", value_name = "KEY")]
        only: Vec<String>,

        /// Config file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List registered sources and the documents they read
    #[command(visible_alias = "ls")]
    Sources {
        /// Config file, to show URL overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run one transform on local JSON files and print the result
    #[command(visible_alias = "t")]
    Transform {
        /// Source key, e.g. "items" or "cluster"
        key: String,

        /// Input documents, in the order the source lists them
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from([
            "dotaconstants",
            "build",
            "--output",
            "out",
            "--only",
            "items",
            "--only",
            "heroes",
        ])
        .unwrap();
        let Commands::Build { output, only, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(output, Some(PathBuf::from("out")));
        assert_eq!(only, vec!["items", "heroes"]);
    }

    #[test]
    fn test_transform_requires_files() {
        assert!(Cli::try_parse_from(["dotaconstants", "transform", "items"]).is_err());
        assert!(Cli::try_parse_from(["dotaconstants", "t", "cluster", "regions.json"]).is_ok());
    }
}
