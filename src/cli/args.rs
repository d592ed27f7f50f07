//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Object hierarchy viewer: flatten JSON trees into tables, filter by level and subtree, export CSV
#[derive(Parser, Debug)]
#[command(name = "objtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .objtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Input documents: JSON files or directories of them
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON files or directories (concatenated in order)
    #[arg(value_hint = ValueHint::AnyPath)]
    pub files: Vec<PathBuf>,
}

/// Level range, inclusive
#[derive(Args, Debug, Clone, Default)]
pub struct LevelArgs {
    /// Lowest level to keep (default: 0)
    #[arg(long)]
    pub min_level: Option<u32>,

    /// Highest level to keep (default: highest observed level)
    #[arg(long)]
    pub max_level: Option<u32>,
}

/// Level range plus subtree root
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[command(flatten)]
    pub levels: LevelArgs,

    /// Keep only this node and its descendants ("All" for no restriction)
    #[arg(short, long, conflicts_with = "pick")]
    pub root: Option<String>,

    /// Pick the subtree root interactively (fzf)
    #[arg(long)]
    pub pick: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the filtered table
    Table {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export the filtered table as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Target file, "-" for stdout (default: <output_dir>/filtered_tree_structure.csv)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List a node and all of its descendants
    Subtree {
        /// Subtree root
        root: String,
        #[command(flatten)]
        input: InputArgs,
    },

    /// List root choices for the given level range
    Fathers {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        levels: LevelArgs,
    },

    /// Show the observed level range
    Levels {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the hierarchy as tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Render the hierarchy as interactive HTML graph
    Graph {
        #[command(flatten)]
        input: InputArgs,
        /// Target file, "-" for stdout (default: <output_dir>/interactive_tree.html)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
