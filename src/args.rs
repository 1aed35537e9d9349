use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// register allocation for pseudo-assembly.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(propagate_version = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,

    /// Log more. May be given several times.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Arguments {
    pub fn options(&self) -> &Options {
        self.command.options()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Allocate registers and write the resulting code.
    #[command(visible_alias = "a")]
    Alloc(Options),

    /// Allocate registers without writing anything.
    #[command(visible_alias = "c")]
    Check(Options),
}

impl Command {
    pub fn options(&self) -> &Options {
        match self {
            Self::Alloc(opts) => opts,
            Self::Check(opts) => opts,
        }
    }

    pub fn write(&self) -> bool {
        matches!(self, Self::Alloc(_))
    }
}

#[derive(Debug, Args)]
pub struct Options {
    /// How to color the interference graph.
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    pub strategy: Strategy,

    /// Give up after this many coloring attempts, which spills at most one
    /// fewer register than that.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<usize>,

    /// Do not print the allocation report.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Where to write the allocated code.
    #[arg(short, long, default_value = "prog.asm")]
    pub output: PathBuf,

    /// Also print the allocated code to stdout.
    #[arg(long, action = ArgAction::SetTrue)]
    pub print: bool,

    #[arg(required = true)]
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Strategy {
    /// Color by descending degree.
    Greedy,

    /// Simplify and select, as in Chaitin's allocator.
    Simplify,
}
