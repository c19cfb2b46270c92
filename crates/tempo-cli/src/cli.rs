use clap::Parser;

/// Top-level CLI parser for the `tempo` binary.
#[derive(Debug, Parser)]
#[command(name = "tempo", version, about = "Tempo - terminal client for a remote chess engine")]
pub struct Cli {
    /// Engine base URL (overrides configuration)
    #[arg(short, long)]
    pub engine_url: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
