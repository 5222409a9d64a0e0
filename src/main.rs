use clap::Parser;
use quiz_battle::config::GameConfig;
use quiz_battle::session::{self, SessionContext, TerminalPrompt};
use quiz_battle::utils::build_info::version_string;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "quiz-battle",
    about = "Quiz Battle - answer trivia to defeat monsters",
    disable_version_flag = true
)]
struct Args {
    /// Directory for saves, accounts, questions and the leaderboard
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed the game RNG for reproducible enemies and question order
    #[arg(long)]
    seed: Option<u64>,

    /// Don't clear the screen between menus
    #[arg(long)]
    no_clear: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if args.version {
        println!("{}", version_string());
        return Ok(());
    }
    init_tracing(args.verbose);

    let mut config = match args.data_dir {
        Some(dir) => GameConfig::with_data_dir(dir),
        None => GameConfig::default(),
    };
    config.seed = args.seed;
    config.clear_screen = !args.no_clear;

    let mut prompt = TerminalPrompt::new(config.clear_screen);
    let mut ctx = SessionContext::open(config);

    if let Err(e) = session::run(&mut ctx, &mut prompt) {
        error!(error = %e, "session aborted");
        eprintln!("An unexpected error occurred: {}", e);
        eprintln!("Please restart the game. Saved progress is untouched.");
        std::process::exit(1);
    }
    Ok(())
}
