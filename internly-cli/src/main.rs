use clap::{Parser, Subcommand};
use colored::Colorize;
use internly_lib::{Error, Repository, SessionStore};
use sysexits::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod admin;
mod auth;
mod dashboard;
mod leaderboard;

#[derive(Parser, Debug)]
#[command(name = "internly")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Sign in as an intern, or as the admin with --admin
    Login(auth::LoginArgs),
    /// Clear all session flags
    Logout,
    /// Your personal stats and milestone rewards
    Dashboard,
    /// All interns ranked by joining date
    Leaderboard,
    /// Manage intern records (admin only)
    #[command(subcommand)]
    Admin(admin::Command),
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("no global subscriber should be set yet");

    let repo = Repository::new();
    let sessions = SessionStore::new();
    let cli = Cli::parse();

    let outcome = match &cli.command {
        Command::Login(args) => auth::login(&repo, &sessions, args),
        Command::Logout => auth::logout(&sessions),
        Command::Dashboard => dashboard::show(&repo, &sessions),
        Command::Leaderboard => leaderboard::show(&repo),
        Command::Admin(cmd) => admin::handle(&repo, &sessions, cmd),
    };

    match outcome {
        Ok(()) => ExitCode::Ok,
        Err(err) => report(&err),
    }
}

/// Convert any core error into a user-facing message and exit code. Errors
/// are never retried and never panic the process.
fn report(err: &Error) -> ExitCode {
    eprintln!("{}", err.to_string().red());

    match err {
        Error::StoreUnavailable(_) => ExitCode::Unavailable,
        Error::NotFound(_) | Error::NoMatch => ExitCode::DataErr,
        Error::InvalidCredentials => {
            eprintln!(
                "{}",
                "Sign in with `internly login` (or `internly login --admin`).".yellow()
            );
            ExitCode::NoPerm
        }
        Error::SessionIo(_) | Error::SessionDecode(_) | Error::SessionEncode(_) => ExitCode::IoErr,
    }
}
