use crate::demo::{run_demo, run_navigate, run_progress, NavigateArgs, ProgressArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use visadesk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "visadesk",
    about = "Run the visa brokerage portal or inspect its routing and progress rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Show where the role guard sends a session for a given path
    Navigate(NavigateArgs),
    /// Print the stage timeline and payment share for an application status
    Progress(ProgressArgs),
    /// Walk through admin and client sessions against the seeded portal
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Navigate(args) => run_navigate(args),
        Command::Progress(args) => run_progress(args),
        Command::Demo => run_demo(),
    }
}
