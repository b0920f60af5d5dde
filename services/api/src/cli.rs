use crate::server;
use crate::snapshot::{run_snapshot, SnapshotArgs};
use clap::{Args, Parser, Subcommand};
use vaccination_dashboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Painel de Vacinação",
    about = "Serve and inspect the school vaccination dashboard from the command line",
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
    /// Print the summary cards and option counts for one filter combination
    Snapshot(SnapshotArgs),
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
        Command::Snapshot(args) => run_snapshot(args),
    }
}
