use crate::demo::{run_demo, run_training_report, DemoArgs, TrainingReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_rd::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Analytics Service",
    about = "Run and demonstrate the R&D talent analytics service from the command line",
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
    /// Analyze training-hours exports without starting the service
    Training {
        #[command(subcommand)]
        command: TrainingCommand,
    },
    /// Run an end-to-end CLI demo covering scoring and evaluation workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TrainingCommand {
    /// Generate a training-hours report from CSV exports
    Report(TrainingReportArgs),
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
        Command::Training {
            command: TrainingCommand::Report(args),
        } => run_training_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
