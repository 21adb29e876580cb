use crate::demo::{run_demo, run_questions, run_results, DemoArgs, QuestionsArgs, ResultsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wahl_navigator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WahlNavigator",
    about = "Match survey answers against recorded party votes",
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
    /// Score an answer file and print the party match report
    Results(ResultsArgs),
    /// List the questions selected by the given filters
    Questions(QuestionsArgs),
    /// Answer the seed questions with a canned profile and print the match
    Demo(DemoArgs),
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
        Command::Results(args) => run_results(args),
        Command::Questions(args) => run_questions(args),
        Command::Demo(args) => run_demo(args),
    }
}
