use crate::demo::{print_questionnaire, run_demo, run_roster_check, DemoArgs, RosterCheckArgs};
use crate::server;
use big_five::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Big Five Assessment",
    about = "Serve and exercise the Big Five personality assessment from the command line",
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
    /// Inspect the participant roster
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Print the questionnaire sections and answer scale
    Questionnaire,
    /// Walk one rostered respondent through the full assessment without delivering it
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Check whether a CNIC is admitted and show the roster entry it maps to
    Check(RosterCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured roster CSV path
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Roster {
            command: RosterCommand::Check(args),
        } => run_roster_check(args),
        Command::Questionnaire => {
            print_questionnaire();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
