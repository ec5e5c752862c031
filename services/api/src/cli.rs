use crate::demo::{
    run_demo, run_password_check, run_resubmission_map, DemoArgs, PasswordCheckArgs,
    ResubmissionMapArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use member_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Member Portal",
    about = "Run the member portal API or exercise its workflows from the command line",
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
    /// Inspect rejected applications offline
    Resubmission {
        #[command(subcommand)]
        command: ResubmissionCommand,
    },
    /// Password policy helpers
    Password {
        #[command(subcommand)]
        command: PasswordCommand,
    },
    /// Run an end-to-end demo of the resubmission and dashboard workflows in memory
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ResubmissionCommand {
    /// Map a rejected-application record into the wizard's pre-filled form
    Map(ResubmissionMapArgs),
}

#[derive(Subcommand, Debug)]
enum PasswordCommand {
    /// Score a password against the registration policy
    Check(PasswordCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the upstream membership backend base URL
    #[arg(long)]
    pub(crate) upstream: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Resubmission {
            command: ResubmissionCommand::Map(args),
        } => run_resubmission_map(args),
        Command::Password {
            command: PasswordCommand::Check(args),
        } => run_password_check(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
