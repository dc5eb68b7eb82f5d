use crate::demo::{run_demo, run_form_summary, DemoArgs, FormSummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use formsly::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Formsly Request Service",
    about = "Run and demonstrate the Formsly dynamic form engine from the command line",
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
    /// Inspect built-in form templates
    Forms {
        #[command(subcommand)]
        command: FormsCommand,
    },
    /// Run an end-to-end CLI demo covering intake, expansion, and scoring
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FormsCommand {
    /// Print the positional section/field summary for a form template
    Summary(FormSummaryArgs),
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
        Command::Forms {
            command: FormsCommand::Summary(args),
        } => run_form_summary(args),
        Command::Demo(args) => run_demo(args),
    }
}
