use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{prune, run, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "legwork")]
#[command(version = VERSION)]
#[command(about = "Shell-scripting legwork: logged command runs and workspace setup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a shell command with output streamed to the log
    Run(run::RunArgs),
    /// Remove files older than a cutoff from a directory
    Prune(prune::PruneArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = match cli.command {
        Commands::Run(args) => output::map_cmd_result(run::run(args, &global)),
        Commands::Prune(args) => output::map_cmd_result(prune::run(args, &global)),
    };

    // Fatal command failures were already logged at the point of failure;
    // the envelope is the machine-readable diagnostic for everything else.
    output::print_json_result(json_result);

    std::process::ExitCode::from(output::exit_code_to_u8(exit_code))
}
