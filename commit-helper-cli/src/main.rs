use clap::Parser;
use commit_helper_core::{execute_commit_helper_flow, style, CoreCliArgs, FlowOutcome, HelperError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli_args = CoreCliArgs::parse();
    init_tracing(cli_args.verbose);

    match execute_commit_helper_flow(cli_args).await {
        Ok(FlowOutcome::Committed { .. }) => {
            println!("\n{}", style("✨ all done! ✨").green().bold());
        }
        Ok(FlowOutcome::NothingToCommit | FlowOutcome::Aborted) => {}
        Err(e) => {
            eprintln!(
                "{} {}",
                style("❌ git-commit-helper failed:").red().bold(),
                style(format!("{e:#}")).red()
            );
            if let Some(hint) = e.downcast_ref::<HelperError>().and_then(HelperError::guidance) {
                eprintln!("{}", style(hint).yellow());
            }
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("commit_helper_core=debug,commit_helper_cli=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("commit_helper_core=warn,commit_helper_cli=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var("NO_COLOR").is_err())
        .without_time()
        .init();
}
