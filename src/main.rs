use clap::Parser;
use tracing_subscriber::EnvFilter;

use gptl_cli::cli::commands::{config, translate, usage};
use gptl_cli::cli::exit::exit_code_for;
use gptl_cli::cli::{Args, Command};
use gptl_cli::ui::Style;

const LOG_ENV: &str = "GPTL_LOG";

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.quiet);

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Command::Usage) => usage::print_usage().await,
        Some(Command::Config { init }) => config::run_config(init),
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                from: args.from,
                to: args.to,
                format: args.format.into(),
                batch: args.batch,
                model: args.model,
                max_tokens: args.max_tokens,
                general_prompt: args.general_prompt,
                quiet: args.quiet,
            };
            translate::run_translate(options).await
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
