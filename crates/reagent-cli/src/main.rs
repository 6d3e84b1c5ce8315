use anyhow::Result;
use clap::Parser;
use console::style;
use reagent::errors::AgentError;
use tracing_subscriber::EnvFilter;

use reagent_cli::render::render_answer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The question to answer
    question: String,

    /// Maximum reasoning/action cycles before giving up
    #[arg(long)]
    max_turns: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match reagent_cli::run(&cli.question, cli.max_turns).await {
        Ok(answer) => render_answer(&answer),
        Err(err) => match err.downcast_ref::<AgentError>() {
            Some(AgentError::TurnBudgetExceeded { max_turns }) => {
                eprintln!(
                    "{}",
                    style(format!("No answer within {} turns", max_turns))
                        .red()
                        .bold()
                );
                std::process::exit(2);
            }
            _ => Err(err),
        },
    }
}
