use anyhow::{anyhow, Result};
use bat::WrappingMode;
use console::style;
use reagent::action::Action;
use reagent::react::LoopObserver;

/// Prints each loop iteration to stdout as it happens
pub struct TracePrinter;

impl LoopObserver for TracePrinter {
    fn on_response(&self, turn: usize, text: &str) {
        println!("{}", style(format!("── turn {} ──", turn)).dim());
        println!("{}", text.trim_end());
    }

    fn on_action(&self, _turn: usize, action: &Action) {
        println!(
            "{} {}",
            style(format!("→ {}", action.name)).cyan().bold(),
            style(&action.argument).cyan()
        );
    }

    fn on_observation(&self, _turn: usize, observation: &str) {
        println!("{} {}", style("Observation:").yellow().bold(), observation);
    }
}

/// Render the final answer as Markdown
pub fn render_answer(answer: &str) -> Result<()> {
    println!("{}", style("── answer ──").green());
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(answer.as_bytes()))
        .theme("ansi")
        .language("Markdown")
        .colored_output(console::user_attended())
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to render answer: {}", e))?;
    println!();
    Ok(())
}
