pub mod error;
pub mod render;
pub mod settings;

use anyhow::{Context, Result};
use reagent::prompt_template::load_prompt_file;
use reagent::providers::factory::get_provider;
use reagent::react::ReactLoop;
use reagent::tools::ToolRegistry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::render::TracePrinter;
use crate::settings::Settings;

/// Answer `question` with the configured provider and the built-in tools.
///
/// `max_turns` overrides the configured turn budget. Running out of turns is
/// reported as [`reagent::errors::AgentError::TurnBudgetExceeded`] inside the
/// returned error.
pub async fn run(question: &str, max_turns: Option<usize>) -> Result<String> {
    let settings = Settings::new().context("Failed to load settings")?;
    run_with_settings(settings, question, max_turns).await
}

pub async fn run_with_settings(
    settings: Settings,
    question: &str,
    max_turns: Option<usize>,
) -> Result<String> {
    let registry = Arc::new(ToolRegistry::with_defaults());
    let provider = get_provider(settings.provider.into_config())
        .context("Failed to create model provider")?;

    let mut react = ReactLoop::new(provider, Arc::clone(&registry))?
        .with_max_turns(max_turns.unwrap_or(settings.agent.max_turns))
        .with_observer(TracePrinter);

    if let Some(path) = &settings.agent.system_prompt_path {
        let mut context = HashMap::new();
        context.insert("tools", registry.infos());
        let prompt = load_prompt_file(path, &context)
            .with_context(|| format!("Failed to load system prompt from {}", path.display()))?;
        react = react.with_system_prompt(prompt);
    }

    tracing::info!(question, max_turns = react.max_turns(), "starting run");
    Ok(react.run(question).await?)
}
