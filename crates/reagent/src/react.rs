//! The action-dispatch loop.
//!
//! Each turn sends the pending prompt to the agent. A reply without an
//! `Action:` line is the final answer. Otherwise the named tool runs and its
//! result goes back to the model as `Observation: <result>` on the next turn.
//! Tool failures become observations too, so the model can correct itself;
//! only gateway failures and an exhausted turn budget end a run early.

use std::sync::Arc;

use crate::action::{parse_action, Action};
use crate::agent::Agent;
use crate::errors::{AgentError, AgentResult};
use crate::prompt_template::{render_system_prompt, SYSTEM_PROMPT_TEMPLATE};
use crate::providers::base::Provider;
use crate::tools::{ToolError, ToolRegistry};

pub const DEFAULT_MAX_TURNS: usize = 5;

/// Receives each step of a run as it happens. All methods default to no-ops.
pub trait LoopObserver: Send + Sync {
    /// The model replied on `turn` (1-based)
    fn on_response(&self, _turn: usize, _text: &str) {}

    /// The reply requested a tool
    fn on_action(&self, _turn: usize, _action: &Action) {}

    /// The text fed back to the model for the next turn
    fn on_observation(&self, _turn: usize, _observation: &str) {}

    /// The reply had no action and is the final answer
    fn on_answer(&self, _turn: usize, _answer: &str) {}
}

struct NoopObserver;

impl LoopObserver for NoopObserver {}

pub struct ReactLoop {
    provider: Arc<dyn Provider>,
    registry: Arc<ToolRegistry>,
    system_prompt: String,
    max_turns: usize,
    observer: Box<dyn LoopObserver>,
}

impl ReactLoop {
    /// Build a loop whose system prompt is the built-in template rendered
    /// with the registry's tools
    pub fn new(provider: Arc<dyn Provider>, registry: Arc<ToolRegistry>) -> AgentResult<Self> {
        let system_prompt = render_system_prompt(SYSTEM_PROMPT_TEMPLATE, &registry)
            .map_err(|e| AgentError::Prompt(e.to_string()))?;

        Ok(Self {
            provider,
            registry,
            system_prompt,
            max_turns: DEFAULT_MAX_TURNS,
            observer: Box::new(NoopObserver),
        })
    }

    pub fn with_system_prompt<S: Into<String>>(mut self, system_prompt: S) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_observer<O: LoopObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// A fresh agent seeded with this loop's system prompt
    pub fn new_agent(&self) -> Agent {
        Agent::new(Arc::clone(&self.provider), Some(&self.system_prompt))
    }

    /// Answer `question` in a new conversation
    pub async fn run(&self, question: &str) -> AgentResult<String> {
        let mut agent = self.new_agent();
        self.run_with_agent(&mut agent, question).await
    }

    /// Answer `question` by driving a caller-owned agent, leaving the full
    /// exchange in its conversation
    pub async fn run_with_agent(&self, agent: &mut Agent, question: &str) -> AgentResult<String> {
        let mut next_prompt = question.to_string();

        for turn in 1..=self.max_turns {
            tracing::info!(turn, max_turns = self.max_turns, "reasoning");
            let result = agent.send(&next_prompt).await?;
            self.observer.on_response(turn, &result);

            let Some(action) = parse_action(&result) else {
                tracing::info!(turn, "final answer");
                self.observer.on_answer(turn, &result);
                return Ok(result);
            };

            tracing::info!(turn, action = %action.name, argument = %action.argument, "running action");
            self.observer.on_action(turn, &action);

            let observation = self.observe(&action);
            self.observer.on_observation(turn, &observation);
            next_prompt = format!("Observation: {}", observation);
        }

        tracing::warn!(max_turns = self.max_turns, "turn budget exhausted without an answer");
        Err(AgentError::TurnBudgetExceeded {
            max_turns: self.max_turns,
        })
    }

    /// Run the action and describe the outcome, including failures, as text
    fn observe(&self, action: &Action) -> String {
        match self.registry.execute(&action.name, &action.argument) {
            Ok(output) => output,
            Err(ToolError::UnknownTool(name)) => {
                tracing::warn!(action = %name, "model requested an unknown action");
                format!(
                    "Unknown action: {}. Available actions: {}",
                    name,
                    self.registry.names().join(", ")
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "action failed");
                format!("Error: {}", err)
            }
        }
    }
}
