use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reagent::errors::{AgentError, GatewayError};
use reagent::models::message::Message;
use reagent::models::role::Role;
use reagent::providers::base::{Provider, Usage};
use reagent::react::ReactLoop;
use reagent::tools::ToolRegistry;

/// Replays a fixed script of replies and records what it was sent
#[derive(Clone, Default)]
struct ScriptedGateway {
    script: Arc<Mutex<VecDeque<String>>>,
    seen: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl ScriptedGateway {
    fn new(script: &[&str]) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.iter().map(|s| s.to_string()).collect())),
            seen: Arc::default(),
        }
    }

    fn calls(&self) -> Vec<Vec<Message>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedGateway {
    async fn complete(&self, messages: &[Message]) -> Result<(Message, Usage), GatewayError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::MalformedResponse("script exhausted".to_string()))?;
        Ok((Message::assistant(next), Usage::default()))
    }
}

fn registry_recording_calculate(calls: Arc<Mutex<Vec<String>>>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry
        .register_fn("calculate", "Evaluates arithmetic", move |arg: &str| {
            calls.lock().unwrap().push(arg.to_string());
            Ok(reagent::tools::calculator::format_number(
                reagent::tools::calculator::evaluate(arg)?,
            ))
        })
        .unwrap();
    registry
}

#[tokio::test]
async fn calculate_action_is_dispatched_with_raw_argument() -> anyhow::Result<()> {
    let gateway = ScriptedGateway::new(&[
        "Thought: I should multiply\nAction: calculate: 6 * 7\nPAUSE",
        "Answer: 6 times 7 is 42",
    ]);
    let tool_calls = Arc::new(Mutex::new(Vec::new()));
    let registry = registry_recording_calculate(Arc::clone(&tool_calls));

    let react = ReactLoop::new(Arc::new(gateway.clone()), Arc::new(registry))?;
    let answer = react.run("What is 6 * 7?").await?;

    assert_eq!(answer, "Answer: 6 times 7 is 42");
    assert_eq!(*tool_calls.lock().unwrap(), vec!["6 * 7".to_string()]);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].last(), Some(&Message::user("Observation: 42")));
    Ok(())
}

#[tokio::test]
async fn unknown_tool_continues_the_loop() -> anyhow::Result<()> {
    let gateway = ScriptedGateway::new(&[
        "Action: search_web: dog weights",
        "Action: average_dog_weight: Border Collie",
        "Answer: about 37 lbs",
    ]);
    let react = ReactLoop::new(
        Arc::new(gateway.clone()),
        Arc::new(ToolRegistry::with_defaults()),
    )?;

    let answer = react.run("How heavy is a Border Collie?").await?;

    assert_eq!(answer, "Answer: about 37 lbs");
    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    let observation = &calls[1].last().unwrap().content;
    assert!(observation.starts_with("Observation: Unknown action: search_web"));
    assert_eq!(
        calls[2].last().unwrap().content,
        "Observation: a Border Collies average weight is 37 lbs"
    );
    Ok(())
}

#[tokio::test]
async fn endless_actions_hit_the_turn_budget() -> anyhow::Result<()> {
    let gateway = ScriptedGateway::new(&["Action: calculate: 1 + 1"; 10]);
    let react = ReactLoop::new(
        Arc::new(gateway.clone()),
        Arc::new(ToolRegistry::with_defaults()),
    )?
    .with_max_turns(3);

    let result = react.run("Never finish").await;

    match result {
        Err(AgentError::TurnBudgetExceeded { max_turns }) => assert_eq!(max_turns, 3),
        other => panic!("Expected turn budget exhaustion, got {:?}", other),
    }
    assert_eq!(gateway.calls().len(), 3);
    Ok(())
}

#[tokio::test]
async fn gateway_failure_surfaces_to_caller() -> anyhow::Result<()> {
    let gateway = ScriptedGateway::new(&[]);
    let react = ReactLoop::new(
        Arc::new(gateway.clone()),
        Arc::new(ToolRegistry::with_defaults()),
    )?;

    let err = react.run("Anyone there?").await.unwrap_err();

    assert!(matches!(
        err,
        AgentError::Gateway(GatewayError::MalformedResponse(_))
    ));
    assert!(!err.is_turn_budget_exceeded());
    Ok(())
}

#[tokio::test]
async fn one_registry_serves_independent_loops() -> anyhow::Result<()> {
    let registry = Arc::new(ToolRegistry::with_defaults());
    let first = ScriptedGateway::new(&["Action: calculate: 2 + 2", "Answer: 4"]);
    let second = ScriptedGateway::new(&["Answer: no tools needed"]);

    let first_loop = ReactLoop::new(Arc::new(first.clone()), Arc::clone(&registry))?;
    let second_loop = ReactLoop::new(Arc::new(second.clone()), Arc::clone(&registry))?;

    assert_eq!(first_loop.run("2 + 2?").await?, "Answer: 4");
    assert_eq!(second_loop.run("hello").await?, "Answer: no tools needed");

    let calls = second.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].role, Role::System);
    assert!(calls[0][0].content.contains("average_dog_weight"));
    Ok(())
}
