use super::*;
use crate::application::retry::{RetryPolicy, RetryableTask, TerminalObserver, run_with_retries};
use crate::application::tooling::{ServerToolInfo, ToolInvokeError, ToolSession};
use crate::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use crate::types::MessageRole;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct StubSession {
    tools: Vec<ServerToolInfo>,
    guidance: Vec<(String, String)>,
    result: Value,
    transport_failure: bool,
    calls: Mutex<Vec<(String, Value)>>,
}

impl StubSession {
    fn browser() -> Self {
        Self {
            tools: vec![tool("browser_navigate"), tool("browser_extract")],
            result: json!({"content": [{"type": "text", "text": "ok"}]}),
            ..Default::default()
        }
    }
}

fn tool(name: &str) -> ServerToolInfo {
    ServerToolInfo {
        name: name.to_string(),
        server: "playwright".to_string(),
        description: Some(format!("{name} description")),
        input_schema: Some(json!({"type": "object"})),
    }
}

#[async_trait]
impl ToolSession for StubSession {
    async fn list_tools(&self) -> Vec<ServerToolInfo> {
        self.tools.clone()
    }

    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        self.calls
            .lock()
            .await
            .push((tool.to_string(), arguments));
        if self.transport_failure {
            return Err(ToolInvokeError::Terminated {
                server: "playwright".to_string(),
            });
        }
        if !self.tools.iter().any(|info| info.name == tool) {
            return Err(ToolInvokeError::UnknownTool {
                tool: tool.to_string(),
            });
        }
        Ok(self.result.clone())
    }

    async fn instructions(&self) -> Vec<(String, String)> {
        self.guidance.clone()
    }
}

#[derive(Clone)]
struct ScriptedProvider {
    responses: Arc<Mutex<Vec<String>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(String::from).collect(),
            )),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("script exhausted"));
        }
        Ok(ModelResponse::new(responses.remove(0)))
    }
}

fn agent(provider: ScriptedProvider, session: Arc<StubSession>) -> Agent<ScriptedProvider> {
    Agent::new(provider, session, AgentOptions::default())
}

#[tokio::test]
async fn agent_returns_final_response_without_tools() {
    let provider = ScriptedProvider::new(vec![r#"{"action":"final","response":"done"}"#]);
    let session = Arc::new(StubSession::browser());

    let outcome = agent(provider.clone(), session.clone())
        .run("say done")
        .await
        .expect("run");

    assert_eq!(outcome.response, "done");
    assert!(outcome.steps.is_empty());
    assert!(!outcome.hit_step_limit);
    assert!(session.calls.lock().await.is_empty());

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "gpt-4o");
    assert_eq!(requests[0].messages[0].role, MessageRole::System);
    assert!(requests[0].messages[0].content.contains("- browser_navigate"));
    assert_eq!(requests[0].messages[1].content, "say done");
}

#[tokio::test]
async fn agent_calls_tool_and_feeds_result_back() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"call_tool","tool":"browser_navigate","input":{"url":"https://example.com"}}"#,
        r#"{"action":"final","response":"Example Domain"}"#,
    ]);
    let session = Arc::new(StubSession::browser());

    let outcome = agent(provider.clone(), session.clone())
        .run("open example.com")
        .await
        .expect("run");

    assert_eq!(outcome.response, "Example Domain");
    assert_eq!(outcome.steps.len(), 1);
    assert!(outcome.steps[0].success);
    assert_eq!(outcome.steps[0].message.as_deref(), Some("ok"));

    let calls = session.calls.lock().await.clone();
    assert_eq!(
        calls,
        vec![(
            "browser_navigate".to_string(),
            json!({"url": "https://example.com"})
        )]
    );

    let requests = provider.requests().await;
    let follow_up = requests[1].messages.last().expect("tool result message");
    assert_eq!(follow_up.role, MessageRole::User);
    let payload: Value = serde_json::from_str(&follow_up.content).expect("json payload");
    assert_eq!(payload["tool_result"]["tool"], "browser_navigate");
    assert_eq!(payload["tool_result"]["success"], true);
}

#[tokio::test]
async fn unknown_tool_is_reported_to_the_model_instead_of_failing() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"call_tool","tool":"browser_teleport"}"#,
        r#"{"action":"final","response":"recovered"}"#,
    ]);

    let outcome = agent(provider.clone(), Arc::new(StubSession::browser()))
        .run("task")
        .await
        .expect("run");

    assert_eq!(outcome.response, "recovered");
    assert!(!outcome.steps[0].success);
    let requests = provider.requests().await;
    let feedback = &requests[1].messages.last().expect("feedback").content;
    assert!(feedback.contains("does not exist"));
}

#[tokio::test]
async fn tool_reported_errors_mark_the_step_unsuccessful() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"call_tool","tool":"browser_extract","input":{}}"#,
        r#"{"action":"final","response":"nothing found"}"#,
    ]);
    let session = Arc::new(StubSession {
        result: json!({"isError": true, "content": [{"type": "text", "text": "selector not found"}]}),
        ..StubSession::browser()
    });

    let outcome = agent(provider, session).run("task").await.expect("run");

    assert!(!outcome.steps[0].success);
    assert_eq!(outcome.steps[0].message.as_deref(), Some("selector not found"));
}

#[tokio::test]
async fn list_tools_pseudo_tool_returns_catalogue() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"call_tool","tool":"list_tools"}"#,
        r#"{"action":"final","response":"listed"}"#,
    ]);
    let session = Arc::new(StubSession::browser());

    let outcome = agent(provider, session.clone()).run("task").await.expect("run");

    assert_eq!(outcome.steps[0].tool, "list_tools");
    let catalogue = outcome.steps[0].message.as_deref().expect("catalogue");
    assert!(catalogue.contains("browser_extract"));
    assert!(session.calls.lock().await.is_empty());
}

#[tokio::test]
async fn transport_failure_ends_the_attempt() {
    let provider = ScriptedProvider::new(vec![r#"{"action":"call_tool","tool":"browser_navigate"}"#]);
    let session = Arc::new(StubSession {
        transport_failure: true,
        ..StubSession::browser()
    });

    let err = agent(provider, session).run("task").await.expect_err("must fail");
    assert!(matches!(
        err,
        AgentError::Tool(ToolError::Execution { ref tool, .. }) if tool == "browser_navigate"
    ));
}

#[tokio::test]
async fn step_limit_returns_stop_message() {
    let call = r#"{"action":"call_tool","tool":"browser_navigate"}"#;
    let provider = ScriptedProvider::new(vec![call, call, call]);
    let session = Arc::new(StubSession::browser());
    let options = AgentOptions {
        max_steps: 2,
        ..AgentOptions::default()
    };

    let outcome = Agent::new(provider, session.clone(), options)
        .run("loop forever")
        .await
        .expect("run");

    assert!(outcome.hit_step_limit);
    assert_eq!(
        outcome.response,
        "Agent stopped after reaching the maximum number of steps (2)."
    );
    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(session.calls.lock().await.len(), 2);
}

#[tokio::test]
async fn malformed_reply_triggers_correction_request() {
    let provider = ScriptedProvider::new(vec![
        "I will now open the page.",
        r#"{"action":"final","response":"fixed"}"#,
    ]);

    let outcome = agent(provider.clone(), Arc::new(StubSession::browser()))
        .run("task")
        .await
        .expect("run");

    assert_eq!(outcome.response, "fixed");
    let requests = provider.requests().await;
    assert_eq!(requests.len(), 2);
    let correction = requests[1].messages.last().expect("correction");
    assert!(correction.content.contains("Error details"));
}

#[tokio::test]
async fn persistent_malformed_replies_fail_the_attempt() {
    let provider = ScriptedProvider::new(vec!["nope", "still no", "no json", "never"]);

    let err = agent(provider.clone(), Arc::new(StubSession::browser()))
        .run("task")
        .await
        .expect_err("must fail");

    assert!(matches!(err, AgentError::InvalidResponse(_)));
    assert_eq!(provider.requests().await.len(), 4);
}

#[tokio::test]
async fn server_guidance_is_included_in_system_prompt() {
    let provider = ScriptedProvider::new(vec![r#"{"action":"final","response":"ok"}"#]);
    let session = Arc::new(StubSession {
        guidance: vec![("playwright".into(), "Prefer snapshots over screenshots.".into())],
        ..StubSession::browser()
    });

    agent(provider.clone(), session).run("task").await.expect("run");

    let system = &provider.requests().await[0].messages[0].content;
    assert!(system.contains("Server 'playwright' guidance: Prefer snapshots over screenshots."));
}

#[tokio::test(start_paused = true)]
async fn model_failure_is_retried_through_the_task_interface() {
    let provider = ScriptedProvider::new(vec![]);
    let agent = agent(provider.clone(), Arc::new(StubSession::browser()));
    let mut printed = TerminalObserver::new(Vec::new());

    assert!(agent.attempt("task").await.is_err());
    let outcome = run_with_retries(
        &agent,
        "task",
        &RetryPolicy::new(2, Duration::from_secs(2)),
        &mut printed,
    )
    .await;

    assert_eq!(outcome.attempts(), 2);
    assert_eq!(outcome.into_message(), "Agent failed after multiple attempts.");
    assert_eq!(provider.requests().await.len(), 3);
}
