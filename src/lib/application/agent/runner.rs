use super::errors::AgentError;
use super::models::{AgentOptions, AgentOutcome, AgentStep, step_limit_response};
use super::runtime::{
    AgentDirective, ToolRuntime, correction_message, parse_agent_action, tool_result_message,
};
use crate::application::retry::RetryableTask;
use crate::application::tooling::ToolSession;
use crate::model::{ModelProvider, ModelRequest};
use crate::types::ChatMessage;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Maximum correction requests after an unparseable model reply
const MAX_JSON_RETRIES: u8 = 3;

macro_rules! step_event {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// A model and a tool session bound together under one step budget.
pub struct Agent<P: ModelProvider> {
    provider: P,
    runtime: ToolRuntime,
    options: AgentOptions,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(provider: P, session: Arc<dyn ToolSession>, options: AgentOptions) -> Self {
        Self {
            provider,
            runtime: ToolRuntime::new(session),
            options,
        }
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Work on `prompt` until the model gives a final answer or `max_steps`
    /// tool calls have been made.
    pub async fn run(&self, prompt: &str) -> Result<AgentOutcome, AgentError> {
        let session_id = Uuid::new_v4().to_string();
        info!(
            session_id = session_id.as_str(),
            model = self.options.model.as_str(),
            max_steps = self.options.max_steps,
            "Agent run started"
        );

        let context = self.runtime.build_context().await;
        let mut messages = vec![
            ChatMessage::system(self.runtime.compose_system_instructions(&context)),
            ChatMessage::user(prompt),
        ];
        let mut steps: Vec<AgentStep> = Vec::new();

        loop {
            let reply = self.complete(&mut messages, &session_id).await?;
            let directive = self
                .parse_with_retry(reply, &mut messages, &session_id)
                .await?;

            match directive {
                AgentDirective::Final { response } => {
                    info!(
                        session_id = session_id.as_str(),
                        steps = steps.len(),
                        "Agent returned final response"
                    );
                    return Ok(AgentOutcome {
                        session_id,
                        response,
                        steps,
                        hit_step_limit: false,
                    });
                }
                AgentDirective::CallTool { tool, input } => {
                    if steps.len() >= self.options.max_steps {
                        warn!(
                            session_id = session_id.as_str(),
                            max_steps = self.options.max_steps,
                            "Agent reached the maximum number of steps"
                        );
                        return Ok(AgentOutcome {
                            session_id,
                            response: step_limit_response(self.options.max_steps),
                            steps,
                            hit_step_limit: true,
                        });
                    }

                    step_event!(
                        self.options.verbose,
                        session_id = session_id.as_str(),
                        step = steps.len() + 1,
                        tool = %tool,
                        input = %input,
                        "Agent requested tool execution"
                    );
                    let execution = self.runtime.execute(&tool, input).await?;
                    step_event!(
                        self.options.verbose,
                        session_id = session_id.as_str(),
                        tool = %execution.tool,
                        success = execution.success,
                        "Tool result returned to model"
                    );

                    messages.push(ChatMessage::user(tool_result_message(&execution)));
                    steps.push(AgentStep {
                        tool: execution.tool,
                        input: execution.input,
                        success: execution.success,
                        message: execution.message,
                    });
                }
            }
        }
    }

    /// Send the conversation and append the assistant's reply to it.
    async fn complete(
        &self,
        messages: &mut Vec<ChatMessage>,
        session_id: &str,
    ) -> Result<String, AgentError> {
        debug!(
            session_id,
            history = messages.len(),
            "Submitting agent turn to model provider"
        );
        let response = self
            .provider
            .chat(ModelRequest {
                model: self.options.model.clone(),
                messages: messages.clone(),
            })
            .await?;
        let content = response.message.content.clone();
        messages.push(response.message);
        Ok(content)
    }

    /// Parse the reply, asking the model to correct itself when it is not a
    /// valid directive.
    async fn parse_with_retry(
        &self,
        reply: String,
        messages: &mut Vec<ChatMessage>,
        session_id: &str,
    ) -> Result<AgentDirective, AgentError> {
        let mut retry_count = 0u8;
        let mut current = reply;

        loop {
            match parse_agent_action(&current) {
                Ok(directive) => return Ok(directive),
                Err(reason) if retry_count < MAX_JSON_RETRIES => {
                    retry_count += 1;
                    warn!(
                        session_id,
                        attempt = retry_count,
                        max_attempts = MAX_JSON_RETRIES,
                        error = %reason,
                        "JSON parse failed, requesting correction from model"
                    );
                    messages.push(ChatMessage::user(correction_message(&reason)));
                    current = self.complete(messages, session_id).await?;
                }
                Err(reason) => {
                    warn!(session_id, attempts = retry_count, "JSON parse failed after max retries");
                    return Err(AgentError::InvalidResponse(format!(
                        "invalid JSON after {MAX_JSON_RETRIES} correction attempts: {reason}"
                    )));
                }
            }
        }
    }
}

#[async_trait]
impl<P: ModelProvider> RetryableTask for Agent<P> {
    type Error = AgentError;

    async fn attempt(&self, prompt: &str) -> Result<String, AgentError> {
        self.run(prompt).await.map(|outcome| outcome.response)
    }
}
