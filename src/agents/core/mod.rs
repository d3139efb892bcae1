//! Tool-calling agent loop (reasoning + action)
//!
//! One `run` per chat request: load the thread's checkpoint, append the
//! user turn, then alternate model completions and tool executions until
//! the model answers without requesting a tool, bounded by
//! `max_iterations`. Tool failures are fed back to the model as tool
//! results rather than aborting the run, so the model can correct its
//! arguments or explain the failure to the user.

use std::sync::Arc;

use serde_json::json;

use crate::agents::domain::{AgentResponse, Message, ToolCallResult};
use crate::agents::error::{AgentError, AgentResult};
use crate::agents::llm::{CompletionRequest, LlmProvider};
use crate::agents::memory::{sliding_window, ConversationStore};
use crate::config::AgentSettings;
use crate::domain::{RunContext, ToolPort};

/// The conversational ticket agent
pub struct ReActAgent {
    config: AgentSettings,
    llm: Arc<dyn LlmProvider>,
    memory: Arc<dyn ConversationStore>,
    tools: Arc<dyn ToolPort>,
}

impl ReActAgent {
    /// Create a new agent
    pub fn new(
        config: AgentSettings,
        llm: Arc<dyn LlmProvider>,
        memory: Arc<dyn ConversationStore>,
        tools: Arc<dyn ToolPort>,
    ) -> Self {
        Self {
            config,
            llm,
            memory,
            tools,
        }
    }

    /// Process one user message within a thread and produce the final reply
    pub async fn run(&self, ctx: &RunContext, input: &str) -> AgentResult<AgentResponse> {
        let mut session = self
            .memory
            .get_or_create(&ctx.thread_id, &ctx.user_id)
            .await?;
        session.add_message(Message::user(input));

        // Prompt = system message + trimmed thread history. Tool traffic
        // below is appended to this working copy only, never checkpointed.
        let mut messages = vec![Message::system(&self.config.system_prompt)];
        messages.extend(sliding_window(
            &session.messages,
            self.config.history_window,
        ));

        let tool_definitions: Vec<_> = self
            .tools
            .list_tools()
            .into_iter()
            .map(|t| crate::agents::domain::ToolDefinition {
                name: t.name,
                description: t.description,
                parameters: t.input_schema,
            })
            .collect();

        let mut all_tool_calls: Vec<ToolCallResult> = Vec::new();
        let mut final_content: Option<String> = None;
        let mut iterations = 0;

        for _ in 0..self.config.max_iterations {
            iterations += 1;

            let request = CompletionRequest {
                messages: messages.clone(),
                temperature: self.config.temperature,
                max_tokens: None,
                tools: if tool_definitions.is_empty() {
                    None
                } else {
                    Some(tool_definitions.clone())
                },
            };

            let response = self.llm.complete(request).await?;

            let tool_calls = response.message.tool_calls.clone().unwrap_or_default();
            if tool_calls.is_empty() {
                final_content = Some(response.message.content);
                break;
            }

            messages.push(response.message);

            for tool_call in &tool_calls {
                tracing::debug!(tool = %tool_call.name, "Executing tool call");

                let result = self
                    .tools
                    .execute_tool(&tool_call.name, tool_call.arguments.clone(), ctx)
                    .await;

                let tool_result = match result {
                    Ok(output) => ToolCallResult::success(
                        tool_call.id.clone(),
                        tool_call.name.clone(),
                        tool_call.arguments.clone(),
                        output,
                    ),
                    Err(e) => {
                        tracing::warn!(tool = %tool_call.name, error = %e, "Tool call failed");
                        ToolCallResult::failure(
                            tool_call.id.clone(),
                            tool_call.name.clone(),
                            tool_call.arguments.clone(),
                            e.to_string(),
                        )
                    }
                };

                let output = if tool_result.success {
                    tool_result.output.clone()
                } else {
                    json!({ "error": tool_result.error })
                };
                messages.push(Message::tool_result(&tool_call.id, &output));

                all_tool_calls.push(tool_result);
            }
        }

        let Some(final_content) = final_content else {
            return Err(AgentError::MaxIterations(self.config.max_iterations));
        };

        session.add_message(Message::assistant(&final_content));
        if let Err(e) = self.memory.save(&session).await {
            tracing::warn!("Failed to checkpoint conversation: {}", e);
        }

        Ok(AgentResponse {
            message: final_content,
            tool_calls: all_tool_calls,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::error::LlmResult;
    use crate::agents::llm::{CompletionRequest, CompletionResponse, FinishReason, LlmProvider};
    use crate::agents::memory::InMemoryStore;
    use crate::domain::Tool;
    use async_trait::async_trait;
    use serde_json::Value;

    struct EchoTools;

    #[async_trait]
    impl ToolPort for EchoTools {
        async fn execute_tool(
            &self,
            _name: &str,
            args: Value,
            _ctx: &RunContext,
        ) -> anyhow::Result<Value> {
            Ok(args)
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![Tool {
                name: "echo".to_string(),
                description: "Echo the arguments".to_string(),
                input_schema: json!({ "type": "object", "properties": {} }),
            }]
        }
    }

    /// Provider that requests the same tool call forever
    struct LoopingProvider;

    #[async_trait]
    impl LlmProvider for LoopingProvider {
        fn name(&self) -> &str {
            "looping"
        }

        fn model(&self) -> &str {
            "looping"
        }

        async fn complete(&self, _request: CompletionRequest) -> LlmResult<CompletionResponse> {
            Ok(CompletionResponse {
                message: Message::assistant_with_tools(
                    "",
                    vec![crate::agents::domain::ToolCall::new(
                        "call_loop",
                        "echo",
                        json!({}),
                    )],
                ),
                finish_reason: FinishReason::ToolCalls,
                usage: None,
            })
        }
    }

    /// Provider that always answers directly
    struct DirectProvider;

    #[async_trait]
    impl LlmProvider for DirectProvider {
        fn name(&self) -> &str {
            "direct"
        }

        fn model(&self) -> &str {
            "direct"
        }

        async fn complete(&self, _request: CompletionRequest) -> LlmResult<CompletionResponse> {
            Ok(CompletionResponse {
                message: Message::assistant("All done."),
                finish_reason: FinishReason::Stop,
                usage: None,
            })
        }
    }

    fn agent(llm: Arc<dyn LlmProvider>, memory: Arc<dyn ConversationStore>) -> ReActAgent {
        let config = AgentSettings {
            max_iterations: 3,
            ..AgentSettings::default()
        };
        ReActAgent::new(config, llm, memory, Arc::new(EchoTools))
    }

    fn ctx() -> RunContext {
        RunContext {
            user_id: "u1".to_string(),
            thread_id: "t1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_direct_answer_is_checkpointed() {
        let memory = Arc::new(InMemoryStore::new());
        let agent = agent(Arc::new(DirectProvider), memory.clone());

        let response = agent.run(&ctx(), "hello").await.unwrap();
        assert_eq!(response.message, "All done.");
        assert_eq!(response.iterations, 1);
        assert!(response.tool_calls.is_empty());

        // User turn and final assistant turn persisted, nothing else
        let session = memory.load("t1").await.unwrap().unwrap();
        assert_eq!(session.message_count(), 2);
        assert_eq!(session.messages[0].content, "hello");
        assert_eq!(session.messages[1].content, "All done.");
    }

    #[tokio::test]
    async fn test_iteration_bound_is_enforced() {
        let memory = Arc::new(InMemoryStore::new());
        let agent = agent(Arc::new(LoopingProvider), memory.clone());

        let err = agent.run(&ctx(), "loop").await.unwrap_err();
        assert!(matches!(err, AgentError::MaxIterations(3)));

        // Nothing is checkpointed for a failed run
        assert!(memory.load("t1").await.unwrap().is_none());
    }
}
