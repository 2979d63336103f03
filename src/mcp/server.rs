//! rmcp binding for the vault dispatcher

use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, GetPromptRequestParam, GetPromptResult,
        ListPromptsResult, ListToolsResult, PaginatedRequestParam, Prompt, PromptArgument,
        PromptMessage, PromptMessageRole, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use tracing::info;

use super::catalog::{ArgumentSpec, PromptDescriptor, ToolDescriptor, PROMPTS, TOOLS};
use super::dispatch::{cancellable, Dispatcher};
use super::prompts::{PromptOutput, Role};
use super::tools::ToolOutput;
use crate::client::{ClientConfig, RestClient, VaultApi};

/// Vault MCP Service
pub struct VaultService<V: ?Sized = RestClient> {
    dispatcher: Dispatcher<V>,
}

impl<V: ?Sized> Clone for VaultService<V> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<V: VaultApi + ?Sized> VaultService<V> {
    pub fn new(vault: Arc<V>) -> Self {
        Self {
            dispatcher: Dispatcher::new(vault),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<V> {
        &self.dispatcher
    }
}

pub fn tool_model(tool: &ToolDescriptor) -> Tool {
    Tool::new(tool.name, tool.description, Arc::new(tool.input_schema()))
}

fn prompt_argument(arg: &ArgumentSpec) -> PromptArgument {
    PromptArgument {
        name: arg.name.to_string(),
        title: None,
        description: Some(arg.description.to_string()),
        required: Some(arg.required),
    }
}

pub fn prompt_model(prompt: &PromptDescriptor) -> Prompt {
    Prompt::new(
        prompt.name,
        Some(prompt.description),
        Some(prompt.arguments.iter().map(prompt_argument).collect()),
    )
}

pub fn prompt_result(output: PromptOutput) -> GetPromptResult {
    let messages = output
        .messages
        .into_iter()
        .map(|m| {
            let role = match m.role {
                Role::User => PromptMessageRole::User,
                Role::Assistant => PromptMessageRole::Assistant,
            };
            PromptMessage::new_text(role, m.text)
        })
        .collect();
    GetPromptResult {
        description: Some(output.description),
        messages,
    }
}

pub fn tool_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.text)];
    if output.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl<V: VaultApi + ?Sized + 'static> ServerHandler for VaultService<V> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_tools()
                .build(),
            instructions: Some(
                "Obsidian vault MCP server. Read and update notes through the Local REST API, \
                 and build summarization and analysis prompts from note content."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(
            TOOLS.iter().map(tool_model).collect(),
        ))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let output = cancellable(
            self.dispatcher.call_tool(&request.name, request.arguments),
            context.ct.cancelled(),
        )
        .await?;
        Ok(tool_result(output))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(
            PROMPTS.iter().map(prompt_model).collect(),
        ))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let output = cancellable(
            self.dispatcher.get_prompt(&request.name, request.arguments),
            context.ct.cancelled(),
        )
        .await?;
        Ok(prompt_result(output))
    }
}

/// Run the MCP server over stdio
pub async fn run_mcp_server(config: ClientConfig) -> Result<()> {
    use tokio::io::{stdin, stdout};

    let client = RestClient::new(config)?;
    info!(base_url = client.base_url(), layout = %client.layout(), "starting MCP server on stdio");

    let service = VaultService::new(Arc::new(client));
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
