//! Tool executor — runs one invocation through the whole pipeline.
//!
//! validate → query → fetch → render → size guard → envelope. Every failure
//! is folded into an `isError` result here; nothing propagates past `call`.

use crate::api::ApiTransport;
use crate::render::{self, enforce_character_limit, RenderOptions, SizeLimit};
use crate::tools::catalog::ToolCatalog;
use crate::tools::definitions::fathom_catalog;
use crate::tools::query::QueryParameters;
use crate::tools::result::ToolResult;
use crate::types::{Error, OutputConfig, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Stateless pipeline shared by every concurrent call.
pub struct ToolExecutor {
    catalog: ToolCatalog,
    transport: Arc<dyn ApiTransport>,
    render_options: RenderOptions,
    size_limit: SizeLimit,
}

impl std::fmt::Debug for ToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolExecutor")
            .field("tools", &self.catalog.list_ids())
            .field("render_options", &self.render_options)
            .field("size_limit", &self.size_limit)
            .finish_non_exhaustive()
    }
}

impl ToolExecutor {
    /// Executor over the Fathom tool catalog.
    pub fn new(transport: Arc<dyn ApiTransport>, output: &OutputConfig) -> Result<Self> {
        Ok(Self::with_catalog(fathom_catalog()?, transport, output))
    }

    pub fn with_catalog(
        catalog: ToolCatalog,
        transport: Arc<dyn ApiTransport>,
        output: &OutputConfig,
    ) -> Self {
        Self {
            catalog,
            transport,
            render_options: RenderOptions::from(output),
            size_limit: SizeLimit::from(output),
        }
    }

    /// Tool descriptors for `tools/list`, sorted by name.
    pub fn list_tools(&self) -> Vec<Value> {
        self.catalog
            .list_entries()
            .into_iter()
            .map(|entry| entry.to_mcp_tool())
            .collect()
    }

    /// Run one tool call. Never fails: errors become `isError` results.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        let span = tracing::info_span!("tool_call", tool = name);
        async {
            let started = Instant::now();
            match self.run(name, arguments).await {
                Ok(result) => {
                    tracing::info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        chars = result.text.chars().count(),
                        "Tool call succeeded"
                    );
                    result
                }
                Err(err) => {
                    if err.is_transport() {
                        tracing::error!(error = %err, "Tool call failed");
                    } else {
                        tracing::warn!(error = %err, "Tool call rejected");
                    }
                    ToolResult::from_error(&err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let entry = self
            .catalog
            .get(name)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {name}")))?;

        let input = entry.validate(&arguments)?;
        let query = QueryParameters::from_input(entry, &input);
        let endpoint = entry.resolve_endpoint(&input)?;
        tracing::debug!(endpoint = %endpoint, params = ?query.keys().collect::<Vec<_>>(), "Dispatching request");

        let payload = self.transport.get(&endpoint, &query).await?;
        let page = render::render(entry.kind, payload, &input, &self.render_options)?;
        let output = enforce_character_limit(page, input.response_format(), &self.size_limit)?;

        Ok(ToolResult::success(output.text, Some(output.structured)))
    }
}
