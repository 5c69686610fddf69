//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes annotation, scoring and the sentence and word checks over stdio so
//! editors and assistants can request the same judgments the CLI prints.
//!
//! Each `#[tool]` method parses its parameters, resolves them against the
//! loaded [`Config`], and delegates to `gradewise_core`. Results are returned
//! as pretty-printed JSON text content.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use gradewise_core::{
    AnalysisContext, Config, Document, EasyWordSet, TargetGrade, build_annotations, readability,
};

use crate::commands::{load_easy_words, sentence, word};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `annotate_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnnotateTextParams {
    /// The text to annotate.
    pub text: String,
    /// How to read `text`: "plain", "markdown", or "json" (a document snapshot).
    #[serde(default = "default_text_format")]
    pub format: String,
    /// Target reading grade: 6, 8 or 10. Defaults to the configured grade.
    pub target_grade: Option<u8>,
    /// Whether to flag individual hard words. Defaults to the configured value.
    pub show_hard_words: Option<bool>,
}

fn default_text_format() -> String {
    "plain".to_string()
}

/// Parameters for the `score_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreTextParams {
    /// The text to score.
    pub text: String,
    /// Maximum acceptable Flesch-Kincaid grade level.
    pub max_grade: Option<f64>,
    /// Whether to strip markdown formatting before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `analyze_sentence` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeSentenceParams {
    /// A single sentence.
    pub text: String,
    /// Target reading grade: 6, 8 or 10.
    pub target_grade: Option<u8>,
}

/// Parameters for the `check_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckWordParams {
    /// The token, as it appears in text.
    pub word: String,
    /// Whether the token opens its sentence.
    #[serde(default)]
    pub first: bool,
    /// Target reading grade: 6, 8 or 10.
    pub target_grade: Option<u8>,
}

/// MCP server exposing gradewise analysis to AI assistants.
#[derive(Clone)]
pub struct GradewiseServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    config: Arc<Config>,
    easy_words: Arc<EasyWordSet>,
    max_input_bytes: Option<usize>,
}

impl Default for GradewiseServer {
    fn default() -> Self {
        Self::new(Config::default(), Some(gradewise_core::DEFAULT_MAX_INPUT_BYTES))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl GradewiseServer {
    /// Create a server over the given configuration.
    ///
    /// The easy-word list is loaded once here; a missing or malformed list
    /// falls back to the built-in seed.
    pub fn new(config: Config, max_input_bytes: Option<usize>) -> Self {
        let easy_words = load_easy_words(config.easy_words_path.as_deref());
        Self {
            tool_router: Self::tool_router(),
            config: Arc::new(config),
            easy_words: Arc::new(easy_words),
            max_input_bytes,
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    fn target_grade(&self, requested: Option<u8>) -> Result<TargetGrade, McpError> {
        requested.map_or(Ok(self.config.target_grade), |grade| {
            TargetGrade::try_from(grade).map_err(|e| McpError::invalid_params(e, None))
        })
    }

    /// Get project information.
    #[tool(description = "Get gradewise name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "target_grade": self.config.target_grade,
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Build the annotation set for a document.
    #[tool(
        description = "Annotate text for a target reading grade. Returns red/yellow/blue sentence ranges and hard-word ranges with tooltips."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", format = %params.format))]
    fn annotate_text(
        &self,
        Parameters(params): Parameters<AnnotateTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "annotate_text", "executing MCP tool");
        self.check_size(&params.text)?;

        let document = match params.format.as_str() {
            "plain" | "text" => Document::from_plain_text(&params.text),
            "markdown" | "md" => Document::from_markdown(&params.text),
            "json" => Document::from_json(&params.text)
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?,
            other => {
                return Err(McpError::invalid_params(
                    format!("unknown format {other:?}; expected plain, markdown, or json"),
                    None,
                ));
            }
        };

        let mut settings = self.config.analysis_settings();
        settings.target_grade = self.target_grade(params.target_grade)?;
        if let Some(show) = params.show_hard_words {
            settings.show_hard_words = show;
        }

        let set = build_annotations(&document, &AnalysisContext::new(&settings, &self.easy_words));
        let json = to_json(&set)?;

        tracing::info!(
            tool = "annotate_text",
            annotations = set.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Aggregate Flesch-Kincaid statistics.
    #[tool(
        description = "Score readability of text. Returns Flesch-Kincaid grade, reading ease, and counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_text(
        &self,
        Parameters(params): Parameters<ScoreTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "score_text",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );
        self.check_size(&params.text)?;

        let max_grade = params.max_grade.or(self.config.max_grade);
        let report = readability::check_readability(&params.text, params.strip_markdown, max_grade)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let json = to_json(&report)?;

        tracing::info!(tool = "score_text", grade = report.grade, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Metrics and classification for one sentence.
    #[tool(
        description = "Analyze one sentence: word and syllable counts, grade, and the red/yellow/blue tag for a target grade."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_sentence(
        &self,
        Parameters(params): Parameters<AnalyzeSentenceParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_sentence", "executing MCP tool");
        self.check_size(&params.text)?;

        let target_grade = self.target_grade(params.target_grade)?;
        let report = sentence::sentence_report(&params.text, target_grade, &self.config);
        let json = to_json(&report)?;

        tracing::info!(tool = "analyze_sentence", tag = ?report.tag, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Hard-word verdict for one token.
    #[tool(
        description = "Check whether a word would be flagged as hard for a target grade, with a simpler suggestion when known."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn check_word(
        &self,
        Parameters(params): Parameters<CheckWordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_word", first = params.first, "executing MCP tool");
        self.check_size(&params.word)?;

        let target_grade = self.target_grade(params.target_grade)?;
        let report = word::word_report(
            &params.word,
            params.first,
            target_grade,
            &self.config,
            &self.easy_words,
        );
        let json = to_json(&report)?;

        tracing::info!(
            tool = "check_word",
            hard = report.verdict.hard().is_some(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for GradewiseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Annotate text for a target reading grade (6, 8 or 10), \
                 score readability, or check single sentences and words.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
