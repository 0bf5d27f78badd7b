//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, text

use colored::Colorize;
use std::io::Write;

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Text => self.render_text(result_set),
        }
    }

    /// Render to a writer, followed by a newline
    pub fn render_to<W: Write>(&self, result_set: &ResultSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(result_set);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        if let Some(query) = &result_set.query {
            output.push_str(&format!("# {}\n\n", query));
        }

        let of_kind = |kind: Kind| -> Vec<&ResultItem> {
            result_set.items.iter().filter(|item| item.kind == kind).collect()
        };

        let errors = of_kind(Kind::Error);
        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        let records = of_kind(Kind::Record);
        if !records.is_empty() {
            output.push_str("## Records\n\n");
            for record in records.iter().filter_map(|item| item.record.as_ref()) {
                output.push_str(&format!("### `ID-{}` {}\n\n", record.id, record.title));
                output.push_str(&format!("- **Author**: {}\n", record.author));
                output.push_str(&format!("- **Description**: {}\n\n", record.description));
            }
        }

        let matches = of_kind(Kind::Match);
        if !matches.is_empty() {
            output.push_str("## Matches\n\n");
            for item in matches {
                if let Some(path) = &item.path {
                    output.push_str(&format!("### `{}`", path));
                    if let Some(range) = &item.range {
                        output.push_str(&format!(" (lines {}-{})", range.start, range.end));
                    }
                    output.push('\n');
                }
                if let Some(excerpt) = &item.excerpt {
                    output.push_str("\n```\n");
                    output.push_str(excerpt);
                    if !excerpt.ends_with('\n') {
                        output.push('\n');
                    }
                    output.push_str("```\n");
                }
                output.push('\n');
            }
        }

        let documents = of_kind(Kind::Document);
        if !documents.is_empty() {
            output.push_str("## Documents\n\n");
            for item in documents {
                if let Some(path) = &item.path {
                    output.push_str(&format!("- `{}`", path));
                    if let Some(size) = item.meta.size {
                        output.push_str(&format!(" ({} bytes)", size));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        for item in of_kind(Kind::Stats) {
            output.push_str("## Stats\n\n");
            for (key, value) in stats_entries(item) {
                output.push_str(&format!("- **{}**: {}\n", key, value));
            }
            output.push('\n');
        }

        if result_set.hits().next().is_none() {
            output.push_str("_No results._\n");
        }

        output
    }

    /// Render in the classic console layout, one `----` block per result
    fn render_text(&self, result_set: &ResultSet) -> String {
        let mut lines = Vec::new();

        if let Some(query) = &result_set.query {
            lines.push(query.clone());
        }

        let mut document_no = 0usize;
        for item in &result_set.items {
            match item.kind {
                Kind::Record => {
                    if let Some(record) = &item.record {
                        lines.push("----".to_string());
                        lines.push(format!("{} {}", self.key("id:"), record.id));
                        lines.push(format!("{} {}", self.key("title:"), record.title));
                        lines.push(format!("{} {}", self.key("author:"), record.author));
                        lines.push(format!(
                            "{} {}",
                            self.key("description:"),
                            record.description
                        ));
                    }
                }
                Kind::Match => {
                    lines.push("----".to_string());
                    if let Some(path) = &item.path {
                        lines.push(format!("{} {}", self.key("file:"), path));
                    }
                    if let Some(range) = &item.range {
                        lines.push(format!("{} {}-{}", self.key("lines:"), range.start, range.end));
                    }
                }
                Kind::Document => {
                    document_no += 1;
                    if let Some(path) = &item.path {
                        lines.push(format!("{:2}. {}", document_no, path));
                    }
                }
                Kind::Stats => {
                    for (key, value) in stats_entries(item) {
                        lines.push(format!("{} {}", self.key(&format!("{}:", key)), value));
                    }
                }
                Kind::Error => {
                    for error in &item.errors {
                        let label = format!("error [{}]", error.code);
                        let label = if self.config.color {
                            label.red().to_string()
                        } else {
                            label
                        };
                        lines.push(format!("{} {}", label, error.message));
                    }
                }
            }
        }

        if result_set.hits().next().is_none() {
            lines.push("----".to_string());
            lines.push("not found".to_string());
        }

        lines.join("\n")
    }

    fn key(&self, key: &str) -> String {
        if self.config.color {
            key.bold().cyan().to_string()
        } else {
            key.to_string()
        }
    }
}

/// Flatten a stats payload into display pairs
fn stats_entries(item: &ResultItem) -> Vec<(String, String)> {
    let Some(serde_json::Value::Object(map)) = &item.data else {
        return Vec::new();
    };

    map.iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}
