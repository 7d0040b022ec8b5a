//! Output formatting for result envelopes (table, JSON, markdown, CSV).

use crate::auction::{Item, ItemDetail, ResultEnvelope};
use crate::config::OutputFormat;

const TABLE_TITLE_WIDTH: usize = 50;
const MARKDOWN_TITLE_WIDTH: usize = 40;

/// Formats envelopes and item details for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a complete search result.
    pub fn format_envelope(&self, envelope: &ResultEnvelope) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(envelope).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_envelope(envelope),
            OutputFormat::Markdown => self.markdown_envelope(envelope),
            OutputFormat::Csv => match &envelope.error {
                Some(error) => format!("error\n{}", csv_escape(error)),
                None => self.csv_items(&envelope.items),
            },
        }
    }

    /// Formats a single item detail.
    pub fn format_item_detail(&self, detail: &ItemDetail) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(detail).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => format!(
                "title,url,error\n{},{},{}",
                csv_escape(&detail.title),
                csv_escape(&detail.url),
                csv_escape(detail.error.as_deref().unwrap_or_default())
            ),
            OutputFormat::Markdown => {
                let mut lines = vec![format!("## {}", detail.title), String::new()];
                lines.push(format!("- **URL:** <{}>", detail.url));
                if let Some(error) = &detail.error {
                    lines.push(format!("- **Error:** {}", error));
                }
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("Title:   {}", detail.title),
                    format!("URL:     {}", detail.url),
                ];
                if let Some(error) = &detail.error {
                    lines.push(format!("Error:   {}", error));
                }
                lines.join("\n")
            }
        }
    }

    // Table formatting

    fn table_envelope(&self, envelope: &ResultEnvelope) -> String {
        if let Some(error) = &envelope.error {
            return format!("Error: {}", error);
        }

        if envelope.items.is_empty() {
            return "No items found.".to_string();
        }

        let mut lines = Vec::new();

        lines.push(format!(
            "{:>10}  {:>5}  {:<12}  {}",
            "Price", "Bids", "Remaining", "Title"
        ));
        lines.push(format!(
            "{:-<10}  {:-<5}  {:-<12}  {:-<width$}",
            "",
            "",
            "",
            "",
            width = TABLE_TITLE_WIDTH
        ));

        for item in &envelope.items {
            lines.push(format!(
                "{:>10}  {:>5}  {:<12}  {}",
                format!("¥{}", item.price),
                item.bid_count,
                item.remaining_time,
                truncate(&item.title, TABLE_TITLE_WIDTH)
            ));
        }

        if !envelope.categories.is_empty() {
            lines.push(String::new());
            lines.push("Categories:".to_string());
            for category in &envelope.categories {
                lines.push(format!("  {:<12} {}", category.id, category.name));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "Page {}: {} items",
            envelope.request.page,
            envelope.items.len()
        ));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_envelope(&self, envelope: &ResultEnvelope) -> String {
        if let Some(error) = &envelope.error {
            return format!("**Error:** {}", error);
        }

        let mut lines = Vec::new();

        lines.push("| Price | Bids | Remaining | Shipping | Title |".to_string());
        lines.push("|-------|------|-----------|----------|-------|".to_string());

        for item in &envelope.items {
            lines.push(format!(
                "| ¥{} | {} | {} | {} | [{}]({}) |",
                item.price,
                item.bid_count,
                markdown_escape(&item.remaining_time),
                markdown_escape(&item.shipping_fee),
                markdown_escape(&truncate(&item.title, MARKDOWN_TITLE_WIDTH)),
                item.link.replace('|', "%7C")
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items found*", envelope.items.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_items(&self, items: &[Item]) -> String {
        let mut lines =
            vec!["title,price,bid_count,remaining_time,shipping_fee,link,image_url".to_string()];

        for item in items {
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                csv_escape(&item.title),
                item.price,
                item.bid_count,
                csv_escape(&item.remaining_time),
                csv_escape(&item.shipping_fee),
                csv_escape(&item.link),
                csv_escape(&item.image_url)
            ));
        }

        lines.join("\n")
    }
}

/// Shortens text to `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

/// Escapes cell text so a `|` cannot end a markdown table cell early.
fn markdown_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
