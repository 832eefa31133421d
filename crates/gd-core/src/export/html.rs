//! HTML ("PDF") exporter
//!
//! Produces a self-contained HTML page with one table. It is not a PDF;
//! users open it in a browser and print or convert it.

use super::exporter::{ExportContext, Exporter};
use super::tabular::{cells, COLUMNS};
use crate::error::Result;
use crate::report::ReportDataset;
use crate::types::ExportFormat;

const STYLE: &str = "\
body { font-family: Arial, Helvetica, sans-serif; margin: 24px; color: #1f2937; }
h1 { font-size: 20px; margin-bottom: 4px; }
.meta { color: #6b7280; font-size: 12px; margin-bottom: 16px; }
table { width: 100%; border-collapse: collapse; font-size: 12px; }
th, td { border: 1px solid #e5e7eb; padding: 6px 8px; text-align: left; }
th { background: #f3f4f6; }
tbody tr:nth-child(even) { background: #fafafa; }
.footer { margin-top: 12px; color: #6b7280; font-size: 11px; }";

/// HTML table exporter
pub struct HtmlExporter {
    title: String,
}

impl HtmlExporter {
    pub fn new() -> Self {
        Self::with_title("Admin Report")
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn render_head(&self, dataset: &ReportDataset) -> String {
        let mut head = String::new();
        head.push_str("<head>\n");
        head.push_str("<meta charset=\"utf-8\">\n");
        head.push_str(&format!(
            "<title>{} - {}</title>\n",
            html_escape(&self.title),
            dataset.period
        ));
        head.push_str(&format!("<style>\n{}\n</style>\n", STYLE));
        head.push_str("</head>\n");
        head
    }

    fn render_table(&self, dataset: &ReportDataset) -> String {
        let mut table = String::new();
        table.push_str("<table>\n<thead>\n<tr>");
        for column in COLUMNS {
            table.push_str(&format!("<th>{}</th>", column));
        }
        table.push_str("</tr>\n</thead>\n<tbody>\n");

        for record in dataset.iter() {
            table.push_str("<tr>");
            for cell in cells(record).iter() {
                table.push_str(&format!("<td>{}</td>", html_escape(&cell.text)));
            }
            table.push_str("</tr>\n");
        }

        table.push_str("</tbody>\n</table>\n");
        table
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for HtmlExporter {
    fn encode(&self, dataset: &ReportDataset, ctx: &ExportContext) -> Result<String> {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
        html.push_str(&self.render_head(dataset));
        html.push_str("<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", html_escape(&self.title)));
        html.push_str(&format!(
            "<p class=\"meta\">Period: {} | Exported: {}</p>\n",
            dataset.period,
            ctx.exported_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        html.push_str(&self.render_table(dataset));
        html.push_str(&format!(
            "<p class=\"footer\">{} records</p>\n",
            dataset.len()
        ));
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
