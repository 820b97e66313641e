//! HTML Report Generator Module
//! Writes the dashboard page as a standalone HTML file with embedded Plotly figures.

use crate::charts::PlotlyRenderer;
use crate::presenter::Page;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = "body{font-family:sans-serif;max-width:1100px;margin:2em auto;padding:0 1em;}\
.success{background:#d4edda;color:#155724;padding:.75em 1em;border-radius:4px;}\
.error{background:#f8d7da;color:#721c24;padding:.75em 1em;border-radius:4px;}";

/// HTML report for a dashboard page
pub struct HtmlReport;

impl HtmlReport {
    /// Render a ready page.
    pub fn render(page: &Page) -> String {
        let mut body = String::new();
        body.push_str(&format!("<h1>{}</h1>\n", escape_html(&page.title)));
        body.push_str(&format!("<p>{}</p>\n", escape_html(&page.description)));
        body.push_str(&format!(
            "<div class=\"success\">{}</div>\n",
            escape_html(&page.status)
        ));

        for (idx, section) in page.sections.iter().enumerate() {
            let figure = PlotlyRenderer::figure(&section.chart);
            let div_id = format!("figure-{}", idx + 1);

            body.push_str(&format!("<h3>{}</h3>\n", escape_html(&section.header)));
            body.push_str(&format!("<div id=\"{div_id}\"></div>\n"));
            body.push_str(&format!(
                "<script>(function(){{var f={};Plotly.newPlot('{div_id}',f.data,f.layout).then(function(){{if(f.frames){{Plotly.addFrames('{div_id}',f.frames);}}}});}})();</script>\n",
                script_safe(&figure.to_string())
            ));
        }

        Self::document(&page.title, &body)
    }

    /// Render a page that failed to load: title, description and the error only.
    pub fn render_failure(title: &str, description: &str, error: &str) -> String {
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<div class=\"error\">{}</div>\n",
            escape_html(title),
            escape_html(description),
            escape_html(error)
        );
        Self::document(title, &body)
    }

    /// Write a ready page to `output_path`.
    pub fn write(page: &Page, output_path: &Path) -> Result<()> {
        Self::write_document(&Self::render(page), output_path)?;
        log::info!(
            "Report written: {} ({} charts)",
            output_path.display(),
            page.chart_count()
        );
        Ok(())
    }

    /// Write the error-only page for a failed load.
    pub fn write_failure(title: &str, description: &str, error: &str, output_path: &Path) -> Result<()> {
        Self::write_document(&Self::render_failure(title, description, error), output_path)?;
        log::info!("Failure report written: {}", output_path.display());
        Ok(())
    }

    fn write_document(html: &str, output_path: &Path) -> Result<()> {
        fs::write(output_path, html)
            .with_context(|| format!("Failed to write report to {}", output_path.display()))
    }

    fn document(title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{}</title>\n<script src=\"{PLOTLY_CDN}\"></script>\n<style>{STYLE}</style>\n\
</head>\n<body>\n{body}</body>\n</html>\n",
            escape_html(title)
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep embedded JSON from closing the surrounding script tag.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::DataLoader;

    fn sample_page() -> Page {
        let csv = "\
Year,Item Code,Item,Value,Currency
1990,5540,Local currency units per USD,695.09,Lebanese Pound
2021,5541,Standard local currency units per USD,1507.5,Lebanese Pound
";
        let dataset = DataLoader::parse_csv(csv.as_bytes().to_vec()).unwrap();
        Page::build(&DashboardConfig::default(), &dataset).unwrap()
    }

    #[test]
    fn test_render_page() {
        let page = sample_page();
        let html = HtmlReport::render(&page);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!("<h1>{}</h1>", page.title)));
        assert!(html.contains("Data loaded successfully!"));
        assert_eq!(html.matches("Plotly.newPlot").count(), 4);

        let positions: Vec<usize> = (1..=4)
            .map(|n| html.find(&format!("<h3>Figure {n}:")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_failure_has_no_charts() {
        let html = HtmlReport::render_failure("Rates", "About", "Error loading data: <timeout>");
        assert!(html.contains("Error loading data: &lt;timeout&gt;"));
        assert!(!html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(script_safe("{\"t\":\"</script>\"}"), "{\"t\":\"<\\/script>\"}");
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.html");

        HtmlReport::write(&sample_page(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("figure-4"));
    }
}
