//! Standalone HTML pages: the downloadable export and the live preview.
//!
//! Both wrap the same `render_fragment` output with the same head, so the
//! preview shows exactly what the export will contain.

use crate::models::portfolio::PortfolioDocument;
use crate::render::sections::SCROLL_SPY_SCRIPT;
use crate::render::templates::{escape_html, render_fragment, Template};

const BASE_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen', 'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue', sans-serif;
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
  line-height: 1.6;
}"#;

const SMOOTH_SCROLL_CSS: &str = "html {\n  scroll-behavior: smooth;\n}";

const PREVIEW_TOOLBAR_CSS: &str = r#".canvas-toolbar {
  position: fixed;
  bottom: 1.5rem;
  right: 1.5rem;
  z-index: 100;
  display: flex;
  gap: 0.5rem;
  padding: 0.5rem;
  border-radius: 999px;
  background: rgba(15, 23, 42, 0.9);
  font-size: 0.85rem;
}

.canvas-toolbar a {
  padding: 0.35rem 0.8rem;
  border-radius: 999px;
  color: #e2e8f0;
  text-decoration: none;
}

.canvas-toolbar a.current {
  background: #f8fafc;
  color: #0f172a;
}"#;

pub fn template_css(template: Template) -> &'static str {
    match template {
        Template::Aurora => include_str!("../../assets/aurora.css"),
        Template::Nebula => include_str!("../../assets/nebula.css"),
        Template::Spark => include_str!("../../assets/spark.css"),
    }
}

fn page_title_name(doc: &PortfolioDocument) -> String {
    let name = doc.personal.name.trim();
    escape_html(if name.is_empty() { "Portfolio" } else { name })
}

fn render_head(template: Template, doc: &PortfolioDocument, extra_css: &str) -> String {
    let name = page_title_name(doc);
    format!(
        "<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <meta name=\"description\" content=\"{name} - Professional Portfolio\">\n\
         <meta name=\"author\" content=\"{name}\">\n\
         <title>{name} - Portfolio</title>\n\
         <style>\n{BASE_CSS}\n\n{css}\n\n{SMOOTH_SCROLL_CSS}\n{extra_css}</style>\n\
         <script>\n{SCROLL_SPY_SCRIPT}\n</script>\n\
         </head>\n",
        css = template_css(template),
    )
}

/// The self-contained HTML file offered for download.
pub fn render_document(template: Template, doc: &PortfolioDocument, year: i32) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n{}<body>\n{}</body>\n</html>\n",
        render_head(template, doc, ""),
        render_fragment(template, doc, year)
    )
}

/// The live preview: the export page plus a floating toolbar for switching
/// templates and downloading.
pub fn render_preview_page(template: Template, doc: &PortfolioDocument, year: i32) -> String {
    let mut toolbar = String::from("<div class=\"canvas-toolbar\">\n");
    for t in Template::ALL {
        let current = if t == template { " class=\"current\"" } else { "" };
        toolbar.push_str(&format!(
            "<a href=\"/preview/{id}\"{current}>{label}</a>\n",
            id = t.as_str(),
            label = t.display_name()
        ));
    }
    toolbar.push_str(&format!(
        "<a href=\"/api/portfolio/export/{}\">Download</a>\n<a href=\"/upload\">New upload</a>\n</div>\n",
        template.as_str()
    ));

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n{}<body>\n{}{}</body>\n</html>\n",
        render_head(template, doc, &format!("\n{PREVIEW_TOOLBAR_CSS}\n")),
        render_fragment(template, doc, year),
        toolbar
    )
}

/// `{slug}-portfolio.html`, where the slug is the lowercased name reduced to
/// `[a-z0-9-]` with whitespace runs turned into single dashes.
pub fn export_filename(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("portfolio");
    }
    format!("{slug}-portfolio.html")
}
