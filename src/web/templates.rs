//! Template rendering with Tera

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("widget.html", include_str!("../templates/widget.html"))?;
        Ok(Self { tera })
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayStatus;
    use crate::results::{CompanyRecord, COLUMNS};

    fn context(rows: &[CompanyRecord], status: DisplayStatus) -> Context {
        let mut ctx = Context::new();
        ctx.insert("instance_name", "Company Search");
        ctx.insert("title", "Companies");
        ctx.insert("count_label", "0 companies");
        ctx.insert("term", "");
        ctx.insert("columns", &COLUMNS);
        ctx.insert("rows", rows);
        ctx.insert("status", &status);
        ctx
    }

    #[test]
    fn test_widget_renders_rows() {
        let templates = Templates::new().unwrap();
        let row = CompanyRecord {
            name: "Acme <Inc>".to_string(),
            ..CompanyRecord::unavailable("7")
        };
        let html = templates
            .render_with_context("widget.html", &context(&[row], DisplayStatus::Idle))
            .unwrap();

        assert!(html.contains("Phone Number"));
        assert!(html.contains("Acme &lt;Inc&gt;"));
        assert!(html.contains("Clear Results"));
    }

    #[test]
    fn test_widget_renders_error() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render_with_context(
                "widget.html",
                &context(&[], DisplayStatus::Error("HTTP 500: Internal Server Error".into())),
            )
            .unwrap();

        assert!(html.contains("Search failed: HTTP 500: Internal Server Error"));
    }
}
