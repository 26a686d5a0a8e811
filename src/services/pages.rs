//! HTML page rendering with Tera.

use tera::{Context, Tera};

/// Error type for page rendering
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),
}

/// Service for rendering the two HTML pages from compiled-in templates.
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_templates([
            ("welcome.html", include_str!("../../templates/welcome.html")),
            ("show.html", include_str!("../../templates/show.html")),
        ])?;
        Ok(Self { tera })
    }

    /// The upload form.
    pub fn welcome(&self) -> Result<String, PageError> {
        Ok(self.tera.render("welcome.html", &Context::new())?)
    }

    /// The result page for a generated pattern.
    pub fn show(&self, id: &str) -> Result<String, PageError> {
        let mut context = Context::new();
        context.insert("id", id);
        context.insert("diagram_url", &format!("/storage/{id}_pattern.png"));
        Ok(self.tera.render("show.html", &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_page_has_upload_form() {
        let html = Pages::new().unwrap().welcome().unwrap();
        assert!(html.contains("multipart/form-data"));
        assert!(html.contains(r#"action="/generate""#));
    }

    #[test]
    fn test_show_page_embeds_diagram() {
        let html = Pages::new().unwrap().show("0123456789abcdef").unwrap();
        assert!(html.contains("/storage/0123456789abcdef_pattern.png"));
    }
}
