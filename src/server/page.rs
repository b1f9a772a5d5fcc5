//! Rendering of the entry form page.

use crate::error::Res;
use crate::model::Tno;
use crate::utils;
use std::path::Path;

pub(super) const INDEX_HTML: &str = "index.html";

/// The outcome of rendering the entry form.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(super) enum Page {
    Rendered(String),
    /// The template does not exist; holds an HTML diagnostic for the operator.
    Missing(String),
}

/// Renders `index.html` from `templates_dir`, filling in `{{ tno }}` and `{{ today }}`.
pub(super) async fn index(templates_dir: &Path, tno: Tno, today: &str) -> Res<Page> {
    let path = templates_dir.join(INDEX_HTML);
    if !path.is_file() {
        let found = if templates_dir.is_dir() {
            format!("{:?}", utils::list_dir(templates_dir).await?)
        } else {
            String::from("templates folder missing")
        };
        return Ok(Page::Missing(format!(
            "ERROR: {INDEX_HTML} not found.<br>Expected path: {}<br>Files found: {found}",
            path.display()
        )));
    }
    let template = utils::read(&path).await?;
    let html = fill(&template, "tno", &tno.to_string());
    Ok(Page::Rendered(fill(&html, "today", today)))
}

/// Replaces `{{ name }}` (with or without the inner spaces) by `value`.
fn fill(template: &str, name: &str, value: &str) -> String {
    template
        .replace(&format!("{{{{ {name} }}}}"), value)
        .replace(&format!("{{{{{name}}}}}"), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fill() {
        assert_eq!(fill("TNo: {{ tno }}/{{tno}}", "tno", "7"), "TNo: 7/7");
        assert_eq!(fill("{{ other }}", "tno", "7"), "{{ other }}");
    }

    #[tokio::test]
    async fn test_index_rendered() {
        let dir = TempDir::new().unwrap();
        utils::write(dir.path().join(INDEX_HTML), "<p>{{ tno }} on {{ today }}</p>")
            .await
            .unwrap();
        let page = index(dir.path(), 3, "14/10/2026").await.unwrap();
        assert_eq!(page, Page::Rendered("<p>3 on 14/10/2026</p>".to_string()));
    }

    #[tokio::test]
    async fn test_index_missing() {
        let dir = TempDir::new().unwrap();
        utils::write(dir.path().join("other.html"), "").await.unwrap();
        let Page::Missing(msg) = index(dir.path(), 1, "x").await.unwrap() else {
            panic!("expected a missing page");
        };
        assert!(msg.contains("Expected path:"));
        assert!(msg.contains(r#"["other.html"]"#));

        let Page::Missing(msg) = index(&dir.path().join("gone"), 1, "x").await.unwrap() else {
            panic!("expected a missing page");
        };
        assert!(msg.contains("templates folder missing"));
    }
}
