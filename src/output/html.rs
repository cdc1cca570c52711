// HTML briefing
//
// A single self-contained page. The built-in template is embedded at compile
// time; `[output] templates` points at a directory that replaces it.

use super::Briefing;
use crate::error::Result;
use crate::output::templates::TemplateEngine;
use std::path::Path;

/// Render a briefing as a standalone HTML page
pub fn render_html(briefing: &Briefing<'_>) -> Result<String> {
    let engine = TemplateEngine::new()?;
    engine.render_briefing(briefing)
}

/// Render a briefing with the `briefing.html.tera` found in `template_dir`
pub fn render_html_from(briefing: &Briefing<'_>, template_dir: &Path) -> Result<String> {
    let engine = TemplateEngine::from_dir(template_dir)?;
    engine.render_briefing(briefing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::dataset::Dataset;
    use crate::intel::Analyst;
    use crate::llm::OfflineGenerator;
    use crate::model::IntelligenceLayer;
    use chrono::Utc;

    fn dashboard() -> Dashboard<OfflineGenerator> {
        Dashboard::new(Dataset::builtin(), Analyst::new(OfflineGenerator))
    }

    #[test]
    fn test_html_overview() {
        let mut dash = dashboard();
        dash.request_analysis();
        let briefing = Briefing::from_dashboard(&dash, Utc::now());
        let html = render_html(&briefing).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Eje Andino y Fronteras Amazónicas</title>"));
        assert!(html.contains("Error crítico al procesar la síntesis de inteligencia."));
        assert!(html.contains("id=\"frente-alfonso-cano\""));
        assert!(html.contains("Rutas y Trochas"));
    }

    #[test]
    fn test_html_escapes_text() {
        let dash = dashboard();
        let briefing = Briefing::from_dashboard(&dash, Utc::now()).with_title("A <b> & C");
        let html = render_html(&briefing).unwrap();
        assert!(html.contains("A &lt;b&gt; &amp; C"));
    }

    #[test]
    fn test_html_empty_model_layers() {
        let mut dash = dashboard();
        dash.request_predictions();
        dash.request_sdrga();
        assert!(dash.layers().is_enabled(IntelligenceLayer::Sdrga));

        let briefing = Briefing::from_dashboard(&dash, Utc::now());
        let html = render_html(&briefing).unwrap();
        assert!(html.contains("0 proyecciones"));
        assert!(html.contains("0 alertas"));
    }

    #[test]
    fn test_html_layer_anchors() {
        let dash = dashboard();
        let briefing = Briefing::from_dashboard(&dash, Utc::now());
        let html = render_html(&briefing).unwrap();

        assert!(html.contains("href=\"#rutas-y-trochas\""));
        assert!(html.contains("<section id=\"rutas-y-trochas\">"));
        assert!(html.contains("<section id=\"frentes-guerrilleros\">"));
        assert!(html.contains("Frentes Guerrilleros (5)"));
        assert!(html.contains("Infraestructura Ilegal (1)"));
        assert!(!html.contains("href=\"#alertas-sdrga\""));
    }

    #[test]
    fn test_html_from_template_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("briefing.html.tera"),
            "{% for label in layer_labels %}[{{ label | slugify }}]{% endfor %}",
        )
        .unwrap();

        let dash = dashboard();
        let briefing = Briefing::from_dashboard(&dash, Utc::now());
        let html = render_html_from(&briefing, dir.path()).unwrap();
        assert_eq!(html, "[frentes-guerrilleros][infraestructura-ilegal][rutas-y-trochas]");
    }
}
