// Template engine for generating HTML output

use super::Briefing;
use crate::error::{Error, Result};
use crate::model::{IntelligenceLayer, RiskLevel};
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera, Value};

/// File a custom template directory must provide
pub const BRIEFING_TEMPLATE_FILE: &str = "briefing.html.tera";

/// Template engine wrapping Tera with custom filters and templates
pub struct TemplateEngine {
    tera: Tera,
    briefing: &'static str,
}

impl TemplateEngine {
    /// Create a new template engine with the embedded briefing template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![(
            "briefing.html",
            include_str!("../../templates/briefing.html.tera"),
        )])?;
        register_filters(&mut tera);

        Ok(Self {
            tera,
            briefing: "briefing.html",
        })
    }

    /// Create a template engine from a custom directory
    pub fn from_dir(template_dir: &Path) -> Result<Self> {
        if !template_dir.is_dir() {
            return Err(Error::PathNotFound(template_dir.to_path_buf()));
        }
        let pattern = format!("{}/**/*.tera", template_dir.display());
        let mut tera = Tera::new(&pattern)?;
        tera.autoescape_on(vec![".html.tera", ".html"]);
        register_filters(&mut tera);

        if !tera.get_template_names().any(|name| name == BRIEFING_TEMPLATE_FILE) {
            return Err(Error::other(format!(
                "{} has no {}",
                template_dir.display(),
                BRIEFING_TEMPLATE_FILE
            )));
        }

        Ok(Self {
            tera,
            briefing: BRIEFING_TEMPLATE_FILE,
        })
    }

    /// Render the briefing page
    pub fn render_briefing(&self, briefing: &Briefing<'_>) -> Result<String> {
        let mut context = Context::new();
        context.insert("briefing", briefing);
        context.insert(
            "layer_labels",
            &briefing
                .layers
                .iter()
                .map(|l| l.label())
                .collect::<Vec<_>>(),
        );
        context.insert("search", briefing.search);
        context.insert("summary", &briefing.summary);
        context.insert("selected", &briefing.selected);
        context.insert("features", &briefing.features);

        Ok(self.tera.render(self.briefing, &context)?)
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("truncate_words", truncate_words);
    tera.register_filter("pluralize", pluralize);
    tera.register_filter("slugify", slugify_filter);
    tera.register_filter("risk_color", risk_color);
    tera.register_filter("layer_label", layer_label);
    tera.register_filter("layer_color", layer_color);
}

/// Truncate text to a number of words
fn truncate_words(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    let max_words = args
        .get("count")
        .and_then(|v| v.as_u64())
        .unwrap_or(50) as usize;

    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= max_words {
        Ok(Value::String(s.to_string()))
    } else {
        let truncated: String = words[..max_words].join(" ");
        Ok(Value::String(format!("{}...", truncated)))
    }
}

/// Pluralize a word based on count
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args
        .get("singular")
        .and_then(|v| v.as_str())
        .unwrap_or("elemento");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    if count == 1 {
        Ok(Value::String(format!("{} {}", count, singular)))
    } else {
        Ok(Value::String(format!("{} {}", count, plural)))
    }
}

/// Map a risk label (`NEGRO`, `rojo`...) to its display colour
fn risk_color(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let color = value
        .as_str()
        .and_then(RiskLevel::from_label)
        .map(|level| level.color())
        .unwrap_or("#64748b");
    Ok(Value::String(color.to_string()))
}

/// Map a layer id to its Spanish label
fn layer_label(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let id = value.as_str().unwrap_or("");
    let label = id
        .parse::<IntelligenceLayer>()
        .map(|layer| layer.label().to_string())
        .unwrap_or_else(|_| id.to_string());
    Ok(Value::String(label))
}

fn layer_color(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let color = value
        .as_str()
        .and_then(|id| id.parse::<IntelligenceLayer>().ok())
        .map(|layer| layer.color())
        .unwrap_or("#64748b");
    Ok(Value::String(color.to_string()))
}

/// Convert text to URL-friendly slug
fn slugify_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    Ok(Value::String(slugify(s)))
}

/// Convert text to URL-friendly slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::dataset::Dataset;
    use crate::intel::Analyst;
    use crate::llm::OfflineGenerator;
    use chrono::Utc;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Frente Alfonso Cano"), "frente-alfonso-cano");
        assert_eq!(slugify("EMC - Frente Franco Benavides"), "emc-frente-franco-benavides");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
    }

    #[test]
    fn test_truncate_words() {
        let value = Value::String("uno dos tres cuatro cinco".to_string());
        let mut args = HashMap::new();
        args.insert("count".to_string(), Value::Number(3.into()));

        let result = truncate_words(&value, &args).unwrap();
        assert_eq!(result.as_str().unwrap(), "uno dos tres...");
    }

    #[test]
    fn test_truncate_words_no_truncation() {
        let value = Value::String("uno dos".to_string());
        let mut args = HashMap::new();
        args.insert("count".to_string(), Value::Number(5.into()));

        let result = truncate_words(&value, &args).unwrap();
        assert_eq!(result.as_str().unwrap(), "uno dos");
    }

    #[test]
    fn test_pluralize_singular() {
        let value = Value::Number(1.into());
        let mut args = HashMap::new();
        args.insert("singular".to_string(), Value::String("alerta".to_string()));

        let result = pluralize(&value, &args).unwrap();
        assert_eq!(result.as_str().unwrap(), "1 alerta");
    }

    #[test]
    fn test_pluralize_explicit_plural() {
        let value = Value::Number(0.into());
        let mut args = HashMap::new();
        args.insert("singular".to_string(), Value::String("proyección".to_string()));
        args.insert("plural".to_string(), Value::String("proyecciones".to_string()));

        let result = pluralize(&value, &args).unwrap();
        assert_eq!(result.as_str().unwrap(), "0 proyecciones");
    }

    #[test]
    fn test_risk_color() {
        let args = HashMap::new();
        let negro = risk_color(&Value::String("NEGRO".to_string()), &args).unwrap();
        assert_eq!(negro.as_str().unwrap(), "#000000");
        let unknown = risk_color(&Value::String("gris".to_string()), &args).unwrap();
        assert_eq!(unknown.as_str().unwrap(), "#64748b");
    }

    #[test]
    fn test_layer_label() {
        let args = HashMap::new();
        let label = layer_label(&Value::String("sdrga".to_string()), &args).unwrap();
        assert_eq!(label.as_str().unwrap(), "Alertas SDRGA");
        let raw = layer_label(&Value::String("otra".to_string()), &args).unwrap();
        assert_eq!(raw.as_str().unwrap(), "otra");
    }

    #[test]
    fn test_custom_template_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(BRIEFING_TEMPLATE_FILE),
            "<h1>{{ briefing.title | slugify }}</h1> \
             {{ features.points | length | pluralize(singular=\"punto\") }} \
             {{ \"ROJO\" | risk_color }} {{ briefing.title }}",
        )
        .unwrap();

        let engine = TemplateEngine::from_dir(dir.path()).unwrap();
        let dash = Dashboard::new(Dataset::builtin(), Analyst::new(OfflineGenerator));
        let briefing = Briefing::from_dashboard(&dash, Utc::now()).with_title("Eje <Sur>");
        let out = engine.render_briefing(&briefing).unwrap();
        assert_eq!(out, "<h1>eje-sur</h1> 6 puntos #dc2626 Eje &lt;Sur&gt;");
    }

    #[test]
    fn test_template_dir_without_briefing() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("other.html.tera"), "x").unwrap();
        assert!(matches!(
            TemplateEngine::from_dir(dir.path()),
            Err(Error::Other(_))
        ));
        assert!(matches!(
            TemplateEngine::from_dir(&dir.path().join("missing")),
            Err(Error::PathNotFound(_))
        ));
    }
}
