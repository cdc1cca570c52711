// Output generation module
//
// A `Briefing` is a snapshot of a dashboard session; the submodules render
// it as GeoJSON, Markdown or HTML. JSON output is the briefing itself.

pub mod geojson;
pub mod html;
pub mod markdown;
pub mod templates;

pub use geojson::feature_collection;
pub use html::{render_html, render_html_from};
pub use markdown::render_markdown;
pub use templates::TemplateEngine;

use crate::config::{OutputConfig, OutputFormat};
use crate::dashboard::Dashboard;
use crate::dataset::THEATER_CENTER;
use crate::error::Result;
use crate::filter::VisibleFeatures;
use crate::llm::Generator;
use crate::model::{GeoPoint, IntelligenceLayer, IntelligencePoint, StrategicSummary};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default briefing title
pub const BRIEFING_TITLE: &str = "Eje Andino y Fronteras Amazónicas";

/// Everything an export needs from a session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Briefing<'a> {
    pub title: String,
    pub generated_at: String,
    pub center: GeoPoint,
    pub layers: Vec<IntelligenceLayer>,
    pub search: &'a str,
    pub summary: Option<&'a StrategicSummary>,
    pub selected: Option<&'a IntelligencePoint>,
    pub features: VisibleFeatures<'a>,
}

impl<'a> Briefing<'a> {
    pub fn from_dashboard<G: Generator>(dashboard: &'a Dashboard<G>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: BRIEFING_TITLE.to_string(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            center: THEATER_CENTER,
            layers: dashboard.layers().iter().collect(),
            search: dashboard.search(),
            summary: dashboard.summary(),
            selected: dashboard.selected(),
            features: dashboard.visible(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Render a briefing in the requested format. `templates` only affects HTML.
pub fn render(briefing: &Briefing<'_>, format: OutputFormat, templates: Option<&Path>) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(briefing)?),
        OutputFormat::Geojson => Ok(serde_json::to_string_pretty(&feature_collection(
            &briefing.features,
        ))?),
        OutputFormat::Markdown => Ok(render_markdown(briefing)),
        OutputFormat::Html => match templates {
            Some(dir) => render_html_from(briefing, dir),
            None => render_html(briefing),
        },
    }
}

/// Render and write a briefing into the output directory, returning the file path
pub fn write_briefing(briefing: &Briefing<'_>, output: &OutputConfig) -> Result<PathBuf> {
    let format = output.format;
    let content = render(briefing, format, output.templates.as_deref())?;
    fs::create_dir_all(&output.directory)?;
    let path = output.directory.join(format.file_name());
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), ?format, "briefing written");
    Ok(path)
}
