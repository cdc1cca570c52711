//! Session state of the dashboard.
//!
//! Holds what the map shows (layers, search term, model output) and what the
//! side panel shows (a summary or a selected feature). Requests take
//! `&mut self`, so a session never has more than one model call in flight.

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::filter::{visible_features, LayerSet, VisibleFeatures};
use crate::intel::Analyst;
use crate::llm::Generator;
use crate::model::{IntelligenceLayer, IntelligencePoint, PredictionPoint, SdrgaAlert, StrategicSummary};

pub struct Dashboard<G> {
    dataset: Dataset,
    analyst: Analyst<G>,
    layers: LayerSet,
    search: String,
    summary: Option<StrategicSummary>,
    selected: Option<IntelligencePoint>,
    predictions: Vec<PredictionPoint>,
    alerts: Vec<SdrgaAlert>,
}

impl<G: Generator> Dashboard<G> {
    pub fn new(dataset: Dataset, analyst: Analyst<G>) -> Self {
        Self {
            dataset,
            analyst,
            layers: LayerSet::default(),
            search: String::new(),
            summary: None,
            selected: None,
            predictions: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn with_layers(mut self, layers: LayerSet) -> Self {
        self.layers = layers;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn summary(&self) -> Option<&StrategicSummary> {
        self.summary.as_ref()
    }

    pub fn selected(&self) -> Option<&IntelligencePoint> {
        self.selected.as_ref()
    }

    pub fn predictions(&self) -> &[PredictionPoint] {
        &self.predictions
    }

    pub fn alerts(&self) -> &[SdrgaAlert] {
        &self.alerts
    }

    pub fn toggle_layer(&mut self, layer: IntelligenceLayer) {
        self.layers.toggle(layer);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Run the strategic synthesis. Clears any selection.
    pub fn request_analysis(&mut self) -> &StrategicSummary {
        self.selected = None;
        let context = self.dataset.analysis_context();
        self.summary.insert(self.analyst.strategic_analysis(&context))
    }

    /// Replace mission projections and show their layer
    pub fn request_predictions(&mut self) -> &[PredictionPoint] {
        let context = self.dataset.prediction_context();
        self.predictions = self.analyst.predict_hostiles(&context);
        self.layers.enable(IntelligenceLayer::Predictions);
        tracing::info!(count = self.predictions.len(), "mission projections updated");
        &self.predictions
    }

    /// Replace SDRGA alerts and show their layer
    pub fn request_sdrga(&mut self) -> &[SdrgaAlert] {
        let context = self.dataset.sdrga_context();
        self.alerts = self.analyst.run_sdrga(&context);
        self.layers.enable(IntelligenceLayer::Sdrga);
        tracing::info!(count = self.alerts.len(), "SDRGA alerts updated");
        &self.alerts
    }

    /// Select a feature. A selection replaces the summary in the panel.
    pub fn select(&mut self, point: Option<IntelligencePoint>) {
        if point.is_some() {
            self.summary = None;
        }
        self.selected = point;
    }

    /// Select any dataset point, route, projection or alert by id
    pub fn select_id(&mut self, id: &str) -> Result<&IntelligencePoint> {
        let point = self
            .dataset
            .find(id)
            .or_else(|| {
                self.predictions
                    .iter()
                    .find(|p| p.point.id == id)
                    .map(|p| p.point.clone())
            })
            .or_else(|| {
                self.alerts
                    .iter()
                    .find(|a| a.point.id == id)
                    .map(|a| a.point.clone())
            })
            .ok_or_else(|| Error::UnknownFeature(id.to_string()))?;

        self.summary = None;
        Ok(self.selected.insert(point))
    }

    pub fn close_panel(&mut self) {
        self.summary = None;
        self.selected = None;
    }

    /// Features currently drawn
    pub fn visible(&self) -> VisibleFeatures<'_> {
        visible_features(
            &self.dataset,
            &self.layers,
            &self.search,
            &self.predictions,
            &self.alerts,
        )
    }
}
