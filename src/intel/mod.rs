//! Model-backed intelligence actions.
//!
//! The three actions (strategic synthesis, mission predictions, SDRGA
//! withdrawal alerts) share one shape: serialize context records into a
//! prompt, request a schema-constrained completion, parse it and attach the
//! fields the model does not produce. Each action has a `try_` form that
//! propagates failures and a plain form that logs them and returns the
//! action's fixed fallback instead.

pub mod prompts;
pub mod schemas;

use crate::error::Result;
use crate::llm::{parse_completion, GenerationRequest, Generator, Schema};
use crate::model::{
    GeoPoint, IntelligenceLayer, IntelligencePoint, PredictionPoint, RiskLevel, SdrgaAlert,
    StrategicSummary, ThreatLevel,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Type label given to every mission projection
pub const PREDICTION_TYPE: &str = "ALERTA DE MISIÓN";
/// Type label given to every SDRGA alert
pub const ALERT_TYPE: &str = "ALERTA SDRGA";

/// Deserialize each array element on its own, dropping the ones that fail
fn keep_valid<T: DeserializeOwned>(items: Vec<serde_json::Value>, kind: &'static str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(kind, index, error = %e, "dropping malformed element");
                None
            }
        })
        .collect()
}

/// Summary returned when the synthesis cannot be produced
pub fn fallback_summary() -> StrategicSummary {
    StrategicSummary {
        overview: "Error crítico al procesar la síntesis de inteligencia.".to_string(),
        risk_level: ThreatLevel::High,
        key_insights: vec!["No se pudo generar el análisis detallado vía IA.".to_string()],
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrediction {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    strategic_value: String,
    #[serde(default)]
    time_window: String,
    #[serde(default)]
    required_units: Vec<String>,
    #[serde(default)]
    containment_strategy: String,
    #[serde(default)]
    threat_radius: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlert {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    probable_destination: Option<GeoPoint>,
    #[serde(default)]
    retreat_routes: Vec<Vec<GeoPoint>>,
    #[serde(default)]
    risk_score: f64,
    #[serde(default)]
    risk_level: Option<String>,
    #[serde(default)]
    detected_anomalies: Vec<String>,
    #[serde(default)]
    critical_corridors: Vec<String>,
    #[serde(default)]
    tactical_recommendations: Vec<String>,
    #[serde(default)]
    confidence_interval: Option<f64>,
}

/// Runs the intelligence actions against a [`Generator`]
pub struct Analyst<G> {
    generator: G,
    clock: fn() -> DateTime<Utc>,
}

impl<G: Generator> Analyst<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for generated ids and timestamps
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn request<T: DeserializeOwned>(&self, prompt: String, schema: Schema) -> Result<T> {
        let empty = schema.empty_document();
        let request = GenerationRequest::new(prompt, schema);
        let text = self.generator.generate(&request)?;
        parse_completion(&text, empty)
    }

    /// Strategic synthesis, propagating failures
    pub fn try_strategic_analysis(&self, points: &[IntelligencePoint]) -> Result<StrategicSummary> {
        let prompt = prompts::analysis_prompt(points)?;
        self.request(prompt, schemas::summary_schema())
    }

    /// Strategic synthesis, or [`fallback_summary`] on failure
    pub fn strategic_analysis(&self, points: &[IntelligencePoint]) -> StrategicSummary {
        match self.try_strategic_analysis(points) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(
                    generator = self.generator.name(),
                    error = %e,
                    "strategic analysis failed, using fallback"
                );
                fallback_summary()
            }
        }
    }

    /// Mission projections, propagating failures
    pub fn try_predict_hostiles(&self, points: &[IntelligencePoint]) -> Result<Vec<PredictionPoint>> {
        let prompt = prompts::prediction_prompt(points)?;
        let items = self.request(prompt, schemas::prediction_schema())?;
        let raw: Vec<RawPrediction> = keep_valid(items, "prediction");

        let millis = (self.clock)().timestamp_millis();
        let basis: Vec<String> = points.iter().take(2).map(|p| p.id.clone()).collect();

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(index, pred)| {
                let point = IntelligencePoint::new(
                    format!("mission-{}-{}", index, millis),
                    pred.name,
                    PREDICTION_TYPE,
                    IntelligenceLayer::Predictions,
                    GeoPoint::new(pred.lat, pred.lng),
                )
                .with_description(pred.description);

                PredictionPoint {
                    point,
                    confidence: pred.confidence,
                    triangulation_basis: basis.clone(),
                    strategic_value: pred.strategic_value,
                    time_window: pred.time_window,
                    required_units: pred.required_units,
                    containment_strategy: pred.containment_strategy,
                    threat_radius: pred.threat_radius,
                }
            })
            .collect())
    }

    /// Mission projections, or nothing on failure
    pub fn predict_hostiles(&self, points: &[IntelligencePoint]) -> Vec<PredictionPoint> {
        self.try_predict_hostiles(points).unwrap_or_else(|e| {
            tracing::error!(
                generator = self.generator.name(),
                error = %e,
                "prediction failed, returning no missions"
            );
            Vec::new()
        })
    }

    /// SDRGA alerts, propagating failures
    pub fn try_run_sdrga(&self, points: &[IntelligencePoint]) -> Result<Vec<SdrgaAlert>> {
        let prompt = prompts::sdrga_prompt(points)?;
        let items = self.request(prompt, schemas::alert_schema())?;
        let raw: Vec<RawAlert> = keep_valid(items, "alert");

        let now = (self.clock)();
        let millis = now.timestamp_millis();
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(index, alert)| {
                let origin = GeoPoint::new(alert.lat, alert.lng);
                let risk_level = alert
                    .risk_level
                    .as_deref()
                    .and_then(RiskLevel::from_label)
                    .unwrap_or_else(|| RiskLevel::from_score(alert.risk_score));

                let point = IntelligencePoint::new(
                    format!("sdrga-{}-{}", index, millis),
                    alert.name,
                    ALERT_TYPE,
                    IntelligenceLayer::Sdrga,
                    origin,
                )
                .with_description(alert.description);

                SdrgaAlert {
                    point,
                    risk_score: alert.risk_score,
                    risk_level,
                    detected_anomalies: alert.detected_anomalies,
                    probable_destination: alert.probable_destination.unwrap_or(origin),
                    retreat_routes: alert.retreat_routes,
                    critical_corridors: alert.critical_corridors,
                    tactical_recommendations: alert.tactical_recommendations,
                    confidence_interval: alert.confidence_interval,
                    timestamp: timestamp.clone(),
                }
            })
            .collect())
    }

    /// SDRGA alerts, or nothing on failure
    pub fn run_sdrga(&self, points: &[IntelligencePoint]) -> Vec<SdrgaAlert> {
        self.try_run_sdrga(points).unwrap_or_else(|e| {
            tracing::error!(
                generator = self.generator.name(),
                error = %e,
                "SDRGA run failed, returning no alerts"
            );
            Vec::new()
        })
    }
}
