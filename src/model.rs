//! Record types shared by the dataset, the model actions and the exporters.
//!
//! All records serialize with camelCase keys so datasets and model responses
//! use the same JSON shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Map layer a record is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntelligenceLayer {
    Fronts,
    Actions,
    Infrastructure,
    Routes,
    Urban,
    Predictions,
    Sdrga,
}

impl IntelligenceLayer {
    pub const ALL: [IntelligenceLayer; 7] = [
        IntelligenceLayer::Fronts,
        IntelligenceLayer::Actions,
        IntelligenceLayer::Infrastructure,
        IntelligenceLayer::Routes,
        IntelligenceLayer::Urban,
        IntelligenceLayer::Predictions,
        IntelligenceLayer::Sdrga,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntelligenceLayer::Fronts => "fronts",
            IntelligenceLayer::Actions => "actions",
            IntelligenceLayer::Infrastructure => "infrastructure",
            IntelligenceLayer::Routes => "routes",
            IntelligenceLayer::Urban => "urban",
            IntelligenceLayer::Predictions => "predictions",
            IntelligenceLayer::Sdrga => "sdrga",
        }
    }

    /// Human-readable layer title
    pub fn label(&self) -> &'static str {
        match self {
            IntelligenceLayer::Fronts => "Frentes Guerrilleros",
            IntelligenceLayer::Actions => "Acciones Militares",
            IntelligenceLayer::Infrastructure => "Infraestructura Ilegal",
            IntelligenceLayer::Routes => "Rutas y Trochas",
            IntelligenceLayer::Urban => "Presencia Urbana",
            IntelligenceLayer::Predictions => "Proyecciones de Misión",
            IntelligenceLayer::Sdrga => "Alertas SDRGA",
        }
    }

    /// Marker colour used for points of this layer
    pub fn color(&self) -> &'static str {
        match self {
            IntelligenceLayer::Fronts => "#ef4444",
            IntelligenceLayer::Actions => "#f97316",
            IntelligenceLayer::Infrastructure => "#eab308",
            IntelligenceLayer::Routes => "#059669",
            IntelligenceLayer::Urban => "#3b82f6",
            IntelligenceLayer::Predictions => "#a855f7",
            IntelligenceLayer::Sdrga => "#dc2626",
        }
    }

    /// Whether the layer is populated by the model rather than the dataset
    pub fn is_generated(&self) -> bool {
        matches!(self, IntelligenceLayer::Predictions | IntelligenceLayer::Sdrga)
    }
}

impl fmt::Display for IntelligenceLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntelligenceLayer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        IntelligenceLayer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == wanted)
            .ok_or_else(|| Error::UnknownLayer(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// Source reliability grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntelConfidence {
    Alta,
    Media,
    Baja,
}

/// A named location of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligencePoint {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: IntelligenceLayer,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commanders: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub influence_zones: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub illegal_economy: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_context: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_structures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tactics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intel_confidence: Option<IntelConfidence>,
}

impl IntelligencePoint {
    /// Create a point with only the required fields set
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        category: IntelligenceLayer,
        position: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind: kind.into(),
            category,
            lat: position.lat,
            lng: position.lng,
            intensity: None,
            date: None,
            commanders: Vec::new(),
            influence_zones: Vec::new(),
            illegal_economy: Vec::new(),
            historical_context: None,
            related_structures: Vec::new(),
            source: None,
            tactics: Vec::new(),
            intel_confidence: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Legal,
    Illegal,
    Trocha,
    Fluvial,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Legal => "legal",
            RouteKind::Illegal => "illegal",
            RouteKind::Trocha => "trocha",
            RouteKind::Fluvial => "fluvial",
        }
    }

    /// Label shown when a route is selected as a feature
    pub fn label(&self) -> &'static str {
        match self {
            RouteKind::Illegal => "CORREDOR ILEGAL",
            RouteKind::Trocha => "TROCHA FRONTERIZA",
            RouteKind::Legal | RouteKind::Fluvial => "RUTA FLUVIAL",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RouteKind::Illegal => "#059669",
            RouteKind::Fluvial => "#0284c7",
            RouteKind::Legal | RouteKind::Trocha => "#d97706",
        }
    }
}

/// An ordered path between geographic points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRoute {
    pub id: String,
    pub name: String,
    pub path: Vec<GeoPoint>,
    #[serde(rename = "type")]
    pub kind: RouteKind,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl MovementRoute {
    /// The route as a selectable feature, anchored at its middle vertex
    pub fn as_selection_point(&self) -> IntelligencePoint {
        let center = self.path.get(self.path.len() / 2).copied().unwrap_or_default();
        let description = match &self.details {
            Some(details) => format!("{} - {}", self.description, details),
            None => self.description.clone(),
        };

        let mut point = IntelligencePoint::new(
            self.id.clone(),
            self.name.clone(),
            self.kind.label(),
            IntelligenceLayer::Routes,
            center,
        )
        .with_description(description);
        point.intensity = Some(Intensity::Medium);
        point
    }

    /// The route as prompt context, anchored at its origin
    pub fn as_context_point(&self) -> IntelligencePoint {
        let origin = self.path.first().copied().unwrap_or_default();
        let mut point = IntelligencePoint::new(
            self.id.clone(),
            self.name.clone(),
            format!("Ruta {}", self.kind.as_str()),
            IntelligenceLayer::Routes,
            origin,
        )
        .with_description(self.description.clone());
        point.intensity = Some(Intensity::Medium);
        point
    }
}

/// A mission projection returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    #[serde(flatten)]
    pub point: IntelligencePoint,
    pub confidence: f64,
    #[serde(default)]
    pub triangulation_basis: Vec<String>,
    #[serde(default)]
    pub strategic_value: String,
    #[serde(default)]
    pub time_window: String,
    #[serde(default)]
    pub required_units: Vec<String>,
    #[serde(default)]
    pub containment_strategy: String,
    #[serde(default)]
    pub threat_radius: f64,
}

/// Four-tier alert label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Verde,
    Amarillo,
    Rojo,
    Negro,
}

impl RiskLevel {
    /// Band a 0-100 risk score. Out-of-range scores are clamped.
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
        if score <= 20.0 {
            RiskLevel::Verde
        } else if score <= 50.0 {
            RiskLevel::Amarillo
        } else if score <= 75.0 {
            RiskLevel::Rojo
        } else {
            RiskLevel::Negro
        }
    }

    /// Parse a level label case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "VERDE" => Some(RiskLevel::Verde),
            "AMARILLO" => Some(RiskLevel::Amarillo),
            "ROJO" => Some(RiskLevel::Rojo),
            "NEGRO" => Some(RiskLevel::Negro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Verde => "VERDE",
            RiskLevel::Amarillo => "AMARILLO",
            RiskLevel::Rojo => "ROJO",
            RiskLevel::Negro => "NEGRO",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Verde => "#22c55e",
            RiskLevel::Amarillo => "#eab308",
            RiskLevel::Rojo => "#dc2626",
            RiskLevel::Negro => "#000000",
        }
    }

    /// Radius of the alert's threat circle, in metres
    pub fn alert_radius_m(&self) -> f64 {
        match self {
            RiskLevel::Negro => 80_000.0,
            _ => 40_000.0,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A withdrawal alert produced by the SDRGA run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdrgaAlert {
    #[serde(flatten)]
    pub point: IntelligencePoint,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub detected_anomalies: Vec<String>,
    pub probable_destination: GeoPoint,
    #[serde(default)]
    pub retreat_routes: Vec<Vec<GeoPoint>>,
    #[serde(default)]
    pub critical_corridors: Vec<String>,
    #[serde(default)]
    pub tactical_recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<f64>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Critical,
    High,
    Moderate,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Critical => "critical",
            ThreatLevel::High => "high",
            ThreatLevel::Moderate => "moderate",
        }
    }
}

/// Narrative synthesis of the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicSummary {
    pub overview: String,
    pub risk_level: ThreatLevel,
    #[serde(default)]
    pub key_insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route(details: Option<&str>) -> MovementRoute {
        MovementRoute {
            id: "rt-test".to_string(),
            name: "Test Route".to_string(),
            path: vec![
                GeoPoint::new(1.0, -70.0),
                GeoPoint::new(2.0, -71.0),
                GeoPoint::new(3.0, -72.0),
            ],
            kind: RouteKind::Illegal,
            description: "Base".to_string(),
            details: details.map(str::to_string),
        }
    }

    #[test]
    fn test_layer_from_str() {
        assert_eq!("fronts".parse::<IntelligenceLayer>().unwrap(), IntelligenceLayer::Fronts);
        assert_eq!(" SDRGA ".parse::<IntelligenceLayer>().unwrap(), IntelligenceLayer::Sdrga);
        assert!("borders".parse::<IntelligenceLayer>().is_err());
    }

    #[test]
    fn test_layer_serializes_lowercase() {
        let json = serde_json::to_string(&IntelligenceLayer::Infrastructure).unwrap();
        assert_eq!(json, "\"infrastructure\"");
    }

    #[test]
    fn test_generated_layers() {
        assert!(IntelligenceLayer::Predictions.is_generated());
        assert!(IntelligenceLayer::Sdrga.is_generated());
        assert!(!IntelligenceLayer::Fronts.is_generated());
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Verde);
        assert_eq!(RiskLevel::from_score(20.0), RiskLevel::Verde);
        assert_eq!(RiskLevel::from_score(20.5), RiskLevel::Amarillo);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::Amarillo);
        assert_eq!(RiskLevel::from_score(75.0), RiskLevel::Rojo);
        assert_eq!(RiskLevel::from_score(76.0), RiskLevel::Negro);
        assert_eq!(RiskLevel::from_score(250.0), RiskLevel::Negro);
        assert_eq!(RiskLevel::from_score(-3.0), RiskLevel::Verde);
    }

    #[test]
    fn test_risk_level_labels() {
        assert_eq!(RiskLevel::from_label("rojo"), Some(RiskLevel::Rojo));
        assert_eq!(RiskLevel::from_label(" NEGRO "), Some(RiskLevel::Negro));
        assert_eq!(RiskLevel::from_label("red"), None);
    }

    #[test]
    fn test_risk_level_radius() {
        assert_eq!(RiskLevel::Negro.alert_radius_m(), 80_000.0);
        assert_eq!(RiskLevel::Rojo.alert_radius_m(), 40_000.0);
    }

    #[test]
    fn test_point_parses_without_optional_fields() {
        let json = r#"{
            "id": "p1", "name": "Nodo", "description": "d", "type": "Enclave",
            "category": "urban", "lat": 1.8, "lng": -78.76
        }"#;
        let point: IntelligencePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.kind, "Enclave");
        assert!(point.commanders.is_empty());
        assert!(point.tactics.is_empty());
        assert!(point.intel_confidence.is_none());
    }

    #[test]
    fn test_point_camel_case_keys() {
        let mut point = IntelligencePoint::new(
            "p1",
            "Nodo",
            "Enclave",
            IntelligenceLayer::Urban,
            GeoPoint::new(1.0, 2.0),
        );
        point.influence_zones = vec!["Tumaco".to_string()];
        point.intel_confidence = Some(IntelConfidence::Alta);

        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["influenceZones"][0], "Tumaco");
        assert_eq!(value["intelConfidence"], "Alta");
        assert_eq!(value["type"], "Enclave");
        assert!(value.get("commanders").is_none());
    }

    #[test]
    fn test_route_selection_point_uses_center() {
        let point = sample_route(Some("Nocturno")).as_selection_point();
        assert_eq!(point.position(), GeoPoint::new(2.0, -71.0));
        assert_eq!(point.kind, "CORREDOR ILEGAL");
        assert_eq!(point.description, "Base - Nocturno");
        assert_eq!(point.category, IntelligenceLayer::Routes);
    }

    #[test]
    fn test_route_context_point_uses_origin() {
        let point = sample_route(None).as_context_point();
        assert_eq!(point.position(), GeoPoint::new(1.0, -70.0));
        assert_eq!(point.kind, "Ruta illegal");
        assert_eq!(point.description, "Base");
        assert_eq!(point.intensity, Some(Intensity::Medium));
    }

    #[test]
    fn test_empty_route_anchors_at_origin() {
        let mut route = sample_route(None);
        route.path.clear();
        assert_eq!(route.as_selection_point().position(), GeoPoint::default());
        assert_eq!(route.as_context_point().position(), GeoPoint::default());
    }

    #[test]
    fn test_route_kind_labels() {
        assert_eq!(RouteKind::Trocha.label(), "TROCHA FRONTERIZA");
        assert_eq!(RouteKind::Fluvial.label(), "RUTA FLUVIAL");
        assert_eq!(RouteKind::Legal.label(), "RUTA FLUVIAL");
    }

    #[test]
    fn test_summary_defaults_insights() {
        let json = r#"{"overview": "ok", "riskLevel": "critical"}"#;
        let summary: StrategicSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.risk_level, ThreatLevel::Critical);
        assert!(summary.key_insights.is_empty());
    }
}
