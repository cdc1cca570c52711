//! Layer visibility and text search over the dataset.

use crate::dataset::Dataset;
use crate::model::{
    IntelligenceLayer, IntelligencePoint, MovementRoute, PredictionPoint, SdrgaAlert,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Set of layers currently drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSet {
    enabled: BTreeSet<IntelligenceLayer>,
}

impl Default for LayerSet {
    fn default() -> Self {
        [
            IntelligenceLayer::Fronts,
            IntelligenceLayer::Routes,
            IntelligenceLayer::Infrastructure,
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<IntelligenceLayer> for LayerSet {
    fn from_iter<I: IntoIterator<Item = IntelligenceLayer>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

impl LayerSet {
    pub fn empty() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    pub fn all() -> Self {
        IntelligenceLayer::ALL.into_iter().collect()
    }

    /// Flip a layer on or off
    pub fn toggle(&mut self, layer: IntelligenceLayer) {
        if !self.enabled.remove(&layer) {
            self.enabled.insert(layer);
        }
    }

    pub fn enable(&mut self, layer: IntelligenceLayer) {
        self.enabled.insert(layer);
    }

    pub fn is_enabled(&self, layer: IntelligenceLayer) -> bool {
        self.enabled.contains(&layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = IntelligenceLayer> + '_ {
        self.enabled.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

/// Case-insensitive substring match on name or description.
/// The empty term matches everything.
pub fn matches_search(point: &IntelligencePoint, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    point.name.to_lowercase().contains(&term) || point.description.to_lowercase().contains(&term)
}

pub fn filter_points<'a>(points: &'a [IntelligencePoint], term: &str) -> Vec<&'a IntelligencePoint> {
    points.iter().filter(|p| matches_search(p, term)).collect()
}

/// Everything a map would draw for the current layer set and search term
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisibleFeatures<'a> {
    pub points: Vec<&'a IntelligencePoint>,
    pub routes: Vec<&'a MovementRoute>,
    pub predictions: Vec<&'a PredictionPoint>,
    pub alerts: Vec<&'a SdrgaAlert>,
}

impl VisibleFeatures<'_> {
    pub fn len(&self) -> usize {
        self.points.len() + self.routes.len() + self.predictions.len() + self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Select visible features. Static points honour both the layer set and the
/// search term; routes and model output honour the layer set only.
pub fn visible_features<'a>(
    dataset: &'a Dataset,
    layers: &LayerSet,
    term: &str,
    predictions: &'a [PredictionPoint],
    alerts: &'a [SdrgaAlert],
) -> VisibleFeatures<'a> {
    let mut visible = VisibleFeatures::default();

    for layer in [
        IntelligenceLayer::Fronts,
        IntelligenceLayer::Actions,
        IntelligenceLayer::Infrastructure,
        IntelligenceLayer::Urban,
    ] {
        if layers.is_enabled(layer) {
            visible.points.extend(filter_points(dataset.points(layer), term));
        }
    }

    if layers.is_enabled(IntelligenceLayer::Routes) {
        visible.routes.extend(dataset.routes.iter());
    }
    if layers.is_enabled(IntelligenceLayer::Predictions) {
        visible.predictions.extend(predictions.iter());
    }
    if layers.is_enabled(IntelligenceLayer::Sdrga) {
        visible.alerts.extend(alerts.iter());
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(features: &VisibleFeatures<'_>) -> Vec<String> {
        features.points.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_default_layers() {
        let layers = LayerSet::default();
        assert!(layers.is_enabled(IntelligenceLayer::Fronts));
        assert!(layers.is_enabled(IntelligenceLayer::Routes));
        assert!(layers.is_enabled(IntelligenceLayer::Infrastructure));
        assert!(!layers.is_enabled(IntelligenceLayer::Actions));
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_toggle_twice_restores() {
        for layer in IntelligenceLayer::ALL {
            let mut layers = LayerSet::default();
            let before = layers.clone();
            layers.toggle(layer);
            assert_ne!(layers, before);
            layers.toggle(layer);
            assert_eq!(layers, before);
        }
    }

    #[test]
    fn test_enable_idempotent() {
        let mut layers = LayerSet::empty();
        layers.enable(IntelligenceLayer::Sdrga);
        layers.enable(IntelligenceLayer::Sdrga);
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_search_case_insensitive() {
        let data = Dataset::builtin();
        let upper = filter_points(&data.fronts, "NARIÑO");
        let lower = filter_points(&data.fronts, "nariño");
        assert!(!upper.is_empty());
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_search_matches_description() {
        let data = Dataset::builtin();
        let hits = filter_points(&data.fronts, "drones");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "emc-benavides-2026");
    }

    #[test]
    fn test_empty_search_returns_all() {
        let data = Dataset::builtin();
        assert_eq!(filter_points(&data.fronts, "").len(), data.fronts.len());
    }

    #[test]
    fn test_search_no_match() {
        let data = Dataset::builtin();
        assert!(filter_points(&data.fronts, "zzz-no-match").is_empty());
    }

    #[test]
    fn test_visible_respects_layers() {
        let data = Dataset::builtin();
        let visible = visible_features(&data, &LayerSet::default(), "", &[], &[]);
        assert_eq!(visible.points.len(), 5 + 1);
        assert_eq!(visible.routes.len(), 4);

        let none = visible_features(&data, &LayerSet::empty(), "", &[], &[]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_visible_is_subset_of_dataset() {
        let data = Dataset::builtin();
        let all = data.all_points();
        for term in ["", "eln", "TUMACO", "nothing-here"] {
            let visible = visible_features(&data, &LayerSet::all(), term, &[], &[]);
            for point in &visible.points {
                assert!(all.iter().any(|p| p == *point));
            }
        }
    }

    #[test]
    fn test_search_does_not_hide_routes() {
        let data = Dataset::builtin();
        let visible = visible_features(&data, &LayerSet::all(), "tumaco", &[], &[]);
        assert_eq!(visible.routes.len(), data.routes.len());
        assert_eq!(ids(&visible), vec!["urb-tumaco-2026"]);
    }
}
