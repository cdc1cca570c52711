// GeoJSON export of the visible features.
//
// Coordinates are written [lng, lat] as RFC 7946 requires. Styling hints use
// the simplestyle property names (`marker-color`, `stroke`).

use crate::filter::VisibleFeatures;
use crate::model::{GeoPoint, IntelligenceLayer, IntelligencePoint};
use serde_json::{json, Value};

/// Stroke used for projected retreat paths
const RETREAT_STROKE: &str = "#ef4444";

fn position(point: GeoPoint) -> Value {
    json!([point.lng, point.lat])
}

fn point_feature(point: &IntelligencePoint, color: &str, extra: Value) -> Value {
    let mut properties = json!({
        "id": point.id,
        "name": point.name,
        "type": point.kind,
        "layer": point.category,
        "description": point.description,
        "marker-color": color,
    });
    if let (Some(props), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        props.extend(extra);
    }

    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position(point.position()) },
        "properties": properties,
    })
}

fn line_feature(path: &[GeoPoint], properties: Value) -> Value {
    let coordinates: Vec<Value> = path.iter().copied().map(position).collect();
    json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": coordinates },
        "properties": properties,
    })
}

/// Build a `FeatureCollection` from the features currently drawn
pub fn feature_collection(features: &VisibleFeatures<'_>) -> Value {
    let mut out = Vec::with_capacity(features.len());

    for point in &features.points {
        out.push(point_feature(point, point.category.color(), json!({})));
    }

    for route in &features.routes {
        out.push(line_feature(
            &route.path,
            json!({
                "id": route.id,
                "name": route.name,
                "type": route.kind.as_str(),
                "layer": IntelligenceLayer::Routes,
                "description": route.description,
                "stroke": route.kind.color(),
            }),
        ));
    }

    for prediction in &features.predictions {
        out.push(point_feature(
            &prediction.point,
            IntelligenceLayer::Predictions.color(),
            json!({
                "confidence": prediction.confidence,
                "threatRadius": prediction.threat_radius,
                "containmentStrategy": prediction.containment_strategy,
            }),
        ));
    }

    for alert in &features.alerts {
        out.push(point_feature(
            &alert.point,
            alert.risk_level.color(),
            json!({
                "riskScore": alert.risk_score,
                "riskLevel": alert.risk_level,
                "radius": alert.risk_level.alert_radius_m(),
                "probableDestination": position(alert.probable_destination),
            }),
        ));
        for (index, path) in alert.retreat_routes.iter().enumerate() {
            if path.len() < 2 {
                continue;
            }
            out.push(line_feature(
                path,
                json!({
                    "id": format!("{}-route-{}", alert.point.id, index),
                    "name": alert.point.name,
                    "layer": IntelligenceLayer::Sdrga,
                    "stroke": RETREAT_STROKE,
                }),
            ));
        }
    }

    json!({ "type": "FeatureCollection", "features": out })
}
