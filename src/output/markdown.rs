// Markdown briefing

use super::Briefing;
use crate::model::IntelligenceLayer;

/// Render a briefing as Markdown
pub fn render_markdown(briefing: &Briefing<'_>) -> String {
    let features = &briefing.features;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", briefing.title));
    md.push_str(&format!("- **Generado:** {}\n", briefing.generated_at));
    md.push_str(&format!(
        "- **Capas:** {}\n",
        briefing
            .layers
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    if !briefing.search.is_empty() {
        md.push_str(&format!("- **Búsqueda:** {}\n", briefing.search));
    }
    md.push('\n');

    if let Some(summary) = briefing.summary {
        md.push_str(&format!(
            "## Síntesis estratégica ({})\n\n",
            summary.risk_level.as_str()
        ));
        md.push_str(&format!("{}\n\n", summary.overview));
        for insight in &summary.key_insights {
            md.push_str(&format!("- {}\n", insight));
        }
        md.push('\n');
    }

    if let Some(selected) = briefing.selected {
        md.push_str(&format!("## Ficha: {}\n\n", selected.name));
        md.push_str(&format!("*{}* ({:.2}, {:.2})\n\n", selected.kind, selected.lat, selected.lng));
        md.push_str(&format!("{}\n\n", selected.description));
    }

    for layer in [
        IntelligenceLayer::Fronts,
        IntelligenceLayer::Actions,
        IntelligenceLayer::Infrastructure,
        IntelligenceLayer::Urban,
    ] {
        let points: Vec<_> = features.points.iter().filter(|p| p.category == layer).collect();
        if points.is_empty() {
            continue;
        }
        md.push_str(&format!("## {}\n\n", layer.label()));
        for point in points {
            md.push_str(&format!("### {}\n\n", point.name));
            md.push_str(&format!("- **Tipo:** {}\n", point.kind));
            md.push_str(&format!("- **Posición:** {:.2}, {:.2}\n", point.lat, point.lng));
            if let Some(source) = &point.source {
                md.push_str(&format!("- **Fuente:** {}\n", source));
            }
            if !point.tactics.is_empty() {
                md.push_str(&format!("- **Tácticas:** {}\n", point.tactics.join(", ")));
            }
            md.push_str(&format!("\n{}\n\n", point.description));
        }
    }

    if !features.routes.is_empty() {
        md.push_str(&format!("## {}\n\n", IntelligenceLayer::Routes.label()));
        for route in &features.routes {
            md.push_str(&format!(
                "- **{}** ({}, {} vértices): {}\n",
                route.name,
                route.kind.as_str(),
                route.path.len(),
                route.description
            ));
        }
        md.push('\n');
    }

    if !features.predictions.is_empty() {
        md.push_str(&format!("## {}\n\n", IntelligenceLayer::Predictions.label()));
        for prediction in &features.predictions {
            md.push_str(&format!(
                "### {} ({:.0}%)\n\n",
                prediction.point.name,
                prediction.confidence * 100.0
            ));
            md.push_str(&format!("- **Ventana:** {}\n", prediction.time_window));
            md.push_str(&format!("- **Estrategia:** {}\n", prediction.containment_strategy));
            if !prediction.required_units.is_empty() {
                md.push_str(&format!(
                    "- **Activos:** {}\n",
                    prediction.required_units.join(", ")
                ));
            }
            md.push_str(&format!("\n{}\n\n", prediction.point.description));
        }
    }

    if !features.alerts.is_empty() {
        md.push_str(&format!("## {}\n\n", IntelligenceLayer::Sdrga.label()));
        for alert in &features.alerts {
            md.push_str(&format!(
                "### [{}] {} (riesgo {:.0})\n\n",
                alert.risk_level, alert.point.name, alert.risk_score
            ));
            md.push_str(&format!(
                "- **Destino probable:** {:.2}, {:.2}\n",
                alert.probable_destination.lat, alert.probable_destination.lng
            ));
            if !alert.critical_corridors.is_empty() {
                md.push_str(&format!(
                    "- **Corredores:** {}\n",
                    alert.critical_corridors.join(", ")
                ));
            }
            for recommendation in &alert.tactical_recommendations {
                md.push_str(&format!("- {}\n", recommendation));
            }
            md.push('\n');
        }
    }

    md
}
