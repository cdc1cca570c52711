// Prompt builders for the three model actions.
//
// Each prompt is the shared operational context header, a task statement,
// and a compact JSON rendering of the records the action works from.

use crate::error::Result;
use crate::model::{GeoPoint, IntelConfidence, IntelligencePoint};
use serde::Serialize;

/// Operational picture shared by every prompt
pub const CONTEXT_HEADER: &str = "\
CONTEXTO OPERACIONAL (FEBRERO 2026):
- Panorama: conflicto fragmentado; convergen ELN, disidencias (EMC, EMBF) y crimen organizado (EGC).
- Actores: ELN (Frente El Boche), EGC, EMC (Frente Franco Benavides, drones), EMBF (Frente Rodrigo Cadete).
- Tácticas: drones con explosivos, artefactos improvisados, control social vía minería ilegal y cocaína.
- Incidentes: Catatumbo, Guaviare (El Retorno), Chapare (Bolivia), Imbabura (Ecuador).
- Salvaguarda: no revelar coordenadas operativas exactas; usar centroides municipales.";

#[derive(Serialize)]
struct AnalysisRecord<'a> {
    nombre: &'a str,
    tipo: &'a str,
    desc: &'a str,
    #[serde(skip_serializing_if = "no_items")]
    tacticas: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    fuente: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confianza: Option<IntelConfidence>,
}

fn no_items(items: &&[String]) -> bool {
    items.is_empty()
}

#[derive(Serialize)]
struct PredictionRecord<'a> {
    id: &'a str,
    name: &'a str,
    lat: f64,
    lng: f64,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct SdrgaRecord<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    location: GeoPoint,
    details: &'a str,
}

/// Strategic synthesis over the whole table
pub fn analysis_prompt(points: &[IntelligencePoint]) -> Result<String> {
    let records: Vec<_> = points
        .iter()
        .map(|p| AnalysisRecord {
            nombre: &p.name,
            tipo: &p.kind,
            desc: &p.description,
            tacticas: &p.tactics,
            fuente: p.source.as_deref(),
            confianza: p.intel_confidence,
        })
        .collect();

    Ok(format!(
        "{header}\n\n\
        Eres un analista senior de inteligencia del eje andino.\n\
        DATOS TÁCTICOS:\n{data}\n\n\
        Genera una SÍNTESIS DE INTELIGENCIA ESTRATÉGICA en español con:\n\
        1. Resumen del panorama: fragmentación y uso de drones.\n\
        2. Nivel de riesgo en Nariño, Caquetá y Risaralda.\n\
        3. Tres hallazgos clave sobre minería ilegal transfronteriza y disputas territoriales.\n\n\
        Responde ESTRICTAMENTE en JSON según el esquema.",
        header = CONTEXT_HEADER,
        data = serde_json::to_string(&records)?
    ))
}

/// Three 72-hour containment mission projections
pub fn prediction_prompt(points: &[IntelligencePoint]) -> Result<String> {
    let records: Vec<_> = points
        .iter()
        .map(|p| PredictionRecord {
            id: &p.id,
            name: &p.name,
            lat: p.lat,
            lng: p.lng,
            kind: &p.kind,
        })
        .collect();

    Ok(format!(
        "{header}\n\n\
        Actúa como estratega militar de alto mando (J-3 Operaciones).\n\
        DATOS DE INTELIGENCIA:\n{data}\n\n\
        TAREA: genera 3 proyecciones de misiones de contención para las próximas 72 horas.\n\
        Prioriza:\n\
        1. Interceptación de columnas del ELN cruzando el río Arauca.\n\
        2. Bloqueo de rutas de fentanilo en Nariño y Arauca.\n\
        3. Operaciones contra minería en la Amazonía (frontera con Brasil).\n\
        Para cada proyección indica ubicación (lat/lng), estrategia de contención, \
        activos requeridos y radio de amenaza.\n\n\
        Responde ESTRICTAMENTE con un arreglo JSON.",
        header = CONTEXT_HEADER,
        data = serde_json::to_string(&records)?
    ))
}

/// Withdrawal detection with projected retreat paths
pub fn sdrga_prompt(points: &[IntelligencePoint]) -> Result<String> {
    let records: Vec<_> = points
        .iter()
        .map(|p| SdrgaRecord {
            name: &p.name,
            kind: &p.kind,
            location: p.position(),
            details: &p.description,
        })
        .collect();

    Ok(format!(
        "{header}\n\n\
        Actúa como motor de pathfinding del SISTEMA SDRGA (Detección de Repliegues).\n\
        Detecta reacomodos o repliegues tácticos a partir de infraestructura, frentes y \
        acciones militares, y genera 3 ALERTAS SDRGA proyectando hacia dónde se moverán \
        las estructuras tras la presión militar actual.\n\n\
        RUTAS:\n\
        - \"probableDestination\": centro de gravedad del destino (lat, lng).\n\
        - \"retreatRoutes\": arreglos de coordenadas desde el punto de la alerta hasta el \
        destino, mínimo 4 puntos por ruta.\n\n\
        FACTORES DE RIESGO:\n\
        - Ruta Amazonía (río Puré / Cotuhé) hacia Brasil.\n\
        - Éxodo de los Comandos de la Frontera desde Ecuador hacia Nariño.\n\
        - Repliegue de laboratorios del ELN en Zulia hacia el Catatumbo.\n\n\
        DATOS DISPONIBLES EN EL MAPA:\n{data}\n\n\
        Responde ESTRICTAMENTE con un arreglo JSON.",
        header = CONTEXT_HEADER,
        data = serde_json::to_string(&records)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_analysis_prompt_uses_spanish_keys() {
        let data = Dataset::builtin();
        let prompt = analysis_prompt(&data.analysis_context()).unwrap();
        assert!(prompt.starts_with(CONTEXT_HEADER));
        assert!(prompt.contains("\"nombre\":\"Nodo Tumaco\""));
        assert!(prompt.contains("\"confianza\":\"Alta\""));
        assert!(prompt.contains("\"tacticas\":[\"Bombardeo\",\"Operación combinada\"]"));
    }

    #[test]
    fn test_analysis_prompt_omits_absent_fields() {
        let bare = IntelligencePoint::new(
            "x",
            "Punto",
            "Tipo",
            crate::model::IntelligenceLayer::Urban,
            GeoPoint::new(1.0, 2.0),
        );
        let prompt = analysis_prompt(&[bare]).unwrap();
        assert!(prompt.contains("[{\"nombre\":\"Punto\",\"tipo\":\"Tipo\",\"desc\":\"\"}]"));
        assert!(!prompt.contains("tacticas"));
        assert!(!prompt.contains("null"));
    }

    #[test]
    fn test_prediction_prompt_carries_coordinates() {
        let data = Dataset::builtin();
        let prompt = prediction_prompt(&data.prediction_context()).unwrap();
        assert!(prompt.contains("\"id\":\"act-catatumbo-2026\""));
        assert!(prompt.contains("\"lat\":8.64"));
        assert!(prompt.contains("\"type\":\"Operación Militar\""));
    }

    #[test]
    fn test_sdrga_prompt_includes_routes() {
        let data = Dataset::builtin();
        let prompt = sdrga_prompt(&data.sdrga_context()).unwrap();
        assert!(prompt.contains("\"type\":\"Ruta illegal\""));
        assert!(prompt.contains("\"location\":{\"lat\":-4.21,\"lng\":-69.94}"));
        assert!(prompt.contains("retreatRoutes"));
    }

    #[test]
    fn test_prompts_accept_empty_context() {
        assert!(analysis_prompt(&[]).unwrap().contains("[]"));
        assert!(prediction_prompt(&[]).unwrap().contains("[]"));
        assert!(sdrga_prompt(&[]).unwrap().contains("[]"));
    }
}
