//! The static intelligence table.
//!
//! Records are loaded once at startup (either the built-in table or a JSON
//! file of the same shape) and never mutated afterwards.

use crate::error::{Error, Result};
use crate::model::{
    GeoPoint, IntelConfidence, IntelligenceLayer, IntelligencePoint, Intensity, MovementRoute,
    RouteKind,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Centre of the conflict theatre (Colombia plus its Venezuelan, Ecuadorian
/// and Brazilian borders)
pub const THEATER_CENTER: GeoPoint = GeoPoint::new(4.0, -72.0);

/// All static records, grouped by layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub fronts: Vec<IntelligencePoint>,
    pub actions: Vec<IntelligencePoint>,
    pub infrastructure: Vec<IntelligencePoint>,
    pub routes: Vec<MovementRoute>,
    pub urban: Vec<IntelligencePoint>,
}

impl Dataset {
    /// Load a dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&contents)
            .map_err(|e| Error::dataset(path, e.to_string()))?;
        dataset.check_categories(path)?;
        tracing::debug!(
            path = %path.display(),
            points = dataset.all_points().len(),
            routes = dataset.routes.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Every point must sit in the section matching its category
    fn check_categories(&self, path: &Path) -> Result<()> {
        let sections = [
            (IntelligenceLayer::Fronts, &self.fronts),
            (IntelligenceLayer::Actions, &self.actions),
            (IntelligenceLayer::Infrastructure, &self.infrastructure),
            (IntelligenceLayer::Urban, &self.urban),
        ];
        for (layer, points) in sections {
            if let Some(point) = points.iter().find(|p| p.category != layer) {
                return Err(Error::dataset(
                    path,
                    format!(
                        "point '{}' has category '{}' but is listed under '{}'",
                        point.id, point.category, layer
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Static points drawn on a layer. Routes and model-generated layers
    /// have no static points.
    pub fn points(&self, layer: IntelligenceLayer) -> &[IntelligencePoint] {
        match layer {
            IntelligenceLayer::Fronts => &self.fronts,
            IntelligenceLayer::Actions => &self.actions,
            IntelligenceLayer::Infrastructure => &self.infrastructure,
            IntelligenceLayer::Urban => &self.urban,
            IntelligenceLayer::Routes
            | IntelligenceLayer::Predictions
            | IntelligenceLayer::Sdrga => &[],
        }
    }

    /// Number of static records on a layer
    pub fn count(&self, layer: IntelligenceLayer) -> usize {
        match layer {
            IntelligenceLayer::Routes => self.routes.len(),
            other => self.points(other).len(),
        }
    }

    /// Every static point: fronts, actions, infrastructure, urban
    pub fn all_points(&self) -> Vec<IntelligencePoint> {
        self.collect(&[
            IntelligenceLayer::Fronts,
            IntelligenceLayer::Actions,
            IntelligenceLayer::Infrastructure,
            IntelligenceLayer::Urban,
        ])
    }

    /// Context for the strategic synthesis
    pub fn analysis_context(&self) -> Vec<IntelligencePoint> {
        self.all_points()
    }

    /// Context for mission predictions
    pub fn prediction_context(&self) -> Vec<IntelligencePoint> {
        self.collect(&[
            IntelligenceLayer::Fronts,
            IntelligenceLayer::Actions,
            IntelligenceLayer::Infrastructure,
        ])
    }

    /// Context for the SDRGA run: fronts, actions and every route
    pub fn sdrga_context(&self) -> Vec<IntelligencePoint> {
        let mut points = self.collect(&[IntelligenceLayer::Fronts, IntelligenceLayer::Actions]);
        points.extend(self.routes.iter().map(MovementRoute::as_context_point));
        points
    }

    fn collect(&self, layers: &[IntelligenceLayer]) -> Vec<IntelligencePoint> {
        layers
            .iter()
            .flat_map(|layer| self.points(*layer).iter().cloned())
            .collect()
    }

    pub fn route(&self, id: &str) -> Option<&MovementRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Look up a point or a route by id. Routes come back as their
    /// selection point.
    pub fn find(&self, id: &str) -> Option<IntelligencePoint> {
        let point = [
            &self.fronts,
            &self.actions,
            &self.infrastructure,
            &self.urban,
        ]
        .into_iter()
        .flat_map(|points| points.iter())
        .find(|p| p.id == id)
        .cloned();

        point.or_else(|| self.route(id).map(MovementRoute::as_selection_point))
    }

    /// The hand-authored table for the Andean theatre (February 2026)
    pub fn builtin() -> Self {
        Self {
            fronts: builtin_fronts(),
            actions: builtin_actions(),
            infrastructure: builtin_infrastructure(),
            routes: builtin_routes(),
            urban: builtin_urban(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn path(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
    coords.iter().map(|&(lat, lng)| GeoPoint::new(lat, lng)).collect()
}

fn front(
    id: &str,
    name: &str,
    description: &str,
    kind: &str,
    position: (f64, f64),
    intensity: Intensity,
    source: &str,
) -> IntelligencePoint {
    let mut point = IntelligencePoint::new(
        id,
        name,
        kind,
        IntelligenceLayer::Fronts,
        GeoPoint::new(position.0, position.1),
    )
    .with_description(description);
    point.intensity = Some(intensity);
    point.intel_confidence = Some(IntelConfidence::Alta);
    point.source = Some(source.to_string());
    point
}

fn builtin_fronts() -> Vec<IntelligencePoint> {
    let mut boche = front(
        "eln-boche-2026",
        "ELN - Frente Manuel Hernández \"El Boche\"",
        "Consolidación territorial en Risaralda. Adscrito al Frente de Guerra Occidental. \
         Enfoque en control social y expansión municipal.",
        "Guerrilla (ELN)",
        (5.25, -75.90),
        Intensity::High,
        "Alerta Temprana 001-2026",
    );
    boche.commanders = strings(&["Antonio García (Liderazgo Nacional)"]);
    boche.influence_zones = strings(&["Risaralda", "Chocó"]);

    let mut benavides = front(
        "emc-benavides-2026",
        "EMC - Frente Franco Benavides",
        "Uso intensivo de drones con explosivos como repertorio principal. \
         Disputa activa en Nariño.",
        "Disidencia FARC (EMC)",
        (1.65, -77.55),
        Intensity::High,
        "Alerta Temprana 005-2026",
    );
    benavides.tactics = strings(&["Drones con explosivos", "Artefactos improvisados"]);
    benavides.influence_zones = strings(&["Nariño (El Peñol, El Tambo)"]);

    let mut sinisterra = front(
        "frente-oliver-sinisterra",
        "Frente Oliver Sinisterra",
        "Articulado a Segunda Marquetalia. Control de rutas de salida en el Pacífico nariñense.",
        "Segunda Marquetalia",
        (1.80, -78.70),
        Intensity::High,
        "Indepaz 2026",
    );
    sinisterra.influence_zones = strings(&["Tumaco", "Francisco Pizarro"]);

    let mut cano = front(
        "frente-alfonso-cano",
        "Frente Alfonso Cano",
        "Estructura de la Segunda Marquetalia con fuerte presencia en el litoral pacífico.",
        "Segunda Marquetalia",
        (2.10, -78.40),
        Intensity::Medium,
        "Indepaz 2026",
    );
    cano.influence_zones = strings(&["Mosquera", "Olaya Herrera"]);

    let mut comuneros = front(
        "frente-comuneros-sur",
        "ELN - Frente Comuneros del Sur",
        "Histórica presencia en el pie de monte costero y zona andina de Nariño.",
        "Guerrilla (ELN)",
        (1.20, -77.80),
        Intensity::High,
        "Indepaz 2026",
    );
    comuneros.influence_zones = strings(&["Ricaurte", "Mallama", "Cumbitara"]);

    vec![boche, benavides, sinisterra, cano, comuneros]
}

fn builtin_actions() -> Vec<IntelligencePoint> {
    let mut catatumbo = IntelligencePoint::new(
        "act-catatumbo-2026",
        "Operación de Alta Precisión Catatumbo",
        "Operación Militar",
        IntelligenceLayer::Actions,
        GeoPoint::new(8.64, -72.74),
    )
    .with_description(
        "Operación aérea y terrestre del Ejército. Incautación de armas, explosivos y \
         destrucción de drones.",
    );
    catatumbo.date = Some("04/02/2026".to_string());
    catatumbo.intensity = Some(Intensity::High);
    catatumbo.tactics = strings(&["Bombardeo", "Operación combinada"]);
    catatumbo.source = Some("EFE / Ejército de Colombia".to_string());
    catatumbo.intel_confidence = Some(IntelConfidence::Alta);

    let mut retorno = IntelligencePoint::new(
        "act-retorno-2026",
        "Enfrentamiento Intra-Disidencias El Retorno",
        "Combate Grupos Armados",
        IntelligenceLayer::Actions,
        GeoPoint::new(2.33, -72.63),
    )
    .with_description(
        "Choque letal entre facciones de Iván Mordisco y Calarcá Córdoba. 27 bajas confirmadas.",
    );
    retorno.date = Some("19/01/2026".to_string());
    retorno.intensity = Some(Intensity::High);
    retorno.tactics = strings(&["Choque armado directo"]);
    retorno.source = Some("Reuters / Fuentes Militares".to_string());
    retorno.intel_confidence = Some(IntelConfidence::Alta);

    vec![catatumbo, retorno]
}

fn builtin_infrastructure() -> Vec<IntelligencePoint> {
    let mut guadalupe = IntelligencePoint::new(
        "inf-guadalupe-2026",
        "Laboratorio Industrial Guadalupe",
        "Instalación de Transformación",
        IntelligenceLayer::Infrastructure,
        GeoPoint::new(6.81, -75.24),
    )
    .with_description(
        "Infraestructura de producción de clorhidrato de cocaína a escala industrial. \
         Capacidad semanal masiva.",
    );
    guadalupe.illegal_economy = strings(&["Cocaína"]);
    guadalupe.source = Some("El Tiempo / Fiscalía".to_string());
    guadalupe.intel_confidence = Some(IntelConfidence::Alta);

    vec![guadalupe]
}

fn builtin_routes() -> Vec<MovementRoute> {
    vec![
        MovementRoute {
            id: "rt-venezuela-arauca".to_string(),
            name: "Corredor Fronterizo Arauca-Apure".to_string(),
            kind: RouteKind::Illegal,
            description: "Ruta de repliegue y movilidad siguiendo el lindero del río Arauca."
                .to_string(),
            path: path(&[
                (7.08, -70.75),
                (7.05, -70.95),
                (7.01, -71.12),
                (6.98, -71.45),
                (6.95, -71.87),
                (7.05, -72.10),
            ]),
            details: Some("Tránsito fluvial nocturno altamente vigilado.".to_string()),
        },
        MovementRoute {
            id: "rt-amazonas-pacifico".to_string(),
            name: "Eje Estratégico Amazonas-Pacífico".to_string(),
            kind: RouteKind::Illegal,
            description:
                "Corredor de movilidad transnacional desde Leticia hacia el litoral nariñense."
                    .to_string(),
            path: path(&[
                (-4.21, -69.94),
                (-2.50, -71.50),
                (-1.00, -74.00),
                (0.00, -75.50),
                (0.50, -76.80),
                (1.20, -77.50),
                (1.80, -78.76),
            ]),
            details: Some("Ruta de economías ilícitas y repliegue estratégico.".to_string()),
        },
        MovementRoute {
            id: "rt-narino-cordillera".to_string(),
            name: "Corredor Táctico Mpios Cordillera".to_string(),
            kind: RouteKind::Trocha,
            description: "Ruta de movilidad interna en la subregión Cordillera de Nariño."
                .to_string(),
            path: path(&[(1.90, -77.30), (1.75, -77.45), (1.65, -77.55), (1.55, -77.65)]),
            details: None,
        },
        MovementRoute {
            id: "rt-narino-abades".to_string(),
            name: "Corredor Táctico Abades".to_string(),
            kind: RouteKind::Trocha,
            description: "Ruta de movilidad interna en la subregión Abades de Nariño.".to_string(),
            path: path(&[(1.40, -77.35), (1.50, -77.50), (1.65, -77.55)]),
            details: None,
        },
    ]
}

fn builtin_urban() -> Vec<IntelligencePoint> {
    let mut tumaco = IntelligencePoint::new(
        "urb-tumaco-2026",
        "Nodo Tumaco",
        "Enclave Logístico",
        IntelligenceLayer::Urban,
        GeoPoint::new(1.80, -78.76),
    )
    .with_description("Punto crítico de convergencia de rutas del Pacífico y el Amazonas.");
    tumaco.source = Some("Indepaz 2026".to_string());

    vec![tumaco]
}
