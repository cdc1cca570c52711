// Output schemas requested from the model for each action.

use crate::llm::Schema;

fn coordinate() -> Schema {
    Schema::object(
        vec![("lat", Schema::number()), ("lng", Schema::number())],
        &["lat", "lng"],
    )
}

fn string_list() -> Schema {
    Schema::array(Schema::string())
}

pub fn summary_schema() -> Schema {
    Schema::object(
        vec![
            ("overview", Schema::string()),
            ("riskLevel", Schema::one_of(&["critical", "high", "moderate"])),
            ("keyInsights", string_list()),
        ],
        &["overview", "riskLevel", "keyInsights"],
    )
}

pub fn prediction_schema() -> Schema {
    Schema::array(Schema::object(
        vec![
            ("name", Schema::string()),
            ("description", Schema::string()),
            ("lat", Schema::number()),
            ("lng", Schema::number()),
            ("confidence", Schema::number()),
            ("strategicValue", Schema::string()),
            ("timeWindow", Schema::string()),
            ("requiredUnits", string_list()),
            ("containmentStrategy", Schema::string()),
            ("threatRadius", Schema::number()),
        ],
        &[
            "name",
            "description",
            "lat",
            "lng",
            "confidence",
            "strategicValue",
            "timeWindow",
            "requiredUnits",
            "containmentStrategy",
            "threatRadius",
        ],
    ))
}

pub fn alert_schema() -> Schema {
    Schema::array(Schema::object(
        vec![
            ("name", Schema::string()),
            ("description", Schema::string()),
            ("lat", Schema::number()),
            ("lng", Schema::number()),
            ("probableDestination", coordinate()),
            ("retreatRoutes", Schema::array(Schema::array(coordinate()))),
            ("riskScore", Schema::number()),
            ("riskLevel", Schema::one_of(&["VERDE", "AMARILLO", "ROJO", "NEGRO"])),
            ("detectedAnomalies", string_list()),
            ("criticalCorridors", string_list()),
            ("tacticalRecommendations", string_list()),
            ("confidenceInterval", Schema::number()),
        ],
        &[
            "name",
            "description",
            "lat",
            "lng",
            "probableDestination",
            "retreatRoutes",
            "riskScore",
            "riskLevel",
            "detectedAnomalies",
            "criticalCorridors",
            "tacticalRecommendations",
        ],
    ))
}
