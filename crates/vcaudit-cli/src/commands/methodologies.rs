use serde_json::{json, Value};
use vcaudit_core::ValuationEngine;

pub fn run(engine: &ValuationEngine) -> Value {
    let methodologies = engine
        .methodology_catalog()
        .into_iter()
        .map(|info| json!({ "name": info.name, "description": info.description }))
        .collect::<Vec<_>>();
    let context = engine.context();

    json!({
        "methodologies": methodologies,
        "public_indices": context.index_source().indices(),
        "comparable_sectors": context.comps_source().sectors(),
    })
}
