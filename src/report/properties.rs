use std::collections::HashMap;

use crate::report::report_model::Property;
use crate::trace::trace_model::VariableScope;

/// Merge global and environment variables into report properties.
///
/// Globals are applied first and environment values override them, so a
/// key present in both appears once with the environment value. Keys keep
/// the position of their first appearance. An empty result means the
/// `<properties>` element must be left out.
pub fn merge(environment: &VariableScope, globals: &VariableScope) -> Vec<Property> {
    let mut merged: Vec<Property> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for variable in globals.enabled().chain(environment.enabled()) {
        let value = variable.value_text();
        match positions.get(&variable.key).copied() {
            Some(i) => merged[i].value = value,
            None => {
                positions.insert(variable.key.clone(), merged.len());
                merged.push(Property {
                    name: variable.key.clone(),
                    value,
                });
            }
        }
    }

    merged
}
