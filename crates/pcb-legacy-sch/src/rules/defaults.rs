//! Rule cascade over a single component

use super::{FieldDefaults, RuleSet};
use crate::fields::add_field;
use crate::parser::Component;

/// Add every default from `rules` that applies to `comp` and is not set yet.
///
/// Existing fields are never changed, so applying the same rules twice has no
/// further effect. Pseudo-components (references starting with `#`) are skipped.
pub fn apply_defaults(comp: &mut Component, rules: &RuleSet) {
    if comp.is_pseudo() {
        return;
    }

    let class = comp.designator_class().to_string();

    add_all(comp, &rules.fields);

    // Every matching reference rule applies, not just the first
    for rule in &rules.references {
        if !rule.pattern.matches(&class) {
            continue;
        }
        add_all(comp, &rule.fields);

        for sub in &rule.component_names {
            if sub.pattern.matches(&comp.name) {
                add_all(comp, &sub.fields);
            }
        }
    }
}

fn add_all(comp: &mut Component, fields: &FieldDefaults) {
    for (name, content) in fields {
        if add_field(comp, name, content.as_str()) {
            log::debug!("{}: added {} = {}", comp.reference, name, content);
        }
    }
}
