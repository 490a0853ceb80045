//! KiCad legacy schematic field defaults
//!
//! Reads KiCad 4/5 `.sch` schematics, fills in missing component fields from a
//! declarative rule set, derives footprints from package attributes, and writes
//! the schematic back in the same format.

pub mod emit;
pub mod error;
pub mod fields;
pub mod generate;
pub mod parser;
pub mod rules;

pub use emit::{write_schematic, write_schematic_with};
pub use error::SchematicError;
pub use generate::generate_footprint;
pub use parser::{Component, Field, Schematic};
pub use rules::{apply_defaults, RuleSet};

/// Apply the default rules, then the footprint generator, to every component
pub fn fill_fields(schematic: &mut Schematic, rules: &RuleSet) {
    for comp in &mut schematic.components {
        apply_defaults(comp, rules);
        generate_footprint(comp);
    }
}
