//! Fields derived from other fields

use crate::fields::{has_list_field, set_field};
use crate::parser::Component;

/// Field listing which fields may be generated
pub const GENERATE_FIELDS: &str = "Generate_Fields";

/// Build `Footprint` from the package attributes of `comp`.
///
/// Runs only when `Generate_Fields` lists `Footprint` and both
/// `Footprint_Library` and `Package` are set. The result has the shape
/// `Library:[Prefix_]Package[_Density][-Height][_Postfix]`, e.g.
/// `Resistor_SMD:R_0603_1608Metric`. Returns whether the footprint was set.
pub fn generate_footprint(comp: &mut Component) -> bool {
    if !has_list_field(comp, GENERATE_FIELDS, "Footprint") {
        return false;
    }

    let (Some(library), Some(package)) = (
        set_content(comp, "Footprint_Library"),
        set_content(comp, "Package"),
    ) else {
        return false;
    };

    let mut footprint = format!("{library}:");
    if let Some(prefix) = set_content(comp, "Footprint_Prefix") {
        footprint.push_str(prefix);
        footprint.push('_');
    }
    footprint.push_str(package);
    for (name, separator) in [
        ("Footprint_Density", '_'),
        ("Height", '-'),
        ("Footprint_Postfix", '_'),
    ] {
        if let Some(part) = set_content(comp, name) {
            footprint.push(separator);
            footprint.push_str(part);
        }
    }

    log::debug!("{}: Footprint = {}", comp.reference, footprint);
    set_field(comp, "Footprint", footprint);
    true
}

/// Content of field `name` unless it is missing, empty or the sentinel
fn set_content<'a>(comp: &'a Component, name: &str) -> Option<&'a str> {
    comp.field(name)
        .filter(|f| !f.is_unset())
        .map(|f| f.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(fields: &[(&str, &str)]) -> Component {
        let mut comp = Component {
            reference: "U1".to_string(),
            ..Default::default()
        };
        for (name, content) in fields {
            set_field(&mut comp, name, *content);
        }
        comp
    }

    #[test]
    fn test_library_and_package_only() {
        let mut comp = component(&[
            ("Footprint", "~"),
            ("Generate_Fields", "Footprint"),
            ("Footprint_Library", "MyLib"),
            ("Package", "SOIC8"),
            ("Footprint_Prefix", "~"),
            ("Footprint_Density", "~"),
            ("Height", "~"),
            ("Footprint_Postfix", "~"),
        ]);

        assert!(generate_footprint(&mut comp));
        assert_eq!(comp.content("Footprint"), Some("MyLib:SOIC8"));
    }

    #[test]
    fn test_all_parts() {
        let mut comp = component(&[
            ("Generate_Fields", "Value; Footprint"),
            ("Footprint_Library", "Capacitor_Tantalum_SMD"),
            ("Footprint_Prefix", "CP_EIA"),
            ("Package", "3528"),
            ("Footprint_Density", "21"),
            ("Height", "12"),
            ("Footprint_Postfix", "Kemet-B"),
        ]);

        assert!(generate_footprint(&mut comp));
        assert_eq!(
            comp.content("Footprint"),
            Some("Capacitor_Tantalum_SMD:CP_EIA_3528_21-12_Kemet-B")
        );
    }

    #[test]
    fn test_missing_optional_fields() {
        let mut comp = component(&[
            ("Generate_Fields", "Footprint"),
            ("Footprint_Library", "Resistor_SMD"),
            ("Footprint_Prefix", "R"),
            ("Package", "0603"),
            ("Footprint_Density", "1608Metric"),
        ]);

        assert!(generate_footprint(&mut comp));
        assert_eq!(
            comp.content("Footprint"),
            Some("Resistor_SMD:R_0603_1608Metric")
        );
    }

    #[test]
    fn test_requires_generate_marker() {
        let mut comp = component(&[
            ("Footprint", "Keep:This"),
            ("Footprint_Library", "MyLib"),
            ("Package", "SOIC8"),
        ]);

        assert!(!generate_footprint(&mut comp));
        assert_eq!(comp.content("Footprint"), Some("Keep:This"));
    }

    #[test]
    fn test_requires_library_and_package() {
        let mut comp = component(&[
            ("Generate_Fields", "Footprint"),
            ("Footprint_Library", "MyLib"),
            ("Package", "~"),
        ]);
        assert!(!generate_footprint(&mut comp));
        assert_eq!(comp.content("Footprint"), None);

        let mut comp = component(&[("Generate_Fields", "Footprint"), ("Package", "SOIC8")]);
        assert!(!generate_footprint(&mut comp));
    }
}
