//! Component blocks (`$Comp` ... `$EndComp`)

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use super::{positional, Token};
use crate::error::{Result, SchematicError};

/// Field names stored at the fixed indices 0 to 3
pub const CANONICAL_FIELDS: [&str; 4] = ["Reference", "Value", "Footprint", "Datasheet"];

/// Content of a field that is present but unset
pub const SENTINEL: &str = "~";

/// Characters collapsed to `_` when a user field name becomes a map key
static FIELD_NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-.]+").unwrap());

/// A symbol instance placed in the schematic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    /// Library symbol name from the `L` line (e.g., "Device:R")
    pub name: String,
    /// Reference designator (e.g., "R1", "#PWR01")
    pub reference: String,
    /// First `U` value
    pub unit: String,
    /// Second `U` value
    pub body_style: String,
    /// Third `U` value, the instance time stamp
    pub timestamp: String,
    /// Position from the `P` line
    pub x: String,
    pub y: String,
    /// Fields keyed by name, in the order they were read or added
    pub fields: IndexMap<String, Field>,
    /// Lines with tags this reader does not interpret, as raw tokens
    pub extra_lines: Vec<Vec<String>>,
}

/// A named attribute of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub content: String,
    pub orientation: String,
    pub x: String,
    pub y: String,
    pub font_size: String,
    /// Visibility flags, kept verbatim
    pub attributes: String,
    pub horizontal: String,
    pub vertical: String,
}

impl Field {
    /// A hidden, centered field at `(x, y)`, as created by the default rules
    pub fn new(content: impl Into<String>, x: &str, y: &str) -> Self {
        Field {
            content: content.into(),
            orientation: "H".to_string(),
            x: x.to_string(),
            y: y.to_string(),
            font_size: "10".to_string(),
            attributes: "0001".to_string(),
            horizontal: "C".to_string(),
            vertical: "CNN".to_string(),
        }
    }

    /// Whether the content is missing in all but name
    pub fn is_unset(&self) -> bool {
        self.content.is_empty() || self.content == SENTINEL
    }

    /// Decode an `F` line into its map key and field
    fn decode(tokens: &[Token], line_no: usize) -> Result<(String, Field)> {
        let [index, content, orientation, x, y, font_size, attributes, horizontal, vertical] =
            positional::<9>(tokens, line_no, "F")?;

        let index: usize = index.value().parse().map_err(|_| {
            SchematicError::malformed(
                line_no,
                format!("field index `{}` is not a number", index.value()),
            )
        })?;

        let name = match CANONICAL_FIELDS.get(index) {
            Some(name) => name.to_string(),
            None => {
                let name = tokens.get(10).ok_or_else(|| {
                    SchematicError::malformed(line_no, format!("field {index} has no name"))
                })?;
                field_key(name.value())
            }
        };

        let field = Field {
            content: content.value().to_string(),
            orientation: orientation.raw().to_string(),
            x: x.raw().to_string(),
            y: y.raw().to_string(),
            font_size: font_size.raw().to_string(),
            attributes: attributes.raw().to_string(),
            horizontal: horizontal.raw().to_string(),
            vertical: vertical.raw().to_string(),
        };

        Ok((name, field))
    }
}

impl Component {
    /// Power symbols and other pseudo-components have references like "#PWR01"
    pub fn is_pseudo(&self) -> bool {
        self.reference.starts_with('#')
    }

    /// Reference with its trailing number stripped ("R" for "R23")
    pub fn designator_class(&self) -> &str {
        self.reference.trim_end_matches(|c: char| c.is_ascii_digit())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Content of field `name`, if present
    pub fn content(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.content.as_str())
    }

    /// Apply one line from inside the block
    pub(super) fn read_line(&mut self, tokens: &[Token], line_no: usize) -> Result<()> {
        let Some(tag) = tokens.first() else {
            return Ok(());
        };

        match tag.raw() {
            "L" => {
                let [name, reference] = positional::<2>(tokens, line_no, "L")?;
                self.name = name.value().to_string();
                self.reference = reference.value().to_string();
            }
            "U" => {
                let [unit, body_style, timestamp] = positional::<3>(tokens, line_no, "U")?;
                self.unit = unit.raw().to_string();
                self.body_style = body_style.raw().to_string();
                self.timestamp = timestamp.raw().to_string();
            }
            "P" => {
                let [x, y] = positional::<2>(tokens, line_no, "P")?;
                self.x = x.raw().to_string();
                self.y = y.raw().to_string();
            }
            "F" => {
                let (name, field) = Field::decode(tokens, line_no)?;
                self.fields.insert(name, field);
            }
            _ => {
                self.extra_lines
                    .push(tokens.iter().map(|t| t.raw().to_string()).collect());
            }
        }

        Ok(())
    }
}

/// Turn a user field name into a map key ("Mfr. Part-No" → "Mfr_Part_No")
pub(crate) fn field_key(name: &str) -> String {
    FIELD_NAME_SEPARATORS.replace_all(name, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn read(component: &mut Component, line: &str) -> Result<()> {
        component.read_line(&tokenize(line).unwrap(), 1)
    }

    #[test]
    fn test_canonical_field_index() {
        let mut comp = Component::default();
        read(&mut comp, r#"F 1 "10k" H 4070 2955 50  0000 L CNN"#).unwrap();

        let value = comp.field("Value").unwrap();
        assert_eq!(value.content, "10k");
        assert_eq!(value.orientation, "H");
        assert_eq!(value.x, "4070");
        assert_eq!(value.y, "2955");
        assert_eq!(value.font_size, "50");
        assert_eq!(value.attributes, "0000");
        assert_eq!(value.horizontal, "L");
        assert_eq!(value.vertical, "CNN");
    }

    #[test]
    fn test_user_field_name_is_collapsed() {
        let mut comp = Component::default();
        read(
            &mut comp,
            r#"F 4 "Yageo" H 4000 3000 50  0001 C CNN "Mfr. Part - No""#,
        )
        .unwrap();
        assert_eq!(comp.content("Mfr_Part_No"), Some("Yageo"));
    }

    #[test]
    fn test_repeated_index_overwrites() {
        let mut comp = Component::default();
        read(&mut comp, r#"F 0 "R1" H 0 0 50  0000 C CNN"#).unwrap();
        read(&mut comp, r#"F 0 "R2" H 0 0 50  0000 C CNN"#).unwrap();
        assert_eq!(comp.fields.len(), 1);
        assert_eq!(comp.content("Reference"), Some("R2"));
    }

    #[test]
    fn test_header_lines() {
        let mut comp = Component::default();
        read(&mut comp, "L Device:R R12").unwrap();
        read(&mut comp, "U 1 1 5C8A1234").unwrap();
        read(&mut comp, "P 4000 3000").unwrap();
        read(&mut comp, "\t1    4000 3000").unwrap();

        assert_eq!(comp.name, "Device:R");
        assert_eq!(comp.reference, "R12");
        assert_eq!(comp.designator_class(), "R");
        assert_eq!(comp.unit, "1");
        assert_eq!(comp.body_style, "1");
        assert_eq!(comp.timestamp, "5C8A1234");
        assert_eq!((comp.x.as_str(), comp.y.as_str()), ("4000", "3000"));
        assert_eq!(comp.extra_lines, vec![vec!["1", "4000", "3000"]]);
    }

    #[test]
    fn test_malformed_field_lines() {
        let mut comp = Component::default();
        assert!(matches!(
            read(&mut comp, r#"F 0 "R1" H 0 0"#),
            Err(SchematicError::MalformedLine { line: 1, .. })
        ));
        assert!(matches!(
            read(&mut comp, r#"F x "R1" H 0 0 50 0000 C CNN"#),
            Err(SchematicError::MalformedLine { .. })
        ));
        assert!(matches!(
            read(&mut comp, r#"F 5 "v" H 0 0 50 0000 C CNN"#),
            Err(SchematicError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_pseudo_component() {
        let comp = Component {
            reference: "#PWR01".to_string(),
            ..Default::default()
        };
        assert!(comp.is_pseudo());
    }
}
