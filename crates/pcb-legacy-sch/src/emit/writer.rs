//! Schematic → `.sch` text
//!
//! Output is normalized rather than byte-identical to the input: field
//! contents are always quoted, canonical fields come first at indices 0 to 3,
//! user fields follow from index 4, and unrecognized records are dropped.
//! Writing a parsed file and parsing it again yields the same schematic.

use crate::error::{Result, SchematicError};
use crate::parser::{Component, Field, Schematic, CANONICAL_FIELDS};
use std::fmt::Write;

/// Indent used for wire coordinates and pass-through component lines
const INDENT: &str = "    ";

/// Serialize `schematic` to `.sch` text
pub fn write_schematic(schematic: &Schematic) -> Result<String> {
    write_schematic_with(schematic, str::to_string)
}

/// Serialize `schematic`, passing every field content through `content`
/// before it is quoted
pub fn write_schematic_with<F>(schematic: &Schematic, content: F) -> Result<String>
where
    F: Fn(&str) -> String,
{
    let mut out = String::new();

    emit_header(&mut out, schematic);
    emit_sheet(&mut out, schematic);

    for comp in &schematic.components {
        emit_component(&mut out, comp, &content)?;
    }

    emit_drawing(&mut out, schematic);

    writeln!(out, "$EndSCHEMATC").unwrap();

    Ok(out)
}

// =============================================================================
// Header and page
// =============================================================================

fn emit_header(out: &mut String, schematic: &Schematic) {
    writeln!(out, "EESchema Schematic File Version {}", schematic.version).unwrap();

    for lib in &schematic.libraries {
        writeln!(out, "LIBS:{}", lib).unwrap();
    }

    for layer in &schematic.layers {
        writeln!(out, "EELAYER {} {}", layer.0, layer.1).unwrap();
    }
    writeln!(out, "EELAYER END").unwrap();
}

fn emit_sheet(out: &mut String, schematic: &Schematic) {
    let sheet = &schematic.sheet;
    writeln!(out, "$Descr {} {} {}", sheet.paper, sheet.width, sheet.height).unwrap();

    for prop in &sheet.properties {
        if prop.values.is_empty() {
            writeln!(out, "{}", prop.name).unwrap();
        } else {
            writeln!(out, "{} {}", prop.name, prop.values.join(" ")).unwrap();
        }
    }

    writeln!(out, "$EndDescr").unwrap();
}

// =============================================================================
// Components
// =============================================================================

fn emit_component<F>(out: &mut String, comp: &Component, content: &F) -> Result<()>
where
    F: Fn(&str) -> String,
{
    // Check before writing anything so a failure leaves no partial block
    let canonical = CANONICAL_FIELDS
        .iter()
        .map(|&name| {
            comp.field(name)
                .ok_or_else(|| SchematicError::MissingCanonicalField {
                    reference: comp.reference.clone(),
                    field: name,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    writeln!(out, "$Comp").unwrap();
    writeln!(out, "L {} {}", comp.name, comp.reference).unwrap();
    writeln!(out, "U {} {} {}", comp.unit, comp.body_style, comp.timestamp).unwrap();
    writeln!(out, "P {} {}", comp.x, comp.y).unwrap();

    for (index, field) in canonical.into_iter().enumerate() {
        emit_field(out, index, field, None, content);
    }

    let user_fields = comp
        .fields
        .iter()
        .filter(|(name, _)| !CANONICAL_FIELDS.contains(&name.as_str()));
    for (index, (name, field)) in user_fields.enumerate() {
        emit_field(
            out,
            index + CANONICAL_FIELDS.len(),
            field,
            Some(name.as_str()),
            content,
        );
    }

    for line in &comp.extra_lines {
        writeln!(out, "{}{}", INDENT, line.join(" ")).unwrap();
    }

    writeln!(out, "$EndComp").unwrap();
    Ok(())
}

fn emit_field<F>(out: &mut String, index: usize, field: &Field, name: Option<&str>, content: &F)
where
    F: Fn(&str) -> String,
{
    write!(
        out,
        "F {} \"{}\" {} {} {} {} {} {} {}",
        index,
        content(&field.content),
        field.orientation,
        field.x,
        field.y,
        field.font_size,
        field.attributes,
        field.horizontal,
        field.vertical
    )
    .unwrap();

    if let Some(name) = name {
        write!(out, " \"{}\"", name).unwrap();
    }

    writeln!(out).unwrap();
}

// =============================================================================
// Text, wires and markers
// =============================================================================

fn emit_drawing(out: &mut String, schematic: &Schematic) {
    for text in &schematic.texts {
        write!(
            out,
            "Text {} {} {} {} {} {}",
            text.kind, text.x, text.y, text.orientation, text.font_size, text.shape
        )
        .unwrap();
        for token in &text.trailing {
            write!(out, " {}", token).unwrap();
        }
        writeln!(out).unwrap();
        writeln!(out, "{}", text.value).unwrap();
    }

    for wire in &schematic.wires {
        writeln!(out, "Wire {} {}", wire.category, wire.kind).unwrap();
        writeln!(
            out,
            "{}{} {} {} {}",
            INDENT, wire.x1, wire.y1, wire.x2, wire.y2
        )
        .unwrap();
    }

    for marker in &schematic.connections {
        writeln!(out, "Connection {} {} {}", marker.tag, marker.x, marker.y).unwrap();
    }

    for marker in &schematic.no_connects {
        writeln!(out, "NoConn {} {} {}", marker.tag, marker.x, marker.y).unwrap();
    }
}
