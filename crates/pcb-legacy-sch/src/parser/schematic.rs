//! Parser for legacy `.sch` schematic files

use anyhow::Context;
use std::fs;
use std::path::Path;

use super::{positional, tokenize_line, Component, Token};
use crate::error::{Result, SchematicError};

/// Parsed legacy schematic
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schematic {
    /// File format version from the `EESchema` header
    pub version: String,
    /// Library names from the `LIBS:` lines
    pub libraries: Vec<String>,
    /// `EELAYER` directives, excluding the closing `EELAYER END`
    pub layers: Vec<Layer>,
    /// Page settings from the `$Descr` block
    pub sheet: Sheet,
    pub components: Vec<Component>,
    pub texts: Vec<Text>,
    pub wires: Vec<Wire>,
    pub connections: Vec<Marker>,
    pub no_connects: Vec<Marker>,
}

/// An `EELAYER` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer(pub String, pub String);

/// The `$Descr` block
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Paper size token (e.g., "A4", "USLetter")
    pub paper: String,
    pub width: String,
    pub height: String,
    pub properties: Vec<SheetProperty>,
}

/// One line inside `$Descr`, such as `Title "Power supply"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetProperty {
    pub name: String,
    /// Raw tokens, quotes included
    pub values: Vec<String>,
}

/// A text annotation: an opening line plus the text itself on the next line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Annotation kind (e.g., "Notes", "Label", "GLabel")
    pub kind: String,
    pub x: String,
    pub y: String,
    pub orientation: String,
    pub font_size: String,
    pub shape: String,
    /// Remaining tokens of the opening line
    pub trailing: Vec<String>,
    /// The following line, verbatim
    pub value: String,
}

/// A wire or bus segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    /// "Wire" or "Bus"
    pub category: String,
    /// "Line" for plain segments
    pub kind: String,
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
}

/// A `Connection` junction dot or a `NoConn` marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Token after the record name, `~` in files written by KiCad
    pub tag: String,
    pub x: String,
    pub y: String,
}

/// One top-level entry of the file
#[derive(Debug, Clone, PartialEq)]
enum Record {
    Header(String),
    Library(String),
    Layer(Layer),
    Sheet(Sheet),
    Component(Component),
    Text(Text),
    Wire(Wire),
    Connection(Marker),
    NoConnect(Marker),
}

impl Schematic {
    /// Parse a `.sch` file
    pub fn parse(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schematic file: {}", path.display()))?;

        Self::parse_str(&content)
            .with_context(|| format!("Failed to parse schematic file: {}", path.display()))
    }

    /// Parse schematic from string content
    pub fn parse_str(content: &str) -> Result<Self> {
        let mut schematic = Schematic::default();

        for record in RecordReader::new(content).read_all()? {
            match record {
                Record::Header(version) => schematic.version = version,
                Record::Library(name) => schematic.libraries.push(name),
                Record::Layer(layer) => schematic.layers.push(layer),
                Record::Sheet(sheet) => schematic.sheet = sheet,
                Record::Component(comp) => schematic.components.push(comp),
                Record::Text(text) => schematic.texts.push(text),
                Record::Wire(wire) => schematic.wires.push(wire),
                Record::Connection(marker) => schematic.connections.push(marker),
                Record::NoConnect(marker) => schematic.no_connects.push(marker),
            }
        }

        Ok(schematic)
    }

    /// Serialize back to `.sch` text
    pub fn to_sch(&self) -> Result<String> {
        crate::emit::write_schematic(self)
    }
}

/// Cursor over the non-blank lines of the input
struct RecordReader<'a> {
    /// (1-based line number, line text)
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> RecordReader<'a> {
    fn new(content: &'a str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        Self { lines, pos: 0 }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    fn read_all(mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        while let Some((line_no, line)) = self.next_line() {
            let tokens = tokenize_line(line_no, line)?;
            if let Some(record) = self.read_record(&tokens, line_no)? {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Build the record opened by `tokens`, consuming any lines that belong to it
    fn read_record(&mut self, tokens: &[Token<'a>], line_no: usize) -> Result<Option<Record>> {
        let Some(tag) = tokens.first().map(|t| t.raw()) else {
            return Ok(None);
        };

        let record = match tag {
            "EESchema" => {
                let version = tokens.get(4).ok_or_else(|| {
                    SchematicError::malformed(line_no, "header has no version")
                })?;
                Record::Header(version.raw().to_string())
            }
            "EELAYER" => {
                if tokens.get(1).map(|t| t.raw()) == Some("END") {
                    return Ok(None);
                }
                let [a, b] = positional::<2>(tokens, line_no, "EELAYER")?;
                Record::Layer(Layer(a.raw().to_string(), b.raw().to_string()))
            }
            "$Descr" => Record::Sheet(self.read_sheet(tokens, line_no)?),
            "$Comp" => Record::Component(self.read_component(line_no)?),
            "Text" => Record::Text(self.read_text(tokens, line_no)?),
            "Wire" => Record::Wire(self.read_wire(tokens, line_no)?),
            "Connection" => Record::Connection(read_marker(tokens, line_no)?),
            "NoConn" => Record::NoConnect(read_marker(tokens, line_no)?),
            _ if tag.starts_with("LIBS:") => {
                let name = tag.split_once(':').map(|(_, name)| name).unwrap_or_default();
                Record::Library(name.to_string())
            }
            _ => {
                log::debug!("line {line_no}: skipping unrecognized record `{tag}`");
                return Ok(None);
            }
        };

        Ok(Some(record))
    }

    fn read_sheet(&mut self, tokens: &[Token], opened_at: usize) -> Result<Sheet> {
        let [paper, width, height] = positional::<3>(tokens, opened_at, "$Descr")?;
        let mut sheet = Sheet {
            paper: paper.raw().to_string(),
            width: width.raw().to_string(),
            height: height.raw().to_string(),
            properties: Vec::new(),
        };

        loop {
            let (line_no, line) = self.next_line().ok_or(SchematicError::UnterminatedSection {
                line: opened_at,
                marker: "$Descr",
            })?;
            let tokens = tokenize_line(line_no, line)?;
            let Some((name, values)) = tokens.split_first() else {
                continue;
            };
            if name.raw() == "$EndDescr" {
                return Ok(sheet);
            }
            sheet.properties.push(SheetProperty {
                name: name.raw().to_string(),
                values: values.iter().map(|t| t.raw().to_string()).collect(),
            });
        }
    }

    fn read_component(&mut self, opened_at: usize) -> Result<Component> {
        let mut component = Component::default();

        loop {
            let (line_no, line) = self.next_line().ok_or(SchematicError::UnterminatedSection {
                line: opened_at,
                marker: "$Comp",
            })?;
            let tokens = tokenize_line(line_no, line)?;
            if tokens.first().map(|t| t.raw()) == Some("$EndComp") {
                return Ok(component);
            }
            component.read_line(&tokens, line_no)?;
        }
    }

    fn read_text(&mut self, tokens: &[Token], opened_at: usize) -> Result<Text> {
        let [kind, x, y, orientation, font_size, shape] =
            positional::<6>(tokens, opened_at, "Text")?;
        let (_, value) = self.next_line().ok_or(SchematicError::UnterminatedSection {
            line: opened_at,
            marker: "Text",
        })?;

        Ok(Text {
            kind: kind.raw().to_string(),
            x: x.raw().to_string(),
            y: y.raw().to_string(),
            orientation: orientation.raw().to_string(),
            font_size: font_size.raw().to_string(),
            shape: shape.raw().to_string(),
            trailing: tokens[7..].iter().map(|t| t.raw().to_string()).collect(),
            value: value.to_string(),
        })
    }

    fn read_wire(&mut self, tokens: &[Token], opened_at: usize) -> Result<Wire> {
        let [category, kind] = positional::<2>(tokens, opened_at, "Wire")?;
        let (line_no, line) = self.next_line().ok_or(SchematicError::UnterminatedSection {
            line: opened_at,
            marker: "Wire",
        })?;
        let points = tokenize_line(line_no, line)?;
        let [x1, y1, x2, y2] = points
            .get(..4)
            .and_then(|p| <[Token; 4]>::try_from(p).ok())
            .ok_or_else(|| {
                SchematicError::malformed(
                    line_no,
                    format!("wire needs 4 coordinates, found {}", points.len()),
                )
            })?;

        Ok(Wire {
            category: category.raw().to_string(),
            kind: kind.raw().to_string(),
            x1: x1.raw().to_string(),
            y1: y1.raw().to_string(),
            x2: x2.raw().to_string(),
            y2: y2.raw().to_string(),
        })
    }
}

fn read_marker(tokens: &[Token], line_no: usize) -> Result<Marker> {
    let [tag, x, y] = positional::<3>(tokens, line_no, "marker")?;
    Ok(Marker {
        tag: tag.raw().to_string(),
        x: x.raw().to_string(),
        y: y.raw().to_string(),
    })
}
