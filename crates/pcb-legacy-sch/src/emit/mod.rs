//! Writer for the legacy KiCad schematic text format

mod writer;

pub use writer::{write_schematic, write_schematic_with};
