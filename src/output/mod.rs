//! Output emission and the course color palette.
//!
//! Writers for the two artifacts a run produces (`related.txt`,
//! `condensed.txt`) plus the palette model behind the standalone
//! `relmap-colors` checker binary.

mod colors;
mod writer;

pub use colors::{check_palette, load_palette, swatch, PaletteIssue, Rgb};
pub use writer::{write_condensed, write_related};
