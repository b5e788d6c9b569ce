//! Course color palette model and sanity checks.
//!
//! Departments are displayed downstream with assigned colors, loaded from a
//! JSON file mapping department -> `#RRGGBB`. Palette mistakes ship as UI
//! bugs (two departments sharing a color, a typo'd hex value, white overlay
//! text drowning on a pale background), so the palette gets its own checker:
//! the `relmap-colors` binary loads a palette, runs these checks, and prints
//! colored swatches with verdicts.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// One palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// WCAG relative luminance (linearized sRGB).
    pub fn relative_luminance(self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio between two colors, always >= 1.
    pub fn contrast_ratio(self, other: Self) -> f64 {
        let l1 = self.relative_luminance();
        let l2 = other.relative_luminance();
        let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// A problem found in the palette.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteIssue {
    /// Value does not parse as a hex color.
    Unparseable { department: String, value: String },
    /// Two departments share the exact same color.
    Duplicate {
        department: String,
        other: String,
        value: String,
    },
    /// White overlay text would not clear the contrast threshold.
    LowContrast { department: String, ratio: f64 },
}

impl fmt::Display for PaletteIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteIssue::Unparseable { department, value } => {
                write!(f, "{department}: unparseable color {value:?}")
            }
            PaletteIssue::Duplicate {
                department,
                other,
                value,
            } => write!(f, "{department}: duplicates {other} ({value})"),
            PaletteIssue::LowContrast { department, ratio } => {
                write!(
                    f,
                    "{department}: white text contrast {ratio:.2} below threshold"
                )
            }
        }
    }
}

/// Load a palette JSON file: an object mapping department -> hex color.
pub fn load_palette(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read palette {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Palette {} is not a string-to-string object", path.display()))
}

/// Run all palette checks. Returns the issues found, sorted by department.
pub fn check_palette(
    palette: &BTreeMap<String, String>,
    min_contrast: f64,
) -> Vec<PaletteIssue> {
    let mut issues = Vec::new();
    let mut seen: BTreeMap<Rgb, &str> = BTreeMap::new();

    for (department, value) in palette {
        let Some(color) = Rgb::parse_hex(value) else {
            issues.push(PaletteIssue::Unparseable {
                department: department.clone(),
                value: value.clone(),
            });
            continue;
        };

        if let Some(other) = seen.get(&color) {
            issues.push(PaletteIssue::Duplicate {
                department: department.clone(),
                other: (*other).to_string(),
                value: value.clone(),
            });
        } else {
            seen.insert(color, department.as_str());
        }

        let ratio = color.contrast_ratio(Rgb::WHITE);
        if ratio < min_contrast {
            issues.push(PaletteIssue::LowContrast {
                department: department.clone(),
                ratio,
            });
        }
    }

    issues
}

/// Render a colored swatch block for terminal display.
pub fn swatch(color: Rgb, label: &str) -> String {
    format!(
        "{} {}",
        "      ".on_truecolor(color.r, color.g, color.b),
        label.truecolor(color.r, color.g, color.b)
    )
}

// BTreeMap<Rgb, _> needs a total order on colors; lexicographic over the
// channels is as good as any.
impl PartialOrd for Rgb {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rgb {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.r, self.g, self.b).cmp(&(other.r, other.g, other.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            Rgb::parse_hex("#20A867"),
            Some(Rgb {
                r: 0x20,
                g: 0xA8,
                b: 0x67
            })
        );
        assert_eq!(Rgb::parse_hex("ff0000"), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#GGGGGG"), None);
        assert_eq!(Rgb::parse_hex(""), None);
    }

    #[test]
    fn test_luminance_extremes() {
        let black = Rgb { r: 0, g: 0, b: 0 };
        assert!(black.relative_luminance() < 1e-9);
        assert!((Rgb::WHITE.relative_luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_ratio() {
        let black = Rgb { r: 0, g: 0, b: 0 };
        // Black on white is the canonical 21:1
        assert!((black.contrast_ratio(Rgb::WHITE) - 21.0).abs() < 0.01);
        // Symmetric
        assert_eq!(
            black.contrast_ratio(Rgb::WHITE),
            Rgb::WHITE.contrast_ratio(black)
        );
        // Self-contrast is 1
        assert!((black.contrast_ratio(black) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_palette_finds_each_issue_kind() {
        let mut palette = BTreeMap::new();
        palette.insert("6".to_string(), "#004080".to_string());
        palette.insert("18".to_string(), "#004080".to_string());
        palette.insert("8".to_string(), "not-a-color".to_string());
        palette.insert("21M".to_string(), "#FFFFF0".to_string());

        let issues = check_palette(&palette, 3.0);

        assert!(issues.iter().any(|i| matches!(
            i,
            PaletteIssue::Duplicate { department, other, .. }
                if department == "6" && other == "18"
        )));
        assert!(issues
            .iter()
            .any(|i| matches!(i, PaletteIssue::Unparseable { department, .. } if department == "8")));
        assert!(issues
            .iter()
            .any(|i| matches!(i, PaletteIssue::LowContrast { department, .. } if department == "21M")));
    }

    #[test]
    fn test_clean_palette_passes() {
        let mut palette = BTreeMap::new();
        palette.insert("6".to_string(), "#004080".to_string());
        palette.insert("18".to_string(), "#802000".to_string());

        assert!(check_palette(&palette, 3.0).is_empty());
    }
}
