//! Palette registry for series colors.
//!
//! Palettes load from palettes.json (embedded at compile time) and are
//! looked up by name. All palettes are categorical: a color identifies one
//! series within a panel, and colors repeat after exhausting the list.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use plotters::style::RGBColor;
use serde::Deserialize;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to load embedded palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Default palette name. The same colors the measurement harness's
/// notebooks assign to these series, so figures stay comparable.
pub const DEFAULT_PALETTE: &str = "tab10";

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Color for a series index, wrapping around past the end of the list.
    pub fn color(&self, index: usize) -> RGBColor {
        if self.colors.is_empty() {
            return GRAY_FALLBACK;
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx])
            .map(|[r, g, b]| RGBColor(r, g, b))
            .unwrap_or(GRAY_FALLBACK)
    }

    /// Number of colors in this palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

const GRAY_FALLBACK: RGBColor = RGBColor(128, 128, 128);

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    /// Palette names in file order (for listing)
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from a JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            registry.palettes.insert(def.name.to_lowercase(), def);
        }
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Get the default palette
    pub fn default_palette(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_PALETTE)
    }

    /// List all palette names
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Looks up a palette by name, falling back to the default for names the
/// registry does not know.
pub fn series_palette(name: &str) -> &'static PaletteDefinition {
    PALETTE_REGISTRY
        .get(name)
        .or_else(|| PALETTE_REGISTRY.default_palette())
        .expect("default palette missing from embedded palettes.json")
}

/// Parse a hex color string to an RGB array
///
/// Supports `#RRGGBB` and `#RRGGBBAA` (alpha ignored), with or without
/// the leading `#`.
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        eprintln!("WARN: invalid hex color '{}'", hex);
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}
