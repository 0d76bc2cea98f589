//! Color handling: hex parsing, EuroScope decimal conversion, and the
//! resolver that normalizes raw color attributes for the formatters.

use crate::models::rules::ColorDefs;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Matches a hex color code anywhere inside a raw color attribute.
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("#[0-9a-fA-F]{6}").expect("hex color pattern is valid"));

/// RGB color value with hex string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to the 24-bit decimal integer EuroScope expects.
    ///
    /// EuroScope packs colors as `blue * 65536 + green * 256 + red`, the
    /// reverse channel order of the usual RGB packing.
    #[must_use]
    pub const fn to_es_decimal(&self) -> u32 {
        self.b as u32 * 65536 + self.g as u32 * 256 + self.r as u32
    }

    /// Reconstructs a color from an EuroScope decimal value.
    ///
    /// Exact inverse of [`Self::to_es_decimal`] for every 24-bit value;
    /// higher bits are ignored.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_es_decimal(value: u32) -> Self {
        let value = value & 0x00FF_FFFF;
        Self {
            r: (value % 256) as u8,
            g: ((value / 256) % 256) as u8,
            b: (value / 65536) as u8,
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

/// A color in the normalized form the formatters accept: either a bare
/// decimal integer or a symbolic name rendered with a `COLOR_` prefix.
///
/// No raw hex string or two-letter alias ever reaches the formatters;
/// [`resolve_color`] normalizes those up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectorColor {
    /// 24-bit packed decimal value, rendered as bare digits.
    Decimal(u32),
    /// Symbolic color name, rendered as `COLOR_<name>`.
    Named(String),
}

impl SectorColor {
    /// Normalizes a raw color attribute.
    ///
    /// A hex code found anywhere in the string wins; an all-digit string is
    /// taken as an already-packed decimal; anything else is a symbolic name.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if let Some(hex) = HEX_COLOR.find(raw) {
            if let Ok(rgb) = RgbColor::from_hex(hex.as_str()) {
                return Self::Decimal(rgb.to_es_decimal());
            }
        }
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(value) = raw.parse::<u32>() {
                return Self::Decimal(value);
            }
        }
        Self::Named(raw.to_string())
    }

    /// The bare form without the `COLOR_` prefix, as compared against the
    /// declared palette names in the post-run consistency check.
    #[must_use]
    pub fn bare(&self) -> String {
        match self {
            Self::Decimal(value) => value.to_string(),
            Self::Named(name) => name.clone(),
        }
    }

    /// The form written into the run log's colors-used listing: decimal
    /// values are reconstructed to their hex code, names stay as-is.
    #[must_use]
    pub fn log_form(&self) -> String {
        match self {
            Self::Decimal(value) => RgbColor::from_es_decimal(*value).to_hex(),
            Self::Named(name) => name.clone(),
        }
    }
}

impl fmt::Display for SectorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(value) => f.pad(&value.to_string()),
            Self::Named(name) => f.pad(&format!("COLOR_{name}")),
        }
    }
}

/// Resolves a feature's color from its optional override and the rule
/// default.
///
/// Overrides are checked for a hex code first, then for a two-letter alias
/// from the rule table's `Additional Colors` section. An alias that is not
/// declared passes through silently as a named color; it surfaces only in
/// the post-run palette check, never in the skip log.
#[must_use]
pub fn resolve_color(override_raw: Option<&str>, default: &str, defs: &ColorDefs) -> SectorColor {
    let Some(raw) = override_raw else {
        return SectorColor::from_raw(default);
    };

    if let Some(hex) = HEX_COLOR.find(raw) {
        if let Ok(rgb) = RgbColor::from_hex(hex.as_str()) {
            return SectorColor::Decimal(rgb.to_es_decimal());
        }
    }

    if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_lowercase()) {
        return defs
            .alias(raw)
            .map_or_else(|| SectorColor::Named(raw.to_string()), SectorColor::from_raw);
    }

    SectorColor::from_raw(raw)
}
