//! Decimal-degree to EuroScope sexagesimal coordinate formatting.

use crate::models::geojson::Position;

/// Formats a position as the fixed-width EuroScope token pair
/// `NDDD.MM.SS.sss EDDD.MM.SS.sss` (latitude first, GeoJSON stores
/// longitude first).
///
/// The token is always 29 characters; downstream column alignment relies
/// on that.
#[must_use]
pub fn to_es_notation(position: Position) -> String {
    let [longitude, latitude] = position;
    format!(
        "{} {}",
        format_axis(latitude, 'N', 'S'),
        format_axis(longitude, 'E', 'W')
    )
}

/// Formats one axis: hemisphere letter, degrees zero-padded to three
/// digits, minutes to two, seconds with two integer and three fractional
/// digits.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_axis(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    let magnitude = value.abs();
    let degrees = magnitude.floor();
    let minutes = ((magnitude - degrees) * 60.0).floor();
    let seconds = (magnitude - degrees - minutes / 60.0) * 3600.0;
    format!(
        "{hemisphere}{:03}.{:02}.{:06.3}",
        degrees as u32, minutes as u32, seconds
    )
}
