// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text form of a geographic position, as typed into a coordinate field.

use alloc::format;
use alloc::string::{String, ToString};

use kurbo::Point;
use thiserror::Error;

/// Why a coordinate string was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CoordinateError {
    /// The text did not contain exactly one comma-separated pair.
    #[error("expected `lon, lat`, found {0} field(s)")]
    FieldCount(usize),
    /// One of the fields is not a number.
    #[error("`{0}` is not a number")]
    NotANumber(String),
    /// Longitude outside `[-180, 180]` or latitude outside `[-90, 90]`.
    #[error("({lon}, {lat}) is outside [-180, 180] x [-90, 90]")]
    OutOfRange {
        /// Parsed longitude.
        lon: f64,
        /// Parsed latitude.
        lat: f64,
    },
}

/// Parse `"lon, lat"` into a geographic point.
///
/// Whitespace around either number is ignored.
///
/// ```
/// use atlas_viewport::{CoordinateError, parse_coordinate};
/// use kurbo::Point;
///
/// assert_eq!(parse_coordinate("1.39, 43.63"), Ok(Point::new(1.39, 43.63)));
/// assert_eq!(parse_coordinate("1.39"), Err(CoordinateError::FieldCount(1)));
/// ```
pub fn parse_coordinate(text: &str) -> Result<Point, CoordinateError> {
    let fields = text.split(',').count();
    let mut it = text.split(',');
    let (Some(lon), Some(lat), None) = (it.next(), it.next(), it.next()) else {
        return Err(CoordinateError::FieldCount(fields));
    };
    let lon = parse_field(lon)?;
    let lat = parse_field(lat)?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateError::OutOfRange { lon, lat });
    }
    Ok(Point::new(lon, lat))
}

fn parse_field(field: &str) -> Result<f64, CoordinateError> {
    let field = field.trim();
    field
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotANumber(field.to_string()))
}

/// Render a geographic point the way a coordinate field displays it.
pub fn format_coordinate(geo: Point) -> String {
    format!("{:.4} , {:.4}", geo.x, geo.y)
}
