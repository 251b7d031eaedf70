//! Strict decoding of loosely-typed gazetteer rows.

use rusqlite::types::Value;

use crate::error::{ResolveError, Result};
use crate::models::LocationDescription;
use crate::store::{column, FeatureRow};

/// Decode a candidate row into a [`LocationDescription`].
///
/// Every required column must be present and hold the expected type.
/// Anything else is an [`ResolveError::InvalidRecord`]; no field is ever
/// defaulted.
pub fn decode_location(row: &FeatureRow) -> Result<LocationDescription> {
    Ok(LocationDescription {
        id: integer(row, column::ID, "id")?,
        name: text(row, column::NAME, "name")?,
        admin_name: text(row, column::ADMIN_NAME, "admin_name")?,
        country_code: text(row, column::COUNTRY_CODE, "country_code")?,
        country_name: text(row, column::COUNTRY_NAME, "country_name")?,
        latitude: coordinate(row, column::LATITUDE, "latitude")?,
        longitude: coordinate(row, column::LONGITUDE, "longitude")?,
    })
}

/// Identifier and stored coordinates of a row, if those cells are readable.
///
/// Used to rank candidates without decoding them in full, so a malformed
/// name on a farther row cannot mask a valid nearer one.
pub(crate) fn rank_fields(row: &FeatureRow) -> Option<(i64, f64, f64)> {
    Some((
        integer(row, column::ID, "id").ok()?,
        coordinate(row, column::LATITUDE, "latitude").ok()?,
        coordinate(row, column::LONGITUDE, "longitude").ok()?,
    ))
}

fn cell<'a>(row: &'a FeatureRow, index: usize, name: &'static str) -> Result<&'a Value> {
    match row.get(index) {
        None => Err(ResolveError::invalid_record(
            name,
            format!("is absent (row has {} columns)", row.len()),
        )),
        Some(Value::Null) => Err(ResolveError::invalid_record(name, "is NULL")),
        Some(value) => Ok(value),
    }
}

fn mismatch(name: &'static str, expected: &str, found: &Value) -> ResolveError {
    ResolveError::invalid_record(
        name,
        format!("expected {expected}, found {}", found.data_type()),
    )
}

fn integer(row: &FeatureRow, index: usize, name: &'static str) -> Result<i64> {
    match cell(row, index, name)? {
        Value::Integer(i) => Ok(*i),
        other => Err(mismatch(name, "integer", other)),
    }
}

fn text(row: &FeatureRow, index: usize, name: &'static str) -> Result<String> {
    match cell(row, index, name)? {
        Value::Text(s) => Ok(s.clone()),
        other => Err(mismatch(name, "text", other)),
    }
}

// Integer storage is accepted for coordinates: a column without REAL
// affinity keeps whole-degree values as integers.
fn coordinate(row: &FeatureRow, index: usize, name: &'static str) -> Result<f64> {
    let value = match cell(row, index, name)? {
        Value::Real(f) => *f,
        Value::Integer(i) => *i as f64,
        other => return Err(mismatch(name, "real", other)),
    };
    if !value.is_finite() {
        return Err(ResolveError::invalid_record(name, "is not finite"));
    }
    Ok(value)
}
