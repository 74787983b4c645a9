//! Column conversions shared by the repositories.
//!
//! Amounts and counts are `u64` in the domain and `BIGINT` in the database; percentages
//! and star ratings are `u32` in the domain and `INTEGER` in the database.

use std::{error::Error as StdError, str::FromStr};

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Row, postgres::PgRow};

use crate::uuids::TypedUuid;

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_percent(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let percent_i32: i32 = row.try_get(col)?;

    u32::try_from(percent_i32).map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    try_get_amount(row, col)
}

pub(crate) fn try_get_rating(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    try_get_percent(row, col)
}

pub(crate) fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let text: String = row.try_get(col)?;

    text.parse().map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_timestamp(row: &PgRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    Ok(row.try_get::<SqlxTimestamp, _>(col)?.to_jiff())
}

pub(crate) fn try_get_uuid<T>(row: &PgRow, col: &str) -> Result<TypedUuid<T>, sqlx::Error> {
    Ok(TypedUuid::from_uuid(row.try_get(col)?))
}

pub(crate) fn try_get_optional_uuid<T>(
    row: &PgRow,
    col: &str,
) -> Result<Option<TypedUuid<T>>, sqlx::Error> {
    Ok(row
        .try_get::<Option<uuid::Uuid>, _>(col)?
        .map(TypedUuid::from_uuid))
}

pub(crate) fn amount_param(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| encode_error(col, e))
}

pub(crate) fn percent_param(percent: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(percent).map_err(|e| encode_error(col, e))
}

pub(crate) fn rating_param(rating: u32, col: &str) -> Result<i32, sqlx::Error> {
    percent_param(rating, col)
}

fn decode_error<E>(col: &str, source: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}

fn encode_error<E>(col: &str, source: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::Encode(format!("{col}: {source}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_beyond_bigint_are_rejected() {
        assert!(amount_param(u64::MAX, "price").is_err());
        assert!(matches!(amount_param(105_00, "price"), Ok(10_500)));
    }

    #[test]
    fn percent_parameter_fits_integer() {
        assert!(matches!(percent_param(5, "tax_rate"), Ok(5)));
        assert!(percent_param(u32::MAX, "tax_rate").is_err());
    }
}
