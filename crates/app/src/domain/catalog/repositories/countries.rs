//! Countries Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{data::NewCountry, records::CountryRecord},
    columns::{percent_param, try_get_percent, try_get_uuid},
};

const CREATE_COUNTRY_SQL: &str = include_str!("../sql/create_country.sql");
const FIND_COUNTRY_SQL: &str = include_str!("../sql/find_country.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCountriesRepository;

impl PgCountriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_country(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        country: NewCountry,
    ) -> Result<CountryRecord, sqlx::Error> {
        query_as::<Postgres, CountryRecord>(CREATE_COUNTRY_SQL)
            .bind(country.uuid.into_uuid())
            .bind(country.name)
            .bind(percent_param(country.tax_rate, "tax_rate")?)
            .bind(country.active)
            .fetch_one(&mut **tx)
            .await
    }

    /// Finds an active country by exact name.
    pub(crate) async fn find_country(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<CountryRecord>, sqlx::Error> {
        query_as::<Postgres, CountryRecord>(FIND_COUNTRY_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CountryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            name: row.try_get("name")?,
            tax_rate: try_get_percent(row, "tax_rate")?,
            active: row.try_get("active")?,
        })
    }
}
