//! The `sepatu` table: one row per shoe-cleaning service order.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sepatu")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nama_pelanggan: String,
    pub jenis_sepatu: String,
    pub warna: Option<String>,
    pub layanan: String,
    pub status: String,
    pub harga: Decimal,
    pub tanggal_masuk: DateTimeWithTimeZone,
    pub estimasi_selesai: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Parse an opaque identifier into the primary-key type.
pub fn parse_id(raw: &str) -> Result<Uuid, ModelError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ModelError::InvalidColumn(format!("invalid input syntax for type uuid: \"{raw}\"")))
}

/// Exact numeric text, plain (`12.5`) or scientific (`1.2e4`).
pub fn parse_price(raw: &str) -> Result<Decimal, ModelError> {
    let s = raw.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ModelError::InvalidColumn(format!("invalid input syntax for type numeric: \"{raw}\"")))
}

/// Accepts RFC 3339, or a naive date/date-time which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTimeWithTimeZone, ModelError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive).into());
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(Utc.from_utc_datetime(&naive).into());
    }
    Err(ModelError::InvalidColumn(format!(
        "invalid input syntax for type timestamp with time zone: \"{raw}\""
    )))
}
