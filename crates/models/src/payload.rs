//! Validator/Mapper: turns an untyped request body into a draft for a new
//! record, a sparse patch for an existing one, or a listing filter.
//!
//! Only presence is checked here. Values keep their raw text form; whether
//! `"abc"` is a price is the store's call (see [`crate::item::parse_price`]).

use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::ActiveValue::Set;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ModelError;
use crate::item::{self, parse_price, parse_timestamp};

pub const REQUIRED_FIELDS: [&str; 4] = ["nama_pelanggan", "jenis_sepatu", "layanan", "harga"];
pub const DEFAULT_STATUS: &str = "Dalam Proses";

/// `null`, `false`, `0` and `""` are falsy; everything else is truthy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Raw text of a value as a text column would store it.
fn as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The field's text if it was supplied with a truthy value.
fn truthy_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).filter(|v| is_truthy(v)).map(as_text)
}

/// Validated, defaulted record pending insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub nama_pelanggan: String,
    pub jenis_sepatu: String,
    pub warna: Option<String>,
    pub layanan: String,
    pub status: String,
    pub harga: String,
    pub tanggal_masuk: String,
    pub estimasi_selesai: Option<String>,
}

impl ItemDraft {
    /// Fails with every required field that is absent or falsy.
    pub fn from_payload(payload: &Value, now: DateTime<Utc>) -> Result<Self, ModelError> {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|k| truthy_field(payload, k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ModelError::MissingFields(missing));
        }

        let required = |k: &str| truthy_field(payload, k).unwrap_or_default();
        Ok(Self {
            nama_pelanggan: required("nama_pelanggan"),
            jenis_sepatu: required("jenis_sepatu"),
            warna: truthy_field(payload, "warna"),
            layanan: required("layanan"),
            status: truthy_field(payload, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            harga: required("harga"),
            tanggal_masuk: truthy_field(payload, "tanggal_masuk")
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            estimasi_selesai: truthy_field(payload, "estimasi_selesai"),
        })
    }

    /// Coerce into column types. The store supplies `id` and `created_at`.
    pub fn into_model(self, id: Uuid, created_at: DateTime<Utc>) -> Result<item::Model, ModelError> {
        Ok(item::Model {
            id,
            nama_pelanggan: self.nama_pelanggan,
            jenis_sepatu: self.jenis_sepatu,
            warna: self.warna,
            layanan: self.layanan,
            status: self.status,
            harga: parse_price(&self.harga)?,
            tanggal_masuk: parse_timestamp(&self.tanggal_masuk)?,
            estimasi_selesai: self.estimasi_selesai.as_deref().map(parse_timestamp).transpose()?,
            created_at: created_at.into(),
        })
    }

    /// Same as [`Self::into_model`] with every column marked for insertion.
    pub fn into_active_model(self, id: Uuid, created_at: DateTime<Utc>) -> Result<item::ActiveModel, ModelError> {
        let m = self.into_model(id, created_at)?;
        Ok(item::ActiveModel {
            id: Set(m.id),
            nama_pelanggan: Set(m.nama_pelanggan),
            jenis_sepatu: Set(m.jenis_sepatu),
            warna: Set(m.warna),
            layanan: Set(m.layanan),
            status: Set(m.status),
            harga: Set(m.harga),
            tanggal_masuk: Set(m.tanggal_masuk),
            estimasi_selesai: Set(m.estimasi_selesai),
            created_at: Set(m.created_at),
        })
    }
}

/// Sparse overwrite of an existing record. A field is present only when the
/// request supplied it with a truthy value, so a patch can never clear a
/// column or set it to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub nama_pelanggan: Option<String>,
    pub jenis_sepatu: Option<String>,
    pub warna: Option<String>,
    pub layanan: Option<String>,
    pub status: Option<String>,
    pub harga: Option<String>,
    pub estimasi_selesai: Option<String>,
}

impl ItemPatch {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            nama_pelanggan: truthy_field(payload, "nama_pelanggan"),
            jenis_sepatu: truthy_field(payload, "jenis_sepatu"),
            warna: truthy_field(payload, "warna"),
            layanan: truthy_field(payload, "layanan"),
            status: truthy_field(payload, "status"),
            harga: truthy_field(payload, "harga"),
            estimasi_selesai: truthy_field(payload, "estimasi_selesai"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Names of the columns this patch overwrites.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("nama_pelanggan", self.nama_pelanggan.is_some()),
            ("jenis_sepatu", self.jenis_sepatu.is_some()),
            ("warna", self.warna.is_some()),
            ("layanan", self.layanan.is_some()),
            ("status", self.status.is_some()),
            ("harga", self.harga.is_some()),
            ("estimasi_selesai", self.estimasi_selesai.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Mark the supplied columns as `Set` on `am`; others are left untouched.
    pub fn apply(self, am: &mut item::ActiveModel) -> Result<(), ModelError> {
        if let Some(v) = self.nama_pelanggan {
            am.nama_pelanggan = Set(v);
        }
        if let Some(v) = self.jenis_sepatu {
            am.jenis_sepatu = Set(v);
        }
        if let Some(v) = self.warna {
            am.warna = Set(Some(v));
        }
        if let Some(v) = self.layanan {
            am.layanan = Set(v);
        }
        if let Some(v) = self.status {
            am.status = Set(v);
        }
        if let Some(v) = self.harga {
            am.harga = Set(parse_price(&v)?);
        }
        if let Some(v) = self.estimasi_selesai {
            am.estimasi_selesai = Set(Some(parse_timestamp(&v)?));
        }
        Ok(())
    }

    /// In-place variant of [`Self::apply`] for stores that hold models
    /// directly. Nothing is written unless every supplied value coerces.
    pub fn apply_to_model(self, model: &mut item::Model) -> Result<(), ModelError> {
        let harga = self.harga.as_deref().map(parse_price).transpose()?;
        let estimasi_selesai = self.estimasi_selesai.as_deref().map(parse_timestamp).transpose()?;
        if let Some(v) = self.nama_pelanggan {
            model.nama_pelanggan = v;
        }
        if let Some(v) = self.jenis_sepatu {
            model.jenis_sepatu = v;
        }
        if let Some(v) = self.warna {
            model.warna = Some(v);
        }
        if let Some(v) = self.layanan {
            model.layanan = v;
        }
        if let Some(v) = self.status {
            model.status = v;
        }
        if let Some(v) = harga {
            model.harga = v;
        }
        if let Some(v) = estimasi_selesai {
            model.estimasi_selesai = Some(v);
        }
        Ok(())
    }
}

/// Listing filter; a single equality match on `status`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub status: Option<String>,
}

impl ListFilter {
    /// An empty status string means no filter.
    pub fn by_status(status: Option<String>) -> Self {
        Self { status: status.filter(|s| !s.is_empty()) }
    }

    pub fn matches(&self, record: &item::Model) -> bool {
        self.status.as_deref().map_or(true, |s| record.status == s)
    }
}
