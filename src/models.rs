// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A single logged spending event, in the shape it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        serialize_with = "amount_as_number"
    )]
    pub amount: Decimal,
    pub category: String,
    #[serde(
        default,
        deserialize_with = "lenient_note",
        serialize_with = "note_as_string"
    )]
    pub note: Option<String>,
    pub date: Timestamp,
}

impl Expense {
    /// Amount as plain text, without trailing zeros (`12.5`, `100`).
    pub fn amount_text(&self) -> String {
        self.amount.normalize().to_string()
    }
}

/// Stored creation time. The raw text is kept verbatim so that re-saving
/// or exporting a record never rewrites it, even when it does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    local: Option<NaiveDateTime>,
}

impl Timestamp {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let local = parse_local_timestamp(&raw);
        Timestamp { raw, local }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Wall-clock time in the local zone, or `None` for unparseable input.
    pub fn local(&self) -> Option<NaiveDateTime> {
        self.local
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.local.map(|dt| dt.date())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(Timestamp::parse(s)),
            // epoch milliseconds
            Value::Number(n) => {
                let local = n
                    .as_i64()
                    .and_then(DateTime::from_timestamp_millis)
                    .map(|dt| dt.with_timezone(&Local).naive_local());
                Ok(Timestamp {
                    raw: n.to_string(),
                    local,
                })
            }
            other => Err(serde::de::Error::custom(format!(
                "expected a date string, found {}",
                other
            ))),
        }
    }
}

/// Parses the date formats expenses are stored with into local wall-clock
/// time: RFC 3339 with an offset, a naive ISO date-time, or a bare date
/// (local midnight).
pub fn parse_local_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Strict amount parsing used at creation time. Returns `None` for anything
/// that is not a finite decimal.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    Decimal::from_str(t)
        .ok()
        .or_else(|| Decimal::from_scientific(t).ok())
}

/// Coerces a loosely-typed stored amount to a decimal.
pub fn coerce_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => parse_amount(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        },
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(coerce_amount(&value).unwrap_or_else(|| {
        warn!(amount = %value, "non-numeric amount treated as zero");
        Decimal::ZERO
    }))
}

fn amount_as_number<S: Serializer>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    if amount.fract().is_zero() {
        if let Some(i) = amount.to_i64() {
            return s.serialize_i64(i);
        }
    }
    s.serialize_f64(amount.to_f64().unwrap_or(0.0))
}

fn lenient_note<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn note_as_string<S: Serializer>(note: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(note.as_deref().unwrap_or(""))
}

/// Category selector for listings. `"All"` is the match-everything sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first.
    #[default]
    Latest,
    /// Largest amount first.
    Highest,
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(SortMode::Latest),
            "highest" => Ok(SortMode::Highest),
            other => Err(Error::Validation(format!(
                "unknown sort mode '{}' (use latest|highest)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(Error::Validation(format!(
                "unknown period '{}' (use daily|weekly|monthly)",
                other
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        };
        f.write_str(s)
    }
}
