//! The normalized transaction record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One normalized transaction.
///
/// Fixed-shape rather than a dynamic map: one optional field per canonical
/// column, absent when the input file does not carry that column. Serde field
/// order follows canonical column order, so serialized objects list fields
/// consistently. Dates serialize as `YYYY-MM-DD` and amounts as decimal
/// strings preserving sign and fractional digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
