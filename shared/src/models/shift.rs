//! Cash Shift Model (班次管理)

use serde::{Deserialize, Serialize};

/// Shift state; same wire casing as order and table states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ShiftStatus {
    #[serde(alias = "OPEN", alias = "Abierto")]
    Open,
    #[serde(alias = "CLOSED", alias = "Cerrado")]
    Closed,
}

/// Cash register shift joined with cashier info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CashShift {
    pub id: i64,
    pub cashier_id: i64,
    pub cashier_name: Option<String>,
    pub cashier_email: Option<String>,
    pub status: ShiftStatus,
    pub opened_at: i64,
    pub closed_at: Option<i64>,
    /// Float in the drawer at open
    pub initial_amount: f64,
    /// initial + completed revenue of the shift day
    pub expected_amount: f64,
    /// expected - initial
    pub sales_amount: f64,
    /// Cash counted at close
    pub counted_amount: Option<f64>,
    /// counted - expected (negative = shortfall)
    pub variance: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftOpen {
    #[serde(default)]
    pub initial_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftClose {
    pub counted_amount: f64,
    pub notes: Option<String>,
}
