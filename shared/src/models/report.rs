//! Sales report models

use serde::{Deserialize, Serialize};

/// Aggregate sales over a date range (completed orders only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    /// YYYY-MM-DD, inclusive
    pub start_date: String,
    /// YYYY-MM-DD, inclusive
    pub end_date: String,
    pub total_orders: i64,
    pub total_amount: f64,
    /// 0 when there are no orders
    pub average_amount: f64,
    pub top_products: Vec<ProductSales>,
    pub sales_by_day: Vec<DailySales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: i64,
    pub product_name: String,
    pub quantity_sold: i64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// Business-timezone calendar date, YYYY-MM-DD
    pub date: String,
    pub total_orders: i64,
    pub total_amount: f64,
}

/// Single figure over a range (total income, average sale)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountSummary {
    pub start_date: String,
    pub end_date: String,
    pub amount: f64,
}
