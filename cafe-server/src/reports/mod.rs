//! Sales reports over completed orders
//!
//! Dates are inclusive `YYYY-MM-DD` strings in the business timezone and
//! map to the window `[start 00:00, day after end 00:00)`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::report;
use crate::utils::{AppResult, money, time};
use shared::models::{AmountSummary, DailySales, ProductSales, SalesReport};

pub const DEFAULT_TOP_LIMIT: i64 = 10;
pub const MAX_TOP_LIMIT: i64 = 100;

/// Resolved report window
struct Window {
    start_date: NaiveDate,
    end_date: NaiveDate,
    start: i64,
    end: i64,
}

impl Window {
    fn parse(start: &str, end: &str, tz: Tz) -> AppResult<Self> {
        let (start_date, end_date, start, end) = time::date_range_millis(start, end, tz)?;
        Ok(Self {
            start_date,
            end_date,
            start,
            end,
        })
    }

    fn summary(&self, amount: f64) -> AmountSummary {
        AmountSummary {
            start_date: self.start_date.to_string(),
            end_date: self.end_date.to_string(),
            amount,
        }
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_TOP_LIMIT).clamp(1, MAX_TOP_LIMIT)
}

/// Per-day totals, ascending by date
fn group_by_day(orders: &[(i64, f64)], tz: Tz) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, (i64, Decimal)> = BTreeMap::new();
    for &(placed_at, total) in orders {
        let entry = days
            .entry(time::local_date(placed_at, tz))
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += money::to_decimal(total);
    }
    days.into_iter()
        .map(|(date, (count, amount))| DailySales {
            date: date.to_string(),
            total_orders: count,
            total_amount: money::to_f64(amount),
        })
        .collect()
}

/// Full report: totals, average, top 10 products and per-day breakdown
pub async fn sales_report(pool: &SqlitePool, tz: Tz, start: &str, end: &str) -> AppResult<SalesReport> {
    let window = Window::parse(start, end, tz)?;
    let orders = report::completed_orders(pool, window.start, window.end).await?;
    let top_products = report::top_products(pool, window.start, window.end, DEFAULT_TOP_LIMIT).await?;

    let total_orders = orders.len() as i64;
    let total_amount = money::sum_amounts(orders.iter().map(|(_, t)| *t));

    Ok(SalesReport {
        start_date: window.start_date.to_string(),
        end_date: window.end_date.to_string(),
        total_orders,
        total_amount,
        average_amount: money::average(total_amount, total_orders),
        top_products: round_product_amounts(top_products),
        sales_by_day: group_by_day(&orders, tz),
    })
}

fn round_product_amounts(rows: Vec<ProductSales>) -> Vec<ProductSales> {
    rows.into_iter()
        .map(|mut p| {
            p.total_amount = money::to_f64(money::to_decimal(p.total_amount));
            p
        })
        .collect()
}

/// Best sellers by quantity; `limit` defaults to 10 and is clamped to 1..=100
pub async fn top_products(
    pool: &SqlitePool,
    tz: Tz,
    start: &str,
    end: &str,
    limit: Option<i64>,
) -> AppResult<Vec<ProductSales>> {
    let window = Window::parse(start, end, tz)?;
    let rows = report::top_products(pool, window.start, window.end, clamp_limit(limit)).await?;
    Ok(round_product_amounts(rows))
}

pub async fn sales_by_day(pool: &SqlitePool, tz: Tz, start: &str, end: &str) -> AppResult<Vec<DailySales>> {
    let window = Window::parse(start, end, tz)?;
    let orders = report::completed_orders(pool, window.start, window.end).await?;
    Ok(group_by_day(&orders, tz))
}

pub async fn total_income(pool: &SqlitePool, tz: Tz, start: &str, end: &str) -> AppResult<AmountSummary> {
    let window = Window::parse(start, end, tz)?;
    let orders = report::completed_orders(pool, window.start, window.end).await?;
    Ok(window.summary(money::sum_amounts(orders.iter().map(|(_, t)| *t))))
}

/// Mean order total, 0 for an empty range
pub async fn average_sale(pool: &SqlitePool, tz: Tz, start: &str, end: &str) -> AppResult<AmountSummary> {
    let window = Window::parse(start, end, tz)?;
    let orders = report::completed_orders(pool, window.start, window.end).await?;
    let total = money::sum_amounts(orders.iter().map(|(_, t)| *t));
    Ok(window.summary(money::average(total, orders.len() as i64)))
}
