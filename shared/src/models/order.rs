//! Order Model (订单)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle state
///
/// No transition graph is enforced: any state may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[serde(alias = "PENDING", alias = "Pendiente")]
    Pending,
    #[serde(alias = "PREPARING", alias = "Preparando")]
    Preparing,
    #[serde(alias = "COMPLETED", alias = "Completado")]
    Completed,
    #[serde(alias = "CANCELLED", alias = "Cancelado")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Case-insensitive; accepts the English names and the Spanish
    /// labels used by the front desk client.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "preparing" | "preparando" => Ok(Self::Preparing),
            "completed" | "completado" => Ok(Self::Completed),
            "cancelled" | "canceled" | "cancelado" => Ok(Self::Cancelled),
            _ => Err(format!("unknown order state: {s}")),
        }
    }
}

/// Order header row, joined with the creator's name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Creator
    pub user_id: i64,
    pub user_name: Option<String>,
    /// Who performed the latest create / state change
    pub last_modified_by: Option<i64>,
    /// None for takeaway
    pub table_id: Option<i64>,
    pub placed_at: i64,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_method: String,
    #[serde(rename = "takeaway")]
    pub is_takeaway: bool,
    pub notes: Option<String>,
    pub completed_at: Option<i64>,
}

/// Order line with the unit price captured at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub table_id: Option<i64>,
    pub payment_method: String,
    #[serde(default)]
    pub takeaway: bool,
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<OrderLineInput>,
}

/// State change payload. Parsed with [`OrderStatus::from_str`] so that an
/// unknown value surfaces as a validation error rather than a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStateUpdate {
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_names() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("Preparando".parse::<OrderStatus>().unwrap(), OrderStatus::Preparing);
        assert_eq!("COMPLETED".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!("Cancelado".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("served".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_create_payload_from_client_json() {
        let json = r#"{
            "tableId": 5,
            "paymentMethod": "cash",
            "takeaway": false,
            "lines": [{"productId": 1, "quantity": 2}]
        }"#;
        let payload: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.table_id, Some(5));
        assert_eq!(payload.lines[0].quantity, 2);
        assert!(payload.notes.is_none());
    }

    #[test]
    fn test_detail_flattens_header() {
        let detail = OrderDetail {
            order: Order {
                id: 1,
                user_id: 2,
                user_name: Some("Ana".into()),
                last_modified_by: Some(2),
                table_id: None,
                placed_at: 0,
                total_amount: 12.0,
                status: OrderStatus::Pending,
                payment_method: "cash".into(),
                is_takeaway: true,
                notes: None,
                completed_at: None,
            },
            lines: vec![],
        };
        let v = serde_json::to_value(&detail).unwrap();
        assert_eq!(v["totalAmount"], 12.0);
        assert_eq!(v["takeaway"], true);
        assert_eq!(v["status"], "Pending");
        assert!(v["lines"].as_array().unwrap().is_empty());
    }
}
