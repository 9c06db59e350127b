//! Dining Table Model (桌台)

use serde::{Deserialize, Serialize};

/// Table occupancy state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TableStatus {
    #[serde(alias = "AVAILABLE", alias = "Disponible")]
    Available,
    #[serde(alias = "OCCUPIED", alias = "Ocupada")]
    Occupied,
    #[serde(alias = "RESERVED", alias = "Reservada")]
    Reserved,
}

impl Default for TableStatus {
    fn default() -> Self {
        Self::Available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    /// Unique, human-facing table number
    pub number: i32,
    pub capacity: i32,
    pub status: TableStatus,
    /// Floor / area label
    pub location: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    pub number: i32,
    pub capacity: i32,
    pub location: Option<String>,
}

/// Administrative update. Setting `status` overrides occupancy directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    pub number: Option<i32>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_aliases() {
        let s: TableStatus = serde_json::from_str("\"Ocupada\"").unwrap();
        assert_eq!(s, TableStatus::Occupied);
        let s: TableStatus = serde_json::from_str("\"RESERVED\"").unwrap();
        assert_eq!(s, TableStatus::Reserved);
        assert_eq!(
            serde_json::to_string(&TableStatus::Available).unwrap(),
            "\"Available\""
        );
    }
}
