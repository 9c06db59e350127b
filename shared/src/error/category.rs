//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain an error code belongs to, derived from its numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx
    General,
    /// 1xxx
    Auth,
    /// 2xxx
    Permission,
    /// 4xxx
    Order,
    /// 6xxx
    Product,
    /// 7000-7199
    Table,
    /// 7200-7999
    Shift,
    /// 8xxx
    User,
    /// 9xxx and anything unmapped
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Order,
            6000..7000 => Self::Product,
            7000..7200 => Self::Table,
            7200..8000 => Self::Shift,
            8000..9000 => Self::User,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Order => "order",
            Self::Product => "product",
            Self::Table => "table",
            Self::Shift => "shift",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1004), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(6003), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(7003), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(7201), ErrorCategory::Shift);
        assert_eq!(ErrorCategory::from_code(8002), ErrorCategory::User);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
        // unassigned ranges fall through to system
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TableNumberExists.category(), ErrorCategory::Table);
        assert_eq!(ErrorCode::ShiftAlreadyClosed.category(), ErrorCategory::Shift);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Shift).unwrap();
        assert_eq!(json, "\"shift\"");
        assert_eq!(ErrorCategory::User.name(), "user");
    }
}
