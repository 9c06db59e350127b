//! User Model (员工账号)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum UserRole {
    #[serde(alias = "Administrador", alias = "Admin")]
    Admin,
    #[serde(alias = "Encargado", alias = "Manager")]
    Manager,
    #[serde(alias = "Cajero", alias = "Cashier")]
    Cashier,
    #[serde(alias = "Mozo", alias = "Waiter")]
    Waiter,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Cashier => "cashier",
            Self::Waiter => "waiter",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrador" => Ok(Self::Admin),
            "manager" | "encargado" => Ok(Self::Manager),
            "cashier" | "cajero" => Ok(Self::Cashier),
            "waiter" | "mozo" => Ok(Self::Waiter),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User row (includes password hash, never serialized)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_login_at: Option<i64>,
}

/// Public user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<i64>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            phone: user.phone,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
        }
    }
}

/// Register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_accepts_spanish_names() {
        assert_eq!("Cajero".parse::<UserRole>().unwrap(), UserRole::Cashier);
        assert_eq!("mozo".parse::<UserRole>().unwrap(), UserRole::Waiter);
        assert_eq!(" ADMIN ".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("chef".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(
            serde_json::to_string(&UserRole::Manager).unwrap(),
            "\"manager\""
        );
        let role: UserRole = serde_json::from_str("\"Encargado\"").unwrap();
        assert_eq!(role, UserRole::Manager);
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            email: "ana@cafe.test".into(),
            full_name: "Ana".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::Cashier,
            phone: None,
            is_active: true,
            created_at: 0,
            updated_at: 0,
            last_login_at: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"fullName\":\"Ana\""));
    }
}
