//! Permission Definitions
//!
//! Role based permissions for the cafeteria staff.
//!
//! ## 设计原则
//! - 登录即可: 查看菜单、餐桌、下单、查看订单
//! - 模块化权限: 订单队列、收银班次、报表、餐桌/菜单管理
//! - 删除和用户管理仅 admin 可用

/// 订单状态流转 (厨房队列)
pub const ORDERS_QUEUE: &str = "orders:queue";
/// 删除订单
pub const ORDERS_DELETE: &str = "orders:delete";
/// 开班/收班
pub const SHIFTS_MANAGE: &str = "shifts:manage";
/// 报表查看
pub const REPORTS_VIEW: &str = "reports:view";
/// 餐桌增改
pub const TABLES_MANAGE: &str = "tables:manage";
pub const TABLES_DELETE: &str = "tables:delete";
/// 商品增改
pub const MENU_MANAGE: &str = "menu:manage";
pub const MENU_DELETE: &str = "menu:delete";
/// 用户注册
pub const USERS_MANAGE: &str = "users:manage";

/// Admin 专属权限（不授予其他角色）
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &[
    USERS_MANAGE,
    ORDERS_DELETE,
    TABLES_DELETE,
    MENU_DELETE,
    "all",
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    ORDERS_QUEUE,
    SHIFTS_MANAGE,
    REPORTS_VIEW,
    TABLES_MANAGE,
    MENU_MANAGE,
];

pub const DEFAULT_CASHIER_PERMISSIONS: &[&str] = &[ORDERS_QUEUE, SHIFTS_MANAGE];

/// Get permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    let perms: &[&str] = match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS,
        "manager" => DEFAULT_MANAGER_PERMISSIONS,
        "cashier" => DEFAULT_CASHIER_PERMISSIONS,
        _ => &[],
    };
    perms.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults() {
        assert_eq!(get_default_permissions("admin"), vec!["all"]);
        assert!(get_default_permissions("cashier").contains(&SHIFTS_MANAGE.to_string()));
        assert!(!get_default_permissions("cashier").contains(&REPORTS_VIEW.to_string()));
        assert!(get_default_permissions("waiter").is_empty());
    }

    #[test]
    fn test_admin_only_not_granted_to_manager() {
        let manager = get_default_permissions("manager");
        for p in ADMIN_ONLY_PERMISSIONS {
            assert!(!manager.contains(&p.to_string()), "{p}");
        }
    }
}
