//! Fixtures for engine tests: in-memory database and seed rows

use shared::models::{DiningTable, DiningTableCreate, Product, ProductCreate, User, UserCreate, UserRole};
use sqlx::SqlitePool;

use super::DbService;
use super::repository::{dining_table, product, user};

pub async fn test_pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

pub async fn seed_user(pool: &SqlitePool, email: &str, role: UserRole) -> User {
    let data = UserCreate {
        email: email.to_string(),
        full_name: email.split('@').next().unwrap_or(email).to_string(),
        password: "secret123".to_string(),
        role,
        phone: None,
    };
    // Tests never log in through this fixture; skip the argon2 cost
    user::create(pool, &data, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA")
        .await
        .unwrap()
}

pub async fn seed_product(pool: &SqlitePool, name: &str, price: f64) -> Product {
    product::create(
        pool,
        ProductCreate {
            name: name.to_string(),
            description: String::new(),
            price,
            stock: 10,
            category: "Cafetería".to_string(),
            is_available: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_table(pool: &SqlitePool, number: i32, capacity: i32) -> DiningTable {
    dining_table::create(
        pool,
        DiningTableCreate {
            number,
            capacity,
            location: None,
        },
    )
    .await
    .unwrap()
}
