//! End-to-end HTTP flows against an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use cafe_server::auth::password;
use cafe_server::db::DbService;
use cafe_server::db::repository::{product, user};
use cafe_server::{Config, ServerState, api::build_app};
use shared::models::{ProductCreate, UserCreate, UserRole};

const PASSWORD: &str = "secret123";

struct TestApp {
    app: Router,
    state: ServerState,
}

impl TestApp {
    async fn new() -> Self {
        let pool = DbService::in_memory().await.unwrap().pool;
        let state = ServerState::with_pool(Config::with_overrides("sqlite::memory:", 0), pool);
        Self {
            app: build_app(state.clone()),
            state,
        }
    }

    async fn seed_user(&self, email: &str, role: UserRole) -> i64 {
        let data = UserCreate {
            email: email.into(),
            full_name: email.split('@').next().unwrap_or(email).into(),
            password: PASSWORD.into(),
            role,
            phone: None,
        };
        let hash = password::hash_password(PASSWORD).unwrap();
        user::create(self.state.pool(), &data, &hash).await.unwrap().id
    }

    async fn seed_product(&self, name: &str, price: f64) -> i64 {
        let data = ProductCreate {
            name: name.into(),
            description: String::new(),
            price,
            stock: 50,
            category: "Bebidas".into(),
            is_available: None,
        };
        product::create(self.state.pool(), data).await.unwrap().id
    }

    async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let t = TestApp::new().await;
    let (status, body) = t.send("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let t = TestApp::new().await;
    let (status, body) = t.send("GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["code"].is_number());
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let t = TestApp::new().await;
    t.seed_user("admin@cafe.test", UserRole::Admin).await;

    let (status, _) = t
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "admin@cafe.test", "password": "wrong-pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_flow_frees_table() {
    let t = TestApp::new().await;
    t.seed_user("admin@cafe.test", UserRole::Admin).await;
    let token = t.login("admin@cafe.test").await;
    let coffee = t.seed_product("Café", 3.50).await;
    let toast = t.seed_product("Tostado", 5.00).await;

    let (status, table) = t
        .send("POST", "/api/tables", Some(&token), Some(json!({ "number": 5, "capacity": 4 })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let table_id = table["id"].as_i64().unwrap();

    let (status, detail) = t
        .send(
            "POST",
            "/api/orders",
            Some(&token),
            Some(json!({
                "tableId": table_id,
                "paymentMethod": "cash",
                "takeaway": false,
                "lines": [
                    { "productId": coffee, "quantity": 2 },
                    { "productId": toast, "quantity": 1 }
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{detail}");
    assert_eq!(detail["totalAmount"].as_f64(), Some(12.0));
    assert_eq!(detail["lines"].as_array().unwrap().len(), 2);
    let order_id = detail["id"].as_i64().unwrap();

    let (_, table) = t.send("GET", &format!("/api/tables/{table_id}"), Some(&token), None).await;
    assert_eq!(table["status"], "Occupied");

    let (status, _) = t.send("GET", "/api/orders/pending", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = t
        .send(
            "PUT",
            &format!("/api/orders/{order_id}/state"),
            Some(&token),
            Some(json!({ "state": "Completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["status"], "Completed");

    let (_, table) = t.send("GET", &format!("/api/tables/{table_id}"), Some(&token), None).await;
    assert_eq!(table["status"], "Available");
}

#[tokio::test]
async fn test_waiter_cannot_view_reports() {
    let t = TestApp::new().await;
    t.seed_user("mozo@cafe.test", UserRole::Waiter).await;
    let token = t.login("mozo@cafe.test").await;

    let (status, _) = t
        .send(
            "GET",
            "/api/reports/sales?start=2025-01-01&end=2025-01-31",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Staff routes stay open to waiters
    let (status, _) = t.send("GET", "/api/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_shift_open_and_close() {
    let t = TestApp::new().await;
    t.seed_user("caja@cafe.test", UserRole::Cashier).await;
    let token = t.login("caja@cafe.test").await;

    let (status, shift) = t
        .send("POST", "/api/shifts/open", Some(&token), Some(json!({ "initialAmount": 100.0 })))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{shift}");
    let shift_id = shift["id"].as_i64().unwrap();

    let (status, _) = t
        .send("POST", "/api/shifts/open", Some(&token), Some(json!({ "initialAmount": 50.0 })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, closed) = t
        .send(
            "POST",
            &format!("/api/shifts/{shift_id}/close"),
            Some(&token),
            Some(json!({ "countedAmount": 100.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{closed}");
    assert_eq!(closed["status"], "Closed");
    assert_eq!(closed["expectedAmount"].as_f64(), Some(100.0));
    assert_eq!(closed["variance"].as_f64(), Some(0.0));
}

async fn admin_session() -> (TestApp, String) {
    let t = TestApp::new().await;
    t.seed_user("admin@cafe.test", UserRole::Admin).await;
    let token = t.login("admin@cafe.test").await;
    (t, token)
}

async fn place_order(t: &TestApp, token: &str, table_id: Option<i64>, product_id: i64) -> i64 {
    let (status, detail) = t
        .send(
            "POST",
            "/api/orders",
            Some(token),
            Some(json!({
                "tableId": table_id,
                "paymentMethod": "cash",
                "takeaway": table_id.is_none(),
                "lines": [{ "productId": product_id, "quantity": 1 }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{detail}");
    detail["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_malformed_input_uses_error_envelope() {
    let (t, token) = admin_session().await;
    let coffee = t.seed_product("Café", 2.00).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/orders",
            Some(&token),
            Some(json!({
                "paymentMethod": "cash",
                "takeaway": true,
                "lines": [{ "productId": coffee }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert!(body["message"].as_str().unwrap().contains("quantity"));

    let (status, body) = t
        .send("GET", "/api/reports/sales?start=2025-01-01", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = t.send("GET", "/api/orders/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_duplicate_table_number_conflicts() {
    let (t, token) = admin_session().await;
    let body = json!({ "number": 3, "capacity": 2 });

    let (status, _) = t.send("POST", "/api/tables", Some(&token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, err) = t.send("POST", "/api/tables", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 7002);
}

#[tokio::test]
async fn test_table_with_unfinished_order_cannot_be_deleted() {
    let (t, token) = admin_session().await;
    let coffee = t.seed_product("Café", 2.00).await;
    let (_, table) = t
        .send("POST", "/api/tables", Some(&token), Some(json!({ "number": 7, "capacity": 4 })))
        .await;
    let table_id = table["id"].as_i64().unwrap();
    let order_id = place_order(&t, &token, Some(table_id), coffee).await;

    let uri = format!("/api/tables/{table_id}");
    let (status, err) = t.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 7003);

    t.send(
        "PUT",
        &format!("/api/orders/{order_id}/state"),
        Some(&token),
        Some(json!({ "state": "Completed" })),
    )
    .await;
    let (status, _) = t.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // the completed order survives with its table reference cleared
    let (status, order) = t
        .send("GET", &format!("/api/orders/{order_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(order["tableId"].is_null());
}

#[tokio::test]
async fn test_referenced_product_cannot_be_deleted() {
    let (t, token) = admin_session().await;
    let used = t.seed_product("Café", 2.00).await;
    let unused = t.seed_product("Té", 1.50).await;
    place_order(&t, &token, None, used).await;

    let (status, err) = t
        .send("DELETE", &format!("/api/products/{used}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 6003);

    let (status, _) = t
        .send("DELETE", &format!("/api/products/{unused}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, err) = t
        .send("DELETE", &format!("/api/products/{unused}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 6001);
}

#[tokio::test]
async fn test_waiter_cannot_delete_orders() {
    let t = TestApp::new().await;
    t.seed_user("mozo@cafe.test", UserRole::Waiter).await;
    let token = t.login("mozo@cafe.test").await;
    let coffee = t.seed_product("Café", 2.00).await;
    let order_id = place_order(&t, &token, None, coffee).await;

    let uri = format!("/api/orders/{order_id}");
    let (status, _) = t.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = t.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_then_me() {
    let (t, token) = admin_session().await;
    let payload = json!({
        "email": "Nueva@Cafe.test",
        "fullName": "Nueva Cajera",
        "password": "clave123",
        "role": "cashier"
    });

    let (status, created) = t
        .send("POST", "/api/auth/register", Some(&token), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["user"]["email"], "nueva@cafe.test");
    assert_eq!(created["user"]["role"], "cashier");

    let (status, err) = t
        .send("POST", "/api/auth/register", Some(&token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 8002);

    let (status, me) = t
        .send("GET", "/api/auth/me", created["token"].as_str(), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["fullName"], "Nueva Cajera");
    assert!(me.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_partial_updates_keep_absent_fields() {
    let (t, token) = admin_session().await;

    let (status, product) = t
        .send(
            "POST",
            "/api/products",
            Some(&token),
            Some(json!({ "name": "Medialuna", "price": 1.20, "stock": 30, "category": "Panadería" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    let product_id = product["id"].as_i64().unwrap();

    let (status, updated) = t
        .send(
            "PUT",
            &format!("/api/products/{product_id}"),
            Some(&token),
            Some(json!({ "price": 1.50 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["price"].as_f64(), Some(1.5));
    assert_eq!(updated["name"], "Medialuna");
    assert_eq!(updated["stock"], 30);
    assert_eq!(updated["category"], "Panadería");

    let (_, table) = t
        .send("POST", "/api/tables", Some(&token), Some(json!({ "number": 12, "capacity": 2 })))
        .await;
    let table_id = table["id"].as_i64().unwrap();
    let (status, updated) = t
        .send(
            "PUT",
            &format!("/api/tables/{table_id}"),
            Some(&token),
            Some(json!({ "capacity": 6 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["capacity"], 6);
    assert_eq!(updated["number"], 12);
    assert_eq!(updated["status"], "Available");
}
