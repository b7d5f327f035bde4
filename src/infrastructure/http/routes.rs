//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                       GET     健康检查
//! - /api/customers                  GET     所有活跃客户
//! - /api/customers                  POST    新增客户（201 + Location）
//! - /api/customers/count            GET     活跃客户数量
//! - /api/customers/country/:country GET     按国家筛选（忽略大小写）
//! - /api/customers/:id              GET     按 ID 获取
//! - /api/customers/:id              PUT     整体覆盖
//! - /api/customers/:id              DELETE  软删除（204）

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/customers", customer_routes())
}

/// Customer 路由
fn customer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_customers).post(handlers::add_customer),
        )
        .route("/count", get(handlers::count_customers))
        .route(
            "/country/:country",
            get(handlers::list_customers_by_country),
        )
        .route(
            "/:id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::infrastructure::memory::InMemoryCustomerRepository;

    fn test_app() -> Router {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        create_routes().with_state(Arc::new(AppState::new(repo)))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn new_customer_body() -> Value {
        json!({
            "firstName": "Test",
            "lastName": "User",
            "email": "test.user@demo.com",
            "dateOfBirth": "1995-01-01",
            "city": "Demo City",
            "country": "Demo Country"
        })
    }

    #[tokio::test]
    async fn test_ping() {
        let response = test_app().oneshot(get_request("/api/ping")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_customers_returns_seed_data() {
        let response = test_app()
            .oneshot(get_request("/api/customers"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let customers = body.as_array().unwrap();
        assert_eq!(customers.len(), 10);
        assert_eq!(customers[0]["firstName"], "John");
        assert_eq!(customers[0]["dateOfBirth"], "1985-03-15");
    }

    #[tokio::test]
    async fn test_get_customer_by_id() {
        let response = test_app()
            .oneshot(get_request("/api/customers/3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["firstName"], "Carlos");
        assert_eq!(body["country"], "Spain");
    }

    #[tokio::test]
    async fn test_get_unknown_customer_is_404_with_id_in_message() {
        let response = test_app()
            .oneshot(get_request("/api/customers/999"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_count_returns_bare_number() {
        let response = test_app()
            .oneshot(get_request("/api/customers/count"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(10));
    }

    #[tokio::test]
    async fn test_country_filter_is_case_insensitive() {
        let app = test_app();

        let upper = app
            .clone()
            .oneshot(get_request("/api/customers/country/USA"))
            .await
            .unwrap();
        let lower = app
            .oneshot(get_request("/api/customers/country/usa"))
            .await
            .unwrap();

        let upper = body_json(upper).await;
        let lower = body_json(lower).await;
        assert_eq!(upper.as_array().unwrap().len(), 1);
        assert_eq!(upper, lower);
    }

    #[tokio::test]
    async fn test_add_customer_returns_created_with_location() {
        let response = test_app()
            .oneshot(json_request(
                Method::POST,
                "/api/customers",
                new_customer_body(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/api/customers/11"
        );
        let body = body_json(response).await;
        assert_eq!(body["id"], 11);
        assert_eq!(body["isActive"], true);
        assert_eq!(body["city"], "Demo City");
    }

    #[tokio::test]
    async fn test_add_customer_ignores_caller_supplied_id() {
        let mut payload = new_customer_body();
        payload["id"] = json!(500);
        payload["isActive"] = json!(false);

        let response = test_app()
            .oneshot(json_request(Method::POST, "/api/customers", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 11);
        assert_eq!(body["isActive"], true);
    }

    #[tokio::test]
    async fn test_add_customer_accepts_pascal_case_fields() {
        let response = test_app()
            .oneshot(json_request(
                Method::POST,
                "/api/customers",
                json!({
                    "FirstName": "Test",
                    "LastName": "User",
                    "Email": "test.user@demo.com",
                    "DateOfBirth": "1995-01-01",
                    "City": "Demo City",
                    "Country": "Demo Country"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_add_customer_rejects_bad_email() {
        let mut payload = new_customer_body();
        payload["email"] = json!("not-an-email");

        let response = test_app()
            .oneshot(json_request(Method::POST, "/api/customers", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_customer_without_body_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/customers")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_customer_round_trip() {
        let app = test_app();

        let mut payload = new_customer_body();
        payload["id"] = json!(3);
        payload["city"] = json!("Updated City");

        let response = app
            .clone()
            .oneshot(json_request(Method::PUT, "/api/customers/3", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/api/customers/3")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["city"], "Updated City");
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_bad_request() {
        let mut payload = new_customer_body();
        payload["id"] = json!(4);

        let response = test_app()
            .oneshot(json_request(Method::PUT, "/api/customers/3", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_customer_is_404() {
        let mut payload = new_customer_body();
        payload["id"] = json!(999);

        let response = test_app()
            .oneshot(json_request(Method::PUT, "/api/customers/999", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_customer_returns_no_content() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/customers/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // 删除后按 ID 查询为 404，计数减一
        let response = app
            .clone()
            .oneshot(get_request("/api/customers/5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get_request("/api/customers/count"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!(9));
    }
}
