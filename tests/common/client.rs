//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per endpoint. When API routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new unauthenticated client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn authenticated_as(base_url: String, handle: &str, password: &str) -> Self {
        let client = Self::new(base_url);

        let response = client.login(handle, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Authentication of {} failed: {:?}",
            handle,
            response.text().await
        );

        client
    }

    pub async fn authenticated_viewer(base_url: String) -> Self {
        Self::authenticated_as(base_url, VIEWER_USER, VIEWER_PASS).await
    }

    pub async fn authenticated_manager(base_url: String) -> Self {
        Self::authenticated_as(base_url, MANAGER_USER, MANAGER_PASS).await
    }

    pub async fn authenticated_admin(base_url: String) -> Self {
        Self::authenticated_as(base_url, ADMIN_USER, ADMIN_PASS).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET on any path, with optional query pairs.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post(&self, path: &str, body: Value) -> Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn put(&self, path: &str, body: Value) -> Response {
        self.client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /v1/auth/login
    pub async fn login(&self, handle: &str, password: &str) -> Response {
        self.post(
            "/v1/auth/login",
            json!({
                "user_handle": handle,
                "password": password,
            }),
        )
        .await
    }

    /// GET /v1/auth/logout
    pub async fn logout(&self) -> Response {
        self.get("/v1/auth/logout", &[]).await
    }

    /// GET /v1/auth/session
    pub async fn session(&self) -> Response {
        self.get("/v1/auth/session", &[]).await
    }

    // ========================================================================
    // Billboards
    // ========================================================================

    pub async fn list_billboards(&self, query: &[(&str, &str)]) -> Response {
        self.get("/v1/billboards", query).await
    }

    pub async fn get_billboard_details(&self, id: &str) -> Response {
        self.get(&format!("/v1/billboards/{}/details", id), &[]).await
    }

    pub async fn create_billboard(&self, body: Value) -> Response {
        self.post("/v1/billboards", body).await
    }

    pub async fn add_installation_cost(&self, billboard_id: &str, body: Value) -> Response {
        self.post(
            &format!("/v1/billboards/{}/installation-costs", billboard_id),
            body,
        )
        .await
    }

    pub async fn add_investment(&self, billboard_id: &str, body: Value) -> Response {
        self.post(&format!("/v1/billboards/{}/investments", billboard_id), body)
            .await
    }

    pub async fn generate_invoice(&self, billboard_id: &str, body: Value) -> Response {
        self.post(&format!("/v1/billboards/{}/invoice", billboard_id), body)
            .await
    }

    // ========================================================================
    // Rentals, payments and invoices
    // ========================================================================

    pub async fn get_rental_details(&self, id: &str) -> Response {
        self.get(&format!("/v1/rentals/{}/details", id), &[]).await
    }

    pub async fn list_payments(&self, query: &[(&str, &str)]) -> Response {
        self.get("/v1/payments", query).await
    }

    pub async fn get_receipt(&self, payment_id: &str) -> Response {
        self.get(&format!("/v1/payments/{}/receipt", payment_id), &[])
            .await
    }

    pub async fn invoice_board(&self, query: &[(&str, &str)]) -> Response {
        self.get("/v1/invoices", query).await
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// GET /v1/reports/{name}
    pub async fn report(&self, name: &str) -> Response {
        self.get(&format!("/v1/reports/{}", name), &[]).await
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub async fn admin_list_users(&self) -> Response {
        self.get("/v1/admin/users", &[]).await
    }

    pub async fn admin_create_user(&self, handle: &str, password: &str, role: &str) -> Response {
        self.post(
            "/v1/admin/users",
            json!({
                "handle": handle,
                "password": password,
                "role": role,
            }),
        )
        .await
    }

    pub async fn admin_set_role(&self, handle: &str, role: &str) -> Response {
        self.put(
            &format!("/v1/admin/users/{}/role", handle),
            json!({ "role": role }),
        )
        .await
    }

    pub async fn admin_delete_login(&self, handle: &str) -> Response {
        self.delete(&format!("/v1/admin/users/{}/login", handle))
            .await
    }
}
