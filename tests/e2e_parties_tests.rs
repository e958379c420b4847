//! End-to-end tests for clients, partners and land owners.

mod common;

use common::{
    TestClient, TestServer, CLIENT_COMPANY, MONTHLY_RENT, PARTNER_INVESTMENT, PARTNER_NAME,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_client_summary() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let response = client
        .get(&format!("/v1/clients/{}/summary", server.ids.client), &[])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["client"]["company_name"], CLIENT_COMPANY);
    let summary = &body["summary"];
    assert_eq!(summary["active_rentals"], 1);
    assert_eq!(summary["total_rentals"], 1);
    assert_eq!(summary["total_monthly_rent"], MONTHLY_RENT);
    // Every payment counts towards the total, pending ones included.
    assert_eq!(summary["total_paid"], 95_000.0);
    assert_eq!(summary["last_payment_date"], "2024-02-05");
    assert_eq!(body["rentals"].as_array().unwrap().len(), 1);
    assert_eq!(body["payments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_client_search() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let rows: Vec<Value> = client
        .get("/v1/clients", &[("search", "TELECOM")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let rows: Vec<Value> = client
        .get("/v1/clients", &[("search", "unilever")])
        .await
        .json()
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_partner_summary() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let body: Value = client
        .get(&format!("/v1/partners/{}/summary", server.ids.partner), &[])
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["partner"]["name"], PARTNER_NAME);
    let summary = &body["summary"];
    assert_eq!(summary["total_investment"], PARTNER_INVESTMENT);
    assert_eq!(summary["investment_count"], 1);
    assert_eq!(summary["rented_billboard_count"], 1);
    assert_eq!(summary["yearly_rental_income"], 360_000.0);
    assert_eq!(summary["roi"]["display"], "100.0%");
    assert_eq!(summary["investments"][0]["monthly_income"], 30_000.0);
}

#[tokio::test]
async fn test_partner_without_investments_has_zero_roi() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    let created: Value = client
        .post("/v1/partners", json!({ "name": "Silent Partner" }))
        .await
        .json()
        .await
        .unwrap();
    let body: Value = client
        .get(
            &format!("/v1/partners/{}/summary", created["id"].as_str().unwrap()),
            &[],
        )
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["summary"]["roi"]["value"], 0.0);
    assert_eq!(body["summary"]["average_investment"], 0.0);
}

#[tokio::test]
async fn test_land_owner_summary_and_payments() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let body: Value = client
        .get(
            &format!("/v1/land-owners/{}/summary", server.ids.land_owner),
            &[],
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["summary"]["billboard_count"], 1);
    assert_eq!(body["summary"]["total_paid"], 0.0);
    assert_eq!(body["summary"]["pending_amount"], 120_000.0);
    assert!(body["summary"]["last_payment_date"].is_null());
    assert_eq!(body["billboards"].as_array().unwrap().len(), 1);

    let rows: Vec<Value> = client
        .get("/v1/land-owner-payments", &[("status", "pending")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status_badge"]["color"], "yellow");
    assert_eq!(rows[0]["billboard_identifier"], "BB-001");
}

#[tokio::test]
async fn test_land_owner_payment_marked_paid() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    let path = format!("/v1/land-owner-payments/{}", server.ids.land_owner_payment);
    let mut payment: Value = client.get(&path, &[]).await.json().await.unwrap();
    payment["status"] = json!("Paid");
    payment["payment_date"] = json!("2024-01-15");
    let response = client.put(&path, payment).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = client
        .get(
            &format!("/v1/land-owners/{}/summary", server.ids.land_owner),
            &[],
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["summary"]["total_paid"], 120_000.0);
    assert_eq!(body["summary"]["pending_amount"], 0.0);
    assert_eq!(body["summary"]["last_payment_date"], "2024-01-15");
}
