//! End-to-end tests for billboards and the records hanging off them.

mod common;

use common::{
    TestClient, TestServer, CLIENT_COMPANY, FREE_BILLBOARD_IDENTIFIER, LAND_OWNER_NAME,
    RENTED_BILLBOARD_IDENTIFIER,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn identifiers(rows: &[Value]) -> Vec<&str> {
    let mut ids: Vec<&str> = rows
        .iter()
        .map(|r| r["billboard_identifier"].as_str().unwrap())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_list_billboards_with_badges() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let rows: Vec<Value> = client.list_billboards(&[]).await.json().await.unwrap();
    assert_eq!(
        identifiers(&rows),
        vec![RENTED_BILLBOARD_IDENTIFIER, FREE_BILLBOARD_IDENTIFIER]
    );

    let rented = rows
        .iter()
        .find(|r| r["billboard_identifier"] == RENTED_BILLBOARD_IDENTIFIER)
        .unwrap();
    assert_eq!(rented["status"], "Rented");
    assert_eq!(rented["type"], "Unipole");
    assert_eq!(rented["status_badge"]["label"], "Rented");
    assert_eq!(rented["status_badge"]["color"], "green");
}

#[tokio::test]
async fn test_billboard_search_and_status_filter() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let rows: Vec<Value> = client
        .list_billboards(&[("search", "gulSHAN")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(identifiers(&rows), vec![RENTED_BILLBOARD_IDENTIFIER]);

    let rows: Vec<Value> = client
        .list_billboards(&[("status", "available")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(identifiers(&rows), vec![FREE_BILLBOARD_IDENTIFIER]);

    let rows: Vec<Value> = client
        .list_billboards(&[("status", "all"), ("search", "bb-00")])
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    // Leading whitespace is not trimmed.
    let rows: Vec<Value> = client
        .list_billboards(&[("search", " Gulshan")])
        .await
        .json()
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_billboard_details() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let response = client
        .get_billboard_details(&server.ids.rented_billboard)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let details: Value = response.json().await.unwrap();

    assert_eq!(details["land_owner"]["name"], LAND_OWNER_NAME);
    assert_eq!(details["installation_costs"].as_array().unwrap().len(), 2);
    assert_eq!(details["investments"].as_array().unwrap().len(), 1);
    assert_eq!(details["rentals"][0]["client_company"], CLIENT_COMPANY);
    assert_eq!(details["rentals"][0]["status_badge"]["color"], "green");

    let summary = &details["profit_summary"];
    assert_eq!(summary["total_installation_cost"], 300_000.0);
    assert_eq!(summary["total_yearly_rental"], 600_000.0);
    assert_eq!(summary["total_profit"], 300_000.0);
    assert_eq!(summary["profitable"], true);
    assert_eq!(details["profit_badge"]["label"], "Profit");
}

#[tokio::test]
async fn test_missing_billboard_is_not_found() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_viewer(server.base_url.clone()).await;

    let response = client.get_billboard_details("does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn test_installation_cost_takes_billboard_from_path() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    let response = client
        .add_installation_cost(
            &server.ids.free_billboard,
            json!({
                "cost_type": "PVC Cost",
                "amount": 15_000.0,
                "payment_date": "2024-03-01",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cost: Value = response.json().await.unwrap();
    assert_eq!(cost["billboard_id"], server.ids.free_billboard.as_str());

    let costs: Vec<Value> = client
        .get(
            &format!("/v1/billboards/{}/installation-costs", server.ids.free_billboard),
            &[],
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(costs.len(), 1);

    let response = client
        .delete(&format!(
            "/v1/installation-costs/{}",
            cost["id"].as_str().unwrap()
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_investment_percentages_are_not_capped() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    // The seeded stake is 60%; another 70% is accepted as is.
    let response = client
        .add_investment(
            &server.ids.rented_billboard,
            json!({
                "partner_id": server.ids.partner,
                "investment_amount": 50_000.0,
                "investment_percentage": 70.0,
                "investment_date": "2024-01-10",
                "purpose": "Lighting",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let details: Value = client
        .get_billboard_details(&server.ids.rented_billboard)
        .await
        .json()
        .await
        .unwrap();
    let total: f64 = details["investments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["investment_percentage"].as_f64().unwrap())
        .sum();
    assert_eq!(total, 130.0);
}

#[tokio::test]
async fn test_child_of_unknown_billboard_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    let response = client
        .add_installation_cost(
            "missing",
            json!({
                "cost_type": "VAT",
                "amount": 1.0,
                "payment_date": "2024-03-01",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_billboard_removes_its_rentals() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    let response = client
        .delete(&format!("/v1/billboards/{}", server.ids.rented_billboard))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.get_rental_details(&server.ids.rental).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let rentals: Vec<Value> = client.get("/v1/rentals", &[]).await.json().await.unwrap();
    assert!(rentals.is_empty());
}

#[tokio::test]
async fn test_create_billboard_with_defaults() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated_manager(server.base_url.clone()).await;

    let response = client
        .create_billboard(json!({
            "location": "Banani 11",
            "size": "40x20",
            "type": "Rooftop",
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let billboard: Value = response.json().await.unwrap();
    assert_eq!(billboard["status"], "Available");
    assert_eq!(billboard["image_urls"], json!([]));
    assert!(billboard["id"].as_str().is_some());

    let response = client
        .create_billboard(json!({ "location": "No size" }))
        .await;
    assert!(response.status().is_client_error());
}
