//! Clients, partners, land owners and the yearly payments made to land
//! owners.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::billboard_routes::item_routes;
use super::error::ApiResult;
use super::records::{create_record, list_records, load};
use super::session::ViewerSession;
use super::state::{GuardedBusinessStore, ServerState};
use crate::business_store::*;
use crate::filtering::{self, ListFilter};
use crate::finance::{
    client_summary, land_owner_summary, partner_summary, ClientSummary, LandOwnerSummary,
    PartnerSummary,
};
use crate::status_badges::{land_owner_payment_status_color, Badged};

#[derive(Serialize)]
struct ClientDetails {
    client: ClientRecord,
    summary: ClientSummary,
    rentals: Vec<RentalView>,
    payments: Vec<PaymentView>,
}

async fn client_details(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientDetails>> {
    let client = load::<Client, _>(store.as_ref(), &id)?;
    let snapshot = store.snapshot()?;

    let rentals: Vec<RentalView> = snapshot
        .rental_views()
        .into_iter()
        .filter(|r| r.rental.fields.client_id == id)
        .collect();
    let payments = snapshot
        .payment_views()
        .into_iter()
        .filter(|p| {
            rentals
                .iter()
                .any(|r| r.rental.id == p.payment.fields.rental_id)
        })
        .collect();

    Ok(Json(ClientDetails {
        summary: client_summary(&id, &snapshot.rentals, &snapshot.payments),
        client,
        rentals,
        payments,
    }))
}

#[derive(Serialize)]
struct PartnerDetails {
    partner: PartnerRecord,
    summary: PartnerSummary,
}

async fn partner_details(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<PartnerDetails>> {
    let partner = load::<Partner, _>(store.as_ref(), &id)?;
    let investments = RecordStore::<PartnerInvestment>::list_by(store.as_ref(), "partner_id", &id)?;
    let billboards = RecordStore::<Billboard>::list(store.as_ref())?;

    Ok(Json(PartnerDetails {
        summary: partner_summary(&id, &investments, &billboards),
        partner,
    }))
}

#[derive(Serialize)]
struct LandOwnerDetails {
    land_owner: LandOwnerRecord,
    summary: LandOwnerSummary,
    billboards: Vec<BillboardRecord>,
    payments: Vec<LandOwnerPaymentView>,
}

async fn land_owner_details(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<LandOwnerDetails>> {
    let land_owner = load::<LandOwner, _>(store.as_ref(), &id)?;
    let billboards = RecordStore::<Billboard>::list_by(store.as_ref(), "land_owner_id", &id)?;
    let snapshot = store.snapshot()?;
    let payments = snapshot
        .land_owner_payment_views()
        .into_iter()
        .filter(|p| p.payment.fields.land_owner_id == id)
        .collect();

    Ok(Json(LandOwnerDetails {
        summary: land_owner_summary(&id, &billboards, &snapshot.land_owner_payments),
        land_owner,
        billboards,
        payments,
    }))
}

async fn list_land_owner_payments(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<Vec<Badged<LandOwnerPaymentView>>>> {
    let views = store.snapshot()?.land_owner_payment_views();
    Ok(Json(
        filtering::apply(&views, &filter)
            .into_iter()
            .map(|p| {
                let status = p.payment.fields.status.clone();
                Badged::new(p, &status, land_owner_payment_status_color)
            })
            .collect(),
    ))
}

pub fn client_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_records::<Client>).post(create_record::<Client>))
        .route("/{id}/summary", get(client_details))
        .merge(item_routes::<Client>())
}

pub fn partner_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(list_records::<Partner>).post(create_record::<Partner>),
        )
        .route("/{id}/summary", get(partner_details))
        .merge(item_routes::<Partner>())
}

pub fn land_owner_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(list_records::<LandOwner>).post(create_record::<LandOwner>),
        )
        .route("/{id}/summary", get(land_owner_details))
        .merge(item_routes::<LandOwner>())
}

pub fn land_owner_payment_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(list_land_owner_payments).post(create_record::<LandOwnerPayment>),
        )
        .merge(item_routes::<LandOwnerPayment>())
}
