//! Billboard routes and the records hanging off a billboard: installation
//! costs, partner investments, documents, rentals and invoices.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::error::ApiResult;
use super::records::{create_record, delete_record, get_record, load, update_record, with_parent};
use super::session::{ManagerSession, ViewerSession};
use super::state::{GuardedBusinessStore, ServerState};
use super::ServerConfig;
use crate::business_store::*;
use crate::documents::{generate_invoice, GeneratedInvoice, InvoiceRequest};
use crate::filtering::{self, ListFilter};
use crate::finance::{
    billboard_installation_details, billboard_profit_summary, BillboardInstallationDetails,
    BillboardProfitSummary,
};
use crate::status_badges::{
    billboard_status_color, profit_color, rental_status_color, Badge, Badged,
};

#[derive(Serialize)]
struct BillboardDetails {
    billboard: BillboardRecord,
    status_badge: Badge,
    land_owner: Option<LandOwnerRecord>,
    installation_costs: Vec<InstallationCostRecord>,
    investments: Vec<PartnerInvestmentRecord>,
    documents: Vec<BillboardDocumentRecord>,
    rentals: Vec<Badged<RentalView>>,
    profit_summary: BillboardProfitSummary,
    profit_badge: Badge,
    installation_details: BillboardInstallationDetails,
}

async fn list_billboards(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<Vec<Badged<BillboardRecord>>>> {
    let billboards = RecordStore::<Billboard>::list(store.as_ref())?;
    Ok(Json(
        filtering::apply(&billboards, &filter)
            .into_iter()
            .map(|b| {
                let status = b.fields.status.clone();
                Badged::new(b, &status, billboard_status_color)
            })
            .collect(),
    ))
}

fn rentals_of_billboard(snapshot: &BusinessSnapshot, billboard_id: &str) -> Vec<RentalView> {
    snapshot
        .rental_views()
        .into_iter()
        .filter(|r| r.rental.fields.billboard_id == billboard_id)
        .collect()
}

async fn billboard_details(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<BillboardDetails>> {
    let store = store.as_ref();
    let billboard = load::<Billboard, _>(store, &id)?;
    let land_owner = match billboard.fields.land_owner_id.as_deref() {
        Some(owner_id) => RecordStore::<LandOwner>::get(store, owner_id)?,
        None => None,
    };
    let installation_costs = RecordStore::<InstallationCost>::list_by(store, "billboard_id", &id)?;
    let investments = RecordStore::<PartnerInvestment>::list_by(store, "billboard_id", &id)?;
    let documents = RecordStore::<BillboardDocument>::list_by(store, "billboard_id", &id)?;
    let snapshot = store.snapshot()?;

    let profit_summary = billboard_profit_summary(&billboard, &installation_costs, &investments);
    let installation_details = billboard_installation_details(
        &billboard,
        &installation_costs,
        &investments,
        &snapshot.partners,
    );
    let profit_label = if profit_summary.profitable {
        "Profit"
    } else {
        "Loss"
    };

    Ok(Json(BillboardDetails {
        status_badge: Badge::new(
            &billboard.fields.status,
            billboard_status_color(&billboard.fields.status),
        ),
        profit_badge: Badge::new(profit_label, profit_color(profit_summary.total_profit)),
        rentals: rentals_of_billboard(&snapshot, &id)
            .into_iter()
            .map(|r| {
                let status = r.rental.fields.status.clone();
                Badged::new(r, &status, rental_status_color)
            })
            .collect(),
        billboard,
        land_owner,
        installation_costs,
        investments,
        documents,
        profit_summary,
        installation_details,
    }))
}

async fn list_billboard_children<E: Entity>(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Record<E>>>>
where
    dyn BusinessStore: RecordStore<E>,
{
    load::<Billboard, _>(store.as_ref(), &id)?;
    Ok(Json(RecordStore::<E>::list_by(
        store.as_ref(),
        "billboard_id",
        &id,
    )?))
}

async fn create_billboard_child<E: Entity>(
    _session: ManagerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Record<E>>)>
where
    dyn BusinessStore: RecordStore<E>,
{
    load::<Billboard, _>(store.as_ref(), &id)?;
    let fields = with_parent::<E>(body, "billboard_id", &id)?;
    let record = RecordStore::<E>::create(store.as_ref(), fields)?;
    info!("Added {} {} to billboard {}", E::KIND, record.id, id);
    Ok((StatusCode::CREATED, Json(record)))
}

async fn billboard_rentals(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<RentalView>>> {
    load::<Billboard, _>(store.as_ref(), &id)?;
    let snapshot = store.snapshot()?;
    Ok(Json(rentals_of_billboard(&snapshot, &id)))
}

async fn post_invoice(
    _session: ManagerSession,
    State(store): State<GuardedBusinessStore>,
    State(config): State<ServerConfig>,
    Path(id): Path<String>,
    Json(request): Json<InvoiceRequest>,
) -> ApiResult<(StatusCode, Json<GeneratedInvoice>)> {
    let today = chrono::Local::now().date_naive();
    let generated = generate_invoice(store.as_ref(), &id, request, &config.business, today)?;
    Ok((StatusCode::CREATED, Json(generated)))
}

/// GET, PUT and DELETE on `/{id}` for a record type.
pub fn item_routes<E: Entity>() -> Router<ServerState>
where
    dyn BusinessStore: RecordStore<E>,
{
    Router::new().route(
        "/{id}",
        get(get_record::<E>)
            .put(update_record::<E>)
            .delete(delete_record::<E>),
    )
}

/// Routes:
/// - GET, POST /
/// - GET, PUT, DELETE /{id}
/// - GET /{id}/details
/// - GET, POST /{id}/installation-costs
/// - GET, POST /{id}/investments
/// - GET, POST /{id}/documents
/// - GET /{id}/rentals
/// - POST /{id}/invoice
pub fn billboard_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_billboards).post(create_record::<Billboard>))
        .route("/{id}/details", get(billboard_details))
        .route(
            "/{id}/installation-costs",
            get(list_billboard_children::<InstallationCost>)
                .post(create_billboard_child::<InstallationCost>),
        )
        .route(
            "/{id}/investments",
            get(list_billboard_children::<PartnerInvestment>)
                .post(create_billboard_child::<PartnerInvestment>),
        )
        .route(
            "/{id}/documents",
            get(list_billboard_children::<BillboardDocument>)
                .post(create_billboard_child::<BillboardDocument>),
        )
        .route("/{id}/rentals", get(billboard_rentals))
        .route("/{id}/invoice", post(post_invoice))
        .merge(item_routes::<Billboard>())
}
