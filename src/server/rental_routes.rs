//! Rentals, the client payments made against them, and the invoice board.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::billboard_routes::item_routes;
use super::error::{ApiError, ApiResult};
use super::records::create_record;
use super::session::ViewerSession;
use super::state::{GuardedBusinessStore, ServerState};
use super::ServerConfig;
use crate::business_store::*;
use crate::documents::MoneyReceipt;
use crate::filtering::{self, ListFilter};
use crate::finance::{duration_months, is_pending, is_settled, rental_payment_status, Total};
use crate::status_badges::{
    paid_payment_color, payment_status_color, received_payment_color, rental_status_color, Badged,
};

fn badged_rentals(views: Vec<RentalView>) -> Vec<Badged<RentalView>> {
    views
        .into_iter()
        .map(|r| {
            let status = r.rental.fields.status.clone();
            Badged::new(r, &status, rental_status_color)
        })
        .collect()
}

async fn list_rentals(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<Vec<Badged<RentalView>>>> {
    let views = store.snapshot()?.rental_views();
    Ok(Json(badged_rentals(filtering::apply(&views, &filter))))
}

#[derive(Serialize)]
struct RentalDetails {
    rental: RentalView,
    payments: Vec<Badged<ClientPaymentRecord>>,
    installation_costs: Vec<InstallationCostRecord>,
    duration_months: i64,
    payment_status: &'static str,
}

async fn rental_details(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<RentalDetails>> {
    let rental = store
        .snapshot()?
        .rental_view(&id)
        .ok_or_else(|| ApiError::not_found(Rental::KIND, &id))?;
    let payments = RecordStore::<ClientPayment>::list_by(store.as_ref(), "rental_id", &id)?;
    let status = rental_payment_status(payments.iter().map(|p| p.fields.status.as_str()));
    let installation_costs = RecordStore::<InstallationCost>::list_by(
        store.as_ref(),
        "billboard_id",
        &rental.rental.fields.billboard_id,
    )?;

    Ok(Json(RentalDetails {
        duration_months: duration_months(
            rental.rental.fields.start_date,
            rental.rental.fields.end_date,
        ),
        payment_status: status.as_str(),
        rental,
        payments: payments
            .into_iter()
            .map(|p| {
                let status = p.fields.status.clone();
                Badged::new(p, &status, received_payment_color)
            })
            .collect(),
        installation_costs,
    }))
}

#[derive(Debug, PartialEq, Serialize)]
struct PaymentStats {
    total: f64,
    completed: usize,
    pending: usize,
}

impl PaymentStats {
    fn of(payments: &[PaymentView]) -> Self {
        PaymentStats {
            total: payments.iter().map(|p| p.payment.fields.amount).total(),
            completed: payments
                .iter()
                .filter(|p| is_settled(&p.payment.fields.status))
                .count(),
            pending: payments
                .iter()
                .filter(|p| is_pending(&p.payment.fields.status))
                .count(),
        }
    }
}

#[derive(Serialize)]
struct PaymentList {
    payments: Vec<Badged<PaymentView>>,
    stats: PaymentStats,
}

async fn list_payments(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<PaymentList>> {
    let views = store.snapshot()?.payment_views();
    let filtered = filtering::apply(&views, &filter);
    let stats = PaymentStats::of(&filtered);

    Ok(Json(PaymentList {
        payments: filtered
            .into_iter()
            .map(|p| {
                let status = p.payment.fields.status.clone();
                Badged::new(p, &status, payment_status_color)
            })
            .collect(),
        stats,
    }))
}

async fn payment_receipt(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    State(config): State<ServerConfig>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let payment = store
        .snapshot()?
        .payment_view(&id)
        .ok_or_else(|| ApiError::not_found(ClientPayment::KIND, &id))?;
    let receipt = MoneyReceipt::from_payment(&payment, chrono::Local::now().date_naive());

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", receipt.file_name()),
            ),
        ],
        receipt.render(&config.business),
    ))
}

#[derive(Serialize)]
struct InvoiceBoard {
    rentals: Vec<Badged<RentalView>>,
    client_payments: Vec<Badged<PaymentView>>,
    land_owner_payments: Vec<Badged<LandOwnerPaymentView>>,
}

async fn invoice_board(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<InvoiceBoard>> {
    let snapshot = store.snapshot()?;
    let rentals = filtering::apply(&snapshot.invoice_views(), &filter);

    Ok(Json(InvoiceBoard {
        rentals: badged_rentals(rentals),
        client_payments: snapshot
            .payment_views()
            .into_iter()
            .map(|p| {
                let status = p.payment.fields.status.clone();
                Badged::new(p, &status, received_payment_color)
            })
            .collect(),
        land_owner_payments: snapshot
            .land_owner_payment_views()
            .into_iter()
            .map(|p| {
                let status = p.payment.fields.status.clone();
                Badged::new(p, &status, paid_payment_color)
            })
            .collect(),
    }))
}

pub fn rental_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_rentals).post(create_record::<Rental>))
        .route("/{id}/details", get(rental_details))
        .merge(item_routes::<Rental>())
}

pub fn payment_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_payments).post(create_record::<ClientPayment>))
        .route("/{id}/receipt", get(payment_receipt))
        .merge(item_routes::<ClientPayment>())
}

pub fn invoice_routes() -> Router<ServerState> {
    Router::new().route("/", get(invoice_board))
}
