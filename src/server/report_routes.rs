use axum::{extract::State, routing::get, Json, Router};

use super::error::ApiResult;
use super::session::ViewerSession;
use super::state::{GuardedBusinessStore, ServerState};
use crate::business_store::INSTALLATION_COST_TYPES;
use crate::finance::{
    billboard_profit_summaries, billboard_profitability, dashboard, partner_profit_shares,
    partnership_report, BillboardProfitSummary, BillboardProfitability, DashboardStats,
    PartnerProfitShare, PartnershipReportRow,
};

async fn get_profit_summary(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
) -> ApiResult<Json<Vec<BillboardProfitSummary>>> {
    Ok(Json(billboard_profit_summaries(&store.snapshot()?)))
}

async fn get_partner_shares(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
) -> ApiResult<Json<Vec<PartnerProfitShare>>> {
    Ok(Json(partner_profit_shares(&store.snapshot()?)))
}

async fn get_partnership(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
) -> ApiResult<Json<Vec<PartnershipReportRow>>> {
    Ok(Json(partnership_report(&store.snapshot()?)))
}

async fn get_billboard_profitability(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
) -> ApiResult<Json<Vec<BillboardProfitability>>> {
    Ok(Json(billboard_profitability(&store.snapshot()?)))
}

async fn get_dashboard(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(dashboard(&store.snapshot()?)))
}

async fn get_cost_types(_session: ViewerSession) -> Json<&'static [&'static str]> {
    Json(INSTALLATION_COST_TYPES)
}

pub fn report_routes() -> Router<ServerState> {
    Router::new()
        .route("/profit-summary", get(get_profit_summary))
        .route("/partner-shares", get(get_partner_shares))
        .route("/partnership", get(get_partnership))
        .route("/billboard-profitability", get(get_billboard_profitability))
        .route("/dashboard", get(get_dashboard))
}

pub fn meta_routes() -> Router<ServerState> {
    Router::new().route("/cost-types", get(get_cost_types))
}
