use anyhow::{Context, Result};
use std::time::Duration;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::info;

use super::billboard_routes::{billboard_routes, item_routes};
use super::party_routes::{
    client_routes, land_owner_payment_routes, land_owner_routes, partner_routes,
};
use super::rental_routes::{invoice_routes, payment_routes, rental_routes};
use super::report_routes::{meta_routes, report_routes};
use super::user_routes::{admin_routes, auth_routes};
use super::{log_requests, state::*, ServerConfig};
use crate::business_store::{BillboardDocument, InstallationCost, PartnerInvestment};
use crate::server::session::Session;
use crate::user::{UserManager, UserStore};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub session_token: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        session_token: session.map(|s| s.token),
    };
    Json(stats)
}

pub fn make_app(
    config: ServerConfig,
    business_store: GuardedBusinessStore,
    user_store: Box<dyn UserStore>,
) -> Result<Router> {
    let user_manager = UserManager::new(user_store);
    let state = ServerState::new(config.clone(), business_store, user_manager);

    let api_routes: Router<ServerState> = Router::new()
        .nest("/v1/auth", auth_routes())
        .nest("/v1/billboards", billboard_routes())
        .nest(
            "/v1/installation-costs",
            item_routes::<InstallationCost>(),
        )
        .nest("/v1/investments", item_routes::<PartnerInvestment>())
        .nest("/v1/documents", item_routes::<BillboardDocument>())
        .nest("/v1/clients", client_routes())
        .nest("/v1/partners", partner_routes())
        .nest("/v1/land-owners", land_owner_routes())
        .nest("/v1/land-owner-payments", land_owner_payment_routes())
        .nest("/v1/rentals", rental_routes())
        .nest("/v1/payments", payment_routes())
        .nest("/v1/invoices", invoice_routes())
        .nest("/v1/reports", report_routes())
        .nest("/v1/meta", meta_routes())
        .nest("/v1/admin", admin_routes());

    let home_router: Router<ServerState> = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)),
    };

    let app: Router = home_router
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state);

    Ok(app)
}

pub async fn run_server(
    config: ServerConfig,
    business_store: GuardedBusinessStore,
    user_store: Box<dyn UserStore>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, business_store, user_store)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on 127.0.0.1:{}", port);

    Ok(axum::serve(listener, app).await?)
}
