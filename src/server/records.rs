//! Handlers shared by every entity: get, create, update and delete, plus
//! the plumbing for records created under a billboard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::error::{ApiError, ApiResult};
use super::session::{ManagerSession, ViewerSession};
use super::state::GuardedBusinessStore;
use crate::business_store::{BusinessStore, Entity, Record, RecordStore};
use crate::filtering::{self, ListFilter, Searchable};

/// Loads a record or fails with 404.
pub(super) fn load<E, S>(store: &S, id: &str) -> ApiResult<Record<E>>
where
    E: Entity,
    S: RecordStore<E> + ?Sized,
{
    RecordStore::<E>::get(store, id)?.ok_or_else(|| ApiError::not_found(E::KIND, id))
}

/// Builds an entity from a request body, filling `key` with the parent id
/// taken from the path.
pub(super) fn with_parent<E: Entity>(mut body: Value, key: &str, parent_id: &str) -> ApiResult<E> {
    match body.as_object_mut() {
        Some(object) => {
            object.insert(key.to_string(), Value::String(parent_id.to_string()));
        }
        None => return Err(ApiError::BadRequest("Expected a JSON object".to_string())),
    }
    serde_json::from_value(body).map_err(|err| ApiError::BadRequest(err.to_string()))
}

pub(super) async fn list_records<E: Entity>(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Query(filter): Query<ListFilter>,
) -> ApiResult<Json<Vec<Record<E>>>>
where
    dyn BusinessStore: RecordStore<E>,
    Record<E>: Searchable,
{
    let records = RecordStore::<E>::list(store.as_ref())?;
    Ok(Json(filtering::apply(&records, &filter)))
}

pub(super) async fn get_record<E: Entity>(
    _session: ViewerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Record<E>>>
where
    dyn BusinessStore: RecordStore<E>,
{
    Ok(Json(load::<E, _>(store.as_ref(), &id)?))
}

pub(super) async fn create_record<E: Entity>(
    ManagerSession(session): ManagerSession,
    State(store): State<GuardedBusinessStore>,
    Json(fields): Json<E>,
) -> ApiResult<(StatusCode, Json<Record<E>>)>
where
    dyn BusinessStore: RecordStore<E>,
{
    let record = RecordStore::<E>::create(store.as_ref(), fields)?;
    debug!("{} created {} {}", session.user_handle, E::KIND, record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

pub(super) async fn update_record<E: Entity>(
    ManagerSession(session): ManagerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
    Json(fields): Json<E>,
) -> ApiResult<Json<Record<E>>>
where
    dyn BusinessStore: RecordStore<E>,
{
    let record = RecordStore::<E>::update(store.as_ref(), &id, fields)?;
    debug!("{} updated {} {}", session.user_handle, E::KIND, id);
    Ok(Json(record))
}

pub(super) async fn delete_record<E: Entity>(
    ManagerSession(session): ManagerSession,
    State(store): State<GuardedBusinessStore>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode>
where
    dyn BusinessStore: RecordStore<E>,
{
    RecordStore::<E>::delete(store.as_ref(), &id)?;
    debug!("{} deleted {} {}", session.user_handle, E::KIND, id);
    Ok(StatusCode::NO_CONTENT)
}
