use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use stockpile_item::{decode_batch, Item};
use stockpile_store::StoreError;
use stockpile_types::fields::NAME;
use stockpile_types::{FieldMap, ItemId};
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};
use crate::response::Envelope;
use crate::state::AppState;

/// Liveness reply on the root path.
pub async fn pong() -> Envelope<()> {
    Envelope::message(StatusCode::OK, "pong")
}

/// Health check handler.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Reply for paths no route matches.
pub async fn not_found() -> Envelope<()> {
    Envelope::message(StatusCode::NOT_FOUND, "not found")
}

/// List every stored item.
pub async fn get_all_items(State(state): State<AppState>) -> ServerResult<Envelope<Item>> {
    let store = state.store();
    let keys = store.keys()?;
    let records = store.get_batch(&keys)?;

    let mut items = Vec::with_capacity(keys.len());
    for (key, fields) in keys.iter().zip(records) {
        // Deleted between keys() and get_batch().
        let Some(fields) = fields else { continue };
        items.push(restore(key, &fields)?);
    }
    debug!(count = items.len(), "listed items");
    Ok(Envelope::data(StatusCode::OK, items))
}

/// Create a batch of items; fails if any of them already exists or a name
/// repeats within the batch. Nothing is stored on failure.
pub async fn create_items(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Envelope<ItemId>> {
    set_items(state, body, false).await
}

/// Create or replace a batch of items. A name repeated within the batch
/// keeps its last entry.
pub async fn put_items(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Envelope<ItemId>> {
    set_items(state, body, true).await
}

/// Fetch one item by id.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Envelope<Item>> {
    let id = route_id(&id)?;
    let fields = state
        .store()
        .get(id.as_str())?
        .ok_or_else(|| ServerError::NotFound(id.to_string()))?;
    let item = restore(id.as_str(), &fields)?;
    Ok(Envelope::data(StatusCode::OK, vec![item]))
}

/// Delete one item by id.
pub async fn del_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Envelope<()>> {
    let id = route_id(&id)?;
    if !state.store().delete(id.as_str())? {
        return Err(ServerError::NotFound(id.to_string()));
    }
    info!(id = %id, "item deleted");
    Ok(Envelope::message(StatusCode::OK, format!("item {id} deleted")))
}

async fn set_items(
    state: AppState,
    body: Bytes,
    overwrite: bool,
) -> ServerResult<Envelope<ItemId>> {
    // Decoding cost grows with the body; run it off the async workers.
    let (ids, records) = tokio::task::spawn_blocking(move || prepare_batch(&body))
        .await
        .map_err(|e| ServerError::Internal(format!("batch decoding task failed: {e}")))??;

    let store = state.store();
    if overwrite {
        store.set_batch(&records)?;
    } else {
        store.set_batch_if_absent(&records).map_err(|e| match e {
            StoreError::KeyExists(key) => ServerError::AlreadyExists(conflict_name(&records, key)),
            other => ServerError::Store(other),
        })?;
    }
    info!(count = ids.len(), overwrite, "items stored");

    let status = if overwrite { StatusCode::OK } else { StatusCode::CREATED };
    Ok(Envelope::data(status, ids))
}

fn prepare_batch(body: &[u8]) -> ServerResult<(Vec<ItemId>, Vec<(String, FieldMap)>)> {
    let items = decode_batch(body).map_err(ServerError::InvalidItems)?;
    let mut ids = Vec::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());
    for item in &items {
        let (key, fields) = item.to_fields().map_err(ServerError::InvalidItems)?;
        records.push((key.as_str().to_string(), fields));
        ids.push(key);
    }
    Ok((ids, records))
}

fn conflict_name(records: &[(String, FieldMap)], key: String) -> String {
    records
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, fields)| fields.get(NAME).cloned())
        .unwrap_or(key)
}

/// Ids outside `[a-zA-Z0-9]+` never match an item route.
fn route_id(raw: &str) -> ServerResult<ItemId> {
    ItemId::parse(raw).map_err(|_| ServerError::NotFound(raw.to_string()))
}

fn restore(key: &str, fields: &FieldMap) -> ServerResult<Item> {
    Item::from_fields(key, fields).map_err(|source| ServerError::CorruptRecord {
        key: key.to_string(),
        source,
    })
}
