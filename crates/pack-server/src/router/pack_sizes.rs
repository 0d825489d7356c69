use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use pack_sizing::PackSize;

use super::{error::ApiError, state::ServerState};

#[derive(Debug, serde::Serialize)]
pub(super) struct SizesResponse {
    sizes: Vec<PackSize>,
}

impl SizesResponse {
    fn current(state: &ServerState) -> Json<Self> {
        Json(Self {
            sizes: state.registry.sizes(),
        })
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct AddRequest {
    size: i64,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateRequest {
    old_size: i64,
    new_size: i64,
}

pub(super) async fn list(State(state): State<ServerState>) -> Json<SizesResponse> {
    SizesResponse::current(&state)
}

/// Adding a size that already exists succeeds without changing anything.
pub(super) async fn add(
    State(state): State<ServerState>,
    request: Result<Json<AddRequest>, JsonRejection>,
) -> Result<Json<SizesResponse>, ApiError> {
    let Json(AddRequest { size }) = request?;
    let size = accepted_size(&state, size)?;

    state.registry.add_size(size);

    Ok(SizesResponse::current(&state))
}

pub(super) async fn update(
    State(state): State<ServerState>,
    request: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<SizesResponse>, ApiError> {
    let Json(UpdateRequest { old_size, new_size }) = request?;

    let new_size = accepted_size(&state, new_size)?;
    let old_size = PackSize::try_from(old_size)?;

    state.registry.update_size(old_size, new_size)?;

    Ok(SizesResponse::current(&state))
}

/// A positive size no larger than the configured limit.
fn accepted_size(state: &ServerState, size: i64) -> Result<PackSize, pack_sizing::Error> {
    let size = PackSize::try_from(size)?;

    if size.get() > state.max_pack_size {
        return Err(pack_sizing::Error::PackSizeTooLarge {
            size,
            max: state.max_pack_size,
        });
    }

    Ok(size)
}

/// Removing a size that is not present succeeds without changing anything.
pub(super) async fn remove(
    State(state): State<ServerState>,
    size: Result<Path<String>, PathRejection>,
) -> Result<Json<SizesResponse>, ApiError> {
    let Path(raw) = size?;

    let size = raw
        .parse::<i64>()
        .map_err(|_| ApiError::MalformedRequest(format!("pack size must be an integer, got {raw:?}")))?;

    // zero and negative sizes can never be registered
    if let Ok(size) = PackSize::try_from(size) {
        state.registry.remove_size(size);
    }

    Ok(SizesResponse::current(&state))
}
