use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use pack_sizing::{PackBreakdown, PackSize};

use super::{error::ApiError, state::ServerState};

#[derive(Debug, serde::Deserialize)]
pub(super) struct CalculateParams {
    quantity: Option<String>,
}

/// Computes the pack breakdown for `?quantity=N` against a snapshot of the
/// current pack sizes.
pub(super) async fn calculate(
    State(state): State<ServerState>,
    params: Result<Query<CalculateParams>, QueryRejection>,
) -> Result<Json<PackBreakdown>, ApiError> {
    let Query(params) = params?;
    let quantity = parse_quantity(params.quantity.as_deref(), state.max_order_quantity)?;

    let sizes: Vec<PackSize> = state.registry.sizes();

    // the table spans quantity + largest size, so both stay within their limits
    match sizes.last() {
        None => return Err(ApiError::NoPackSizes),
        Some(&largest) if largest.get() > state.max_pack_size => return Err(ApiError::PackSizeLimit(largest)),
        Some(_) => {}
    }

    // Large orders keep a core busy for a while, so keep them off the async workers.
    let breakdown = tokio::task::spawn_blocking(move || pack_sizing::optimize(quantity, &sizes))
        .await
        .map_err(|error| ApiError::Internal(error.to_string()))?;

    tracing::debug!(
        order_quantity = breakdown.order_quantity(),
        total_items = breakdown.total_items(),
        total_packs = breakdown.total_packs(),
        "calculated pack breakdown"
    );

    Ok(Json(breakdown))
}

fn parse_quantity(raw: Option<&str>, max_order_quantity: u64) -> Result<u64, pack_sizing::Error> {
    use pack_sizing::Error;

    let quantity = raw
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or_else(|| Error::InvalidQuantity("quantity must be an integer".to_string()))?;

    let quantity = u64::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or_else(|| Error::InvalidQuantity("order quantity must be a positive integer".to_string()))?;

    if quantity > max_order_quantity {
        return Err(Error::InvalidQuantity(format!(
            "order quantity must not exceed {max_order_quantity}"
        )));
    }

    Ok(quantity)
}
