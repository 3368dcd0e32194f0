use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use yubin_core::{AddressInfo, PostalCode};

use crate::middleware::RequestId;

use super::{map_db_error, map_geo_error, map_resolve_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AddressQuery {
    pub postal_code: Option<String>,
}

/// `GET /address?postal_code=NNNNNNN`
///
/// The access log row is written only once resolution has succeeded, and the
/// response waits for it. A query string that does not deserialize, such as
/// a repeated `postal_code`, is treated like a missing code.
pub(super) async fn get_address(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<AddressInfo>, ApiError> {
    let raw = match query {
        Ok(Query(query)) => query.postal_code,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "address query rejected");
            None
        }
    };

    let postal_code = PostalCode::parse(raw.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.to_string()))?;

    let lookup = state
        .geo
        .search_by_postal(&postal_code)
        .await
        .map_err(|e| map_geo_error(req_id.0.clone(), &e))?;

    let info = state
        .resolver
        .resolve(&lookup)
        .map_err(|e| map_resolve_error(req_id.0.clone(), &e))?;

    state
        .access_logs
        .record(postal_code.as_str())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        postal_code = %postal_code,
        hit_count = info.hit_count,
        distance_km = info.distance_km,
        "address resolved"
    );

    Ok(Json(info))
}
