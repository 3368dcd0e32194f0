use axum::{extract::State, Extension, Json};
use yubin_core::AccessLogSummary;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

pub(super) async fn list_access_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<AccessLogSummary>, ApiError> {
    let access_logs = state
        .access_logs
        .summarize()
        .await
        .map_err(|e| map_db_error(req_id.0, &e))?;

    Ok(Json(AccessLogSummary { access_logs }))
}
