use super::{AppState, coordinate, non_empty, required};
use crate::{
    Result, reshape,
    types::{SearchVariantsRequest, VariantsQuery},
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

const VARIANTS_PAGE_SIZE: u32 = 100;

pub async fn search_variants(
    State(state): State<AppState>,
    Query(query): Query<VariantsQuery>,
) -> Result<Json<Value>> {
    let backend = state.backend(query.backend.as_deref())?;

    let request = SearchVariantsRequest {
        call_set_ids: reshape::split_list(required(query.set_ids.as_deref(), "setIds")?)
            .into_iter()
            .map(str::to_string)
            .collect(),
        reference_name: required(query.sequence_name.as_deref(), "sequenceName")?.to_string(),
        start: coordinate(query.sequence_start.as_deref(), "sequenceStart")?.max(0),
        end: coordinate(query.sequence_end.as_deref(), "sequenceEnd")?,
        page_size: VARIANTS_PAGE_SIZE,
        page_token: non_empty(query.page_token),
    };

    let content = state
        .client
        .search(backend, "variants/search", &request, &[])
        .await?;

    Ok(Json(content))
}
