use super::{AppState, coordinate, non_empty, required};
use crate::{
    Result, reshape,
    types::{ReadsQuery, SearchReadsRequest},
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

/// Page size requested when the backend trims records server-side.
const PARTIAL_RESPONSE_PAGE_SIZE: u32 = 1024;

pub async fn search_reads(
    State(state): State<AppState>,
    Query(query): Query<ReadsQuery>,
) -> Result<Json<Value>> {
    let backend = state.backend(query.backend.as_deref())?;

    let mut request = SearchReadsRequest {
        read_group_set_ids: reshape::split_list(required(query.set_ids.as_deref(), "setIds")?)
            .into_iter()
            .map(str::to_string)
            .collect(),
        reference_name: required(query.sequence_name.as_deref(), "sequenceName")?.to_string(),
        start: coordinate(query.sequence_start.as_deref(), "sequenceStart")?.max(0),
        end: coordinate(query.sequence_end.as_deref(), "sequenceEnd")?,
        page_size: None,
        page_token: non_empty(query.page_token),
    };

    let fields = query
        .read_fields
        .as_deref()
        .map(reshape::split_list)
        .unwrap_or_default();
    let server_side = !fields.is_empty() && backend.capabilities.partial_response;

    let selector = server_side.then(|| format!("nextPageToken,alignments({})", fields.join(",")));
    let mut params = Vec::new();
    if let Some(selector) = &selector {
        params.push(("fields", selector.as_str()));
        request.page_size = Some(PARTIAL_RESPONSE_PAGE_SIZE);
    }

    let mut content = state
        .client
        .search(backend, "reads/search", &request, &params)
        .await?;

    // Emulate partial responses for backends that return whole records.
    if !fields.is_empty() && !server_side {
        reshape::project_records(&mut content, "alignments", &fields);
    }

    Ok(Json(content))
}
