use super::{AppState, path_segment, required};
use crate::{
    Error, Result, reshape,
    registry::Backend,
    types::{
        Reference, SearchCallSetsRequest, SearchReadGroupSetsRequest, SearchReferencesRequest,
        SearchVariantSetsRequest, SetsQuery,
    },
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetKind {
    ReadGroupSet,
    CallSet,
}

impl SetKind {
    fn from_param(set_type: Option<&str>) -> Self {
        match set_type {
            Some("CALLSET") => SetKind::CallSet,
            _ => SetKind::ReadGroupSet,
        }
    }

    fn search_path(self) -> &'static str {
        match self {
            SetKind::ReadGroupSet => "readgroupsets/search",
            SetKind::CallSet => "callsets/search",
        }
    }

    fn list_key(self) -> &'static str {
        match self {
            SetKind::ReadGroupSet => "readGroupSets",
            SetKind::CallSet => "callSets",
        }
    }
}

/// Look up one set by `setId`, or search a dataset's sets by name.
pub async fn search_sets(
    State(state): State<AppState>,
    Query(query): Query<SetsQuery>,
) -> Result<Json<Value>> {
    let backend = state.backend(query.backend.as_deref())?;
    let kind = SetKind::from_param(query.set_type.as_deref());

    if let Some(set_id) = query.set_id.as_deref().filter(|id| !id.is_empty()) {
        let set_id = path_segment(set_id, "setId")?;
        let set = match kind {
            SetKind::ReadGroupSet => read_group_set(&state, backend, set_id).await?,
            SetKind::CallSet => call_set(&state, backend, set_id).await?,
        };
        return Ok(Json(set));
    }

    // Failures while listing are reported as an empty object, never as an
    // error. Flagged for review: this hides backend outages from the client.
    match list_sets(&state, backend, kind, &query).await {
        Ok(sets) => Ok(Json(sets)),
        Err(e) => {
            tracing::warn!(
                backend = %backend.id,
                ?kind,
                error = %e,
                "set search by name failed, returning empty result"
            );
            Ok(Json(json!({})))
        }
    }
}

async fn read_group_set(state: &AppState, backend: &Backend, set_id: &str) -> Result<Value> {
    let mut set = state
        .client
        .get(backend, &format!("readgroupsets/{set_id}"))
        .await?;

    let reference_set_id = set
        .get("referenceSetId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .or_else(|| {
            set.pointer("/readGroups/0/referenceSetId")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
        })
        .map(str::to_string);

    let references = match reference_set_id {
        Some(reference_set_id) => references_of_set(state, backend, reference_set_id).await?,
        None => {
            let buckets = state
                .client
                .get(backend, &format!("readgroupsets/{set_id}/coveragebuckets"))
                .await?;
            references_from_buckets(&buckets)?
        }
    };

    attach_references(&mut set, references)?;
    Ok(set)
}

async fn references_of_set(
    state: &AppState,
    backend: &Backend,
    reference_set_id: String,
) -> Result<Value> {
    let request = SearchReferencesRequest {
        reference_set_id: vec![reference_set_id],
    };
    let params: &[(&str, &str)] = if backend.capabilities.partial_response {
        &[("fields", "references(name,length)")]
    } else {
        &[]
    };
    let mut content = state
        .client
        .search(backend, "references/search", &request, params)
        .await?;

    content
        .get_mut("references")
        .map(Value::take)
        .ok_or_else(|| Error::UnexpectedShape("reference search has no references".to_string()))
}

/// Reference names and lengths implied by coverage bucket ranges.
fn references_from_buckets(buckets: &Value) -> Result<Value> {
    let buckets = buckets
        .get("coverageBuckets")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::UnexpectedShape("missing coverageBuckets".to_string()))?;

    let references = buckets
        .iter()
        .map(|bucket| {
            let name = bucket.pointer("/range/referenceName").and_then(Value::as_str);
            let length = bucket.pointer("/range/end").and_then(as_length);
            match (name, length) {
                (Some(name), Some(length)) => Ok(Reference {
                    name: name.to_string(),
                    length,
                }),
                _ => Err(Error::UnexpectedShape(
                    "coverage bucket without a range".to_string(),
                )),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    to_value(references)
}

async fn call_set(state: &AppState, backend: &Backend, set_id: &str) -> Result<Value> {
    let mut set = state
        .client
        .get(backend, &format!("callsets/{set_id}"))
        .await?;

    let variant_set_id = set
        .pointer("/variantSetIds/0")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::UnexpectedShape("call set has no variantSetIds".to_string()))?;
    let variant_set_id = path_segment(variant_set_id, "variantSetId")?.to_string();

    let variant_set = state
        .client
        .get(backend, &format!("variantsets/{variant_set_id}"))
        .await?;

    let references = references_from_bounds(&variant_set)?;
    attach_references(&mut set, references)?;
    Ok(set)
}

/// Reference names and lengths from a variant set's `referenceBounds`.
fn references_from_bounds(variant_set: &Value) -> Result<Value> {
    let bounds = variant_set
        .get("referenceBounds")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::UnexpectedShape("missing referenceBounds".to_string()))?;

    let references = bounds
        .iter()
        .map(|bound| {
            let name = bound.get("referenceName").and_then(Value::as_str);
            let length = bound.get("upperBound").and_then(as_length);
            match (name, length) {
                (Some(name), Some(length)) => Ok(Reference {
                    name: name.to_string(),
                    length,
                }),
                _ => Err(Error::UnexpectedShape(
                    "reference bound without name or upperBound".to_string(),
                )),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    to_value(references)
}

async fn list_sets(
    state: &AppState,
    backend: &Backend,
    kind: SetKind,
    query: &SetsQuery,
) -> Result<Value> {
    let dataset_id = required(query.dataset_id.as_deref(), "datasetId")?.to_string();
    let name = query.name.clone().unwrap_or_default();

    let selector = format!("nextPageToken,{}(id,name)", kind.list_key());
    let params: Vec<(&str, &str)> = if backend.capabilities.partial_response {
        vec![("fields", selector.as_str())]
    } else {
        Vec::new()
    };

    let mut content = match kind {
        SetKind::ReadGroupSet => {
            let request = SearchReadGroupSetsRequest {
                dataset_ids: vec![dataset_id],
                name: name.clone(),
            };
            state
                .client
                .search(backend, kind.search_path(), &request, &params)
                .await?
        }
        SetKind::CallSet => {
            // Call sets hang off the dataset's variant set, not the dataset.
            let variant_sets = state
                .client
                .search(
                    backend,
                    "variantsets/search",
                    &SearchVariantSetsRequest {
                        dataset_ids: vec![dataset_id],
                    },
                    &[],
                )
                .await?;
            let variant_set_id = variant_sets
                .pointer("/variantSets/0/id")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::UnexpectedShape("dataset has no variant sets".to_string()))?;

            let request = SearchCallSetsRequest {
                variant_set_ids: vec![variant_set_id.to_string()],
                name: name.clone(),
            };
            state
                .client
                .search(backend, kind.search_path(), &request, &params)
                .await?
        }
    };

    // Backends that ignore `name` in the body still get filtered here.
    if !backend.capabilities.name_filter {
        reshape::filter_by_name(&mut content, kind.list_key(), &name);
    }
    if !backend.capabilities.partial_response {
        reshape::project_records(&mut content, kind.list_key(), &["id", "name"]);
    }
    Ok(content)
}

fn as_length(value: &Value) -> Option<u64> {
    // GA4GH encodes int64 fields as JSON strings.
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn to_value(references: Vec<Reference>) -> Result<Value> {
    serde_json::to_value(references)
        .map_err(|e| Error::Internal(format!("failed to serialize references: {e}")))
}

fn attach_references(set: &mut Value, references: Value) -> Result<()> {
    set.as_object_mut()
        .ok_or_else(|| Error::UnexpectedShape("set is not a JSON object".to_string()))?
        .insert("references".to_string(), references);
    Ok(())
}
