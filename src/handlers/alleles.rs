use super::{AppState, required};
use crate::{Error, Result, types::AlleleQuery, wiki};
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

pub async fn search_alleles(
    State(state): State<AppState>,
    Query(query): Query<AlleleQuery>,
) -> Result<Json<Value>> {
    let snp = required(query.snp.as_deref(), "snp")?;
    let a1 = base(query.a1.as_deref(), "a1")?;
    let a2 = base(query.a2.as_deref(), "a2")?;

    let candidates = wiki::allele_page_names(snp, a1, a2).ok_or_else(|| {
        Error::InvalidParameter {
            name: "a1",
            value: format!("{a1}/{a2}"),
        }
    })?;

    match wiki::lookup_allele(state.wiki.as_ref(), &candidates).await {
        Some(allele) => Ok(Json(json!(allele))),
        None => Ok(Json(json!({}))),
    }
}

/// A single nucleotide letter.
fn base(value: Option<&str>, name: &'static str) -> Result<char> {
    let value = required(value, name)?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if wiki::complement(c).is_some() => Ok(c),
        _ => Err(Error::InvalidParameter {
            name,
            value: value.to_string(),
        }),
    }
}
