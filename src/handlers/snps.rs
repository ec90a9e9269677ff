use super::{AppState, required};
use crate::{
    Result,
    types::{SnpQuery, SnpSearchResponse},
    wiki,
};
use axum::{
    Json,
    extract::{Query, State},
};

/// Annotate an rs id, or every SNP linked from a gene page.
pub async fn search_snps(
    State(state): State<AppState>,
    Query(query): Query<SnpQuery>,
) -> Result<Json<SnpSearchResponse>> {
    let snp = required(query.snp.as_deref(), "snp")?;
    let snps = wiki::lookup_snps(state.wiki.as_ref(), snp).await;
    tracing::debug!(query = snp, found = snps.len(), "SNP lookup");
    Ok(Json(SnpSearchResponse { snps }))
}
