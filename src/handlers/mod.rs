mod alleles;
mod page;
mod reads;
mod sets;
mod snps;
mod variants;

pub use alleles::search_alleles;
pub use page::index;
pub use reads::search_reads;
pub use sets::search_sets;
pub use snps::search_snps;
pub use variants::search_variants;

use crate::{
    Error, Result,
    client::BackendClient,
    registry::{Backend, BackendRegistry},
    wiki::WikiSource,
};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BackendRegistry>,
    pub client: BackendClient,
    pub wiki: Arc<dyn WikiSource>,
}

impl AppState {
    /// Resolve the `backend` parameter before any outbound call is made.
    pub fn backend(&self, id: Option<&str>) -> Result<&Backend> {
        let id = required(id, "backend")?;
        self.registry.get(id)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/reads", get(search_reads))
        .route("/api/variants", get(search_variants))
        .route("/api/sets", get(search_sets))
        .route("/api/snps", get(search_snps))
        .route("/api/alleles", get(search_alleles))
        .with_state(state)
}

/// Empty query values count as missing.
fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingParameter(name))
}

fn coordinate(value: Option<&str>, name: &'static str) -> Result<i64> {
    let value = required(value, name)?;
    value.trim().parse().map_err(|_| Error::InvalidParameter {
        name,
        value: value.to_string(),
    })
}

/// Ids are spliced into backend paths, so path syntax is refused.
fn path_segment<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    if value.contains(['/', '?', '#']) {
        return Err(Error::InvalidParameter {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
