use serde::{Deserialize, Serialize};

/// Query parameters of `/api/reads`
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReadsQuery {
    pub backend: Option<String>,
    pub set_ids: Option<String>,
    pub sequence_name: Option<String>,
    pub sequence_start: Option<String>,
    pub sequence_end: Option<String>,
    pub read_fields: Option<String>,
    pub page_token: Option<String>,
}

/// Query parameters of `/api/variants`
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariantsQuery {
    pub backend: Option<String>,
    pub set_ids: Option<String>,
    pub sequence_name: Option<String>,
    pub sequence_start: Option<String>,
    pub sequence_end: Option<String>,
    pub page_token: Option<String>,
}

/// Query parameters of `/api/sets`
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetsQuery {
    pub backend: Option<String>,
    pub set_type: Option<String>,
    pub set_id: Option<String>,
    pub dataset_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SnpQuery {
    pub snp: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AlleleQuery {
    pub snp: Option<String>,
    pub a1: Option<String>,
    pub a2: Option<String>,
}

/// GA4GH `reads/search` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReadsRequest {
    pub read_group_set_ids: Vec<String>,
    pub reference_name: String,
    pub start: i64,
    pub end: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// GA4GH `variants/search` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantsRequest {
    pub call_set_ids: Vec<String>,
    pub reference_name: String,
    pub start: i64,
    pub end: i64,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReadGroupSetsRequest {
    pub dataset_ids: Vec<String>,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantSetsRequest {
    pub dataset_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCallSetsRequest {
    pub variant_set_ids: Vec<String>,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReferencesRequest {
    pub reference_set_id: Vec<String>,
}

/// Reference sequence name and length attached to a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub length: u64,
}

/// SNPedia annotation of a single SNP page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnpAnnotation {
    pub name: String,
    pub link: String,
    pub position: String,
    pub chr: String,
}

#[derive(Debug, Serialize)]
pub struct SnpSearchResponse {
    pub snps: Vec<SnpAnnotation>,
}

/// SNPedia annotation of a genotype page such as `rs123(A;G)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlleleAnnotation {
    pub name: String,
    pub link: String,
    pub repute: String,
    pub summary: String,
    pub magnitude: String,
}
