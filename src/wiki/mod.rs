//! SNP and genotype annotations scraped from SNPedia.
//!
//! Pages are fetched through the [`WikiSource`] trait so lookups can run
//! against the live MediaWiki API ([`SnpediaClient`]) or an in-memory source in
//! tests. A page that cannot be fetched is simply absent: SNP lookups drop it
//! and allele lookups move on to the next candidate name.

pub mod markup;
mod snpedia;

pub use snpedia::SnpediaClient;

use crate::types::{AlleleAnnotation, SnpAnnotation};
use async_trait::async_trait;

#[async_trait]
pub trait WikiSource: Send + Sync {
    /// Raw markup of the page titled `title`, or `None` when it is unavailable.
    async fn page_content(&self, title: &str) -> Option<String>;

    /// Human-readable URL of the page titled `title`.
    fn page_link(&self, title: &str) -> String;
}

/// Watson-Crick complement of a nucleotide, preserving case.
pub fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'G' => Some('C'),
        'C' => Some('G'),
        'a' => Some('t'),
        't' => Some('a'),
        'g' => Some('c'),
        'c' => Some('g'),
        _ => None,
    }
}

/// Genotype page names in the order they are tried.
///
/// Returns `None` if either allele is not a nucleotide.
pub fn allele_page_names(snp: &str, a1: char, a2: char) -> Option<[String; 4]> {
    let a1c = complement(a1)?;
    let a2c = complement(a2)?;
    Some([
        format!("{snp}({a1};{a2})"),
        format!("{snp}({a2};{a1})"),
        format!("{snp}({a1c};{a2c})"),
        format!("{snp}({a2c};{a1c})"),
    ])
}

fn is_snp_id(query: &str) -> bool {
    query
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rs"))
}

fn snp_annotation(source: &dyn WikiSource, name: &str, markup: &str) -> SnpAnnotation {
    SnpAnnotation {
        name: name.to_string(),
        link: source.page_link(name),
        position: markup::field_value(markup, "position"),
        chr: markup::field_value(markup, "chromosome"),
    }
}

fn allele_annotation(source: &dyn WikiSource, name: &str, markup: &str) -> AlleleAnnotation {
    let summary = markup::field_value(markup, "summary");
    AlleleAnnotation {
        name: name.to_string(),
        link: source.page_link(name),
        repute: markup::field_value(markup, "repute"),
        summary: if summary.is_empty() {
            "Unknown".to_string()
        } else {
            summary
        },
        magnitude: markup::field_value(markup, "magnitude"),
    }
}

/// Annotate an rs id directly, or every SNP a gene page links to.
pub async fn lookup_snps(source: &dyn WikiSource, query: &str) -> Vec<SnpAnnotation> {
    let Some(content) = source.page_content(query).await else {
        return Vec::new();
    };

    if is_snp_id(query) {
        return vec![snp_annotation(source, query, &content)];
    }

    let mut snps = Vec::new();
    for reference in markup::snp_references(&content) {
        match source.page_content(&reference).await {
            Some(page) => snps.push(snp_annotation(source, &reference, &page)),
            None => tracing::debug!(gene = query, snp = %reference, "skipping unavailable SNP page"),
        }
    }
    snps
}

/// First genotype page that exists among the four allele orderings.
pub async fn lookup_allele(
    source: &dyn WikiSource,
    candidates: &[String],
) -> Option<AlleleAnnotation> {
    for name in candidates {
        if let Some(content) = source.page_content(name).await {
            return Some(allele_annotation(source, name, &content));
        }
        tracing::debug!(page = %name, "genotype page not found, trying next ordering");
    }
    None
}
