use super::AppState;
use crate::{Result, registry::Backend};
use askama::Template;
use axum::{extract::State, response::Html};

#[derive(Template)]
#[template(path = "main.html")]
struct IndexTemplate<'a> {
    backends: &'a [Backend],
    /// Inlined into a `<script>` block.
    backends_json: String,
}

/// Entry page with backend and dataset selectors.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let backends_json = state.registry.summary_json()?.replace("</", "<\\/");
    let page = IndexTemplate {
        backends: state.registry.backends(),
        backends_json,
    }
    .render()?;
    Ok(Html(page))
}
