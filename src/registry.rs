//! Registry of the genomics backends this proxy can talk to.
//!
//! The registry is built once at startup from [`Config`] and shared read-only
//! with every request handler. Each [`Backend`] carries a URL template and the
//! capability flags that decide whether the proxy has to emulate partial
//! responses or name filtering on the client side.
//!
//! # Example
//!
//! ```
//! use genoproxy::registry::{Backend, BackendRegistry, Capabilities, UrlTemplate};
//!
//! let backend = Backend {
//!     id: "LOCAL".to_string(),
//!     name: "Local".to_string(),
//!     url_template: UrlTemplate::parse("http://localhost:9000/{path}?{query}").unwrap(),
//!     datasets: vec![],
//!     capabilities: Capabilities::default(),
//! };
//! let registry = BackendRegistry::new(vec![backend]);
//! assert!(registry.get("LOCAL").is_ok());
//! ```

use crate::{Config, Error, Result};
use serde::Serialize;
use std::path::Path;

pub const ENSEMBL_ID: &str = "Ensembl";
pub const GOOGLE_ID: &str = "GOOGLE";

const GOOGLE_URL_PREFIX: &str = "https://www.googleapis.com/genomics/v1beta2/{path}?key=";

const PATH_PLACEHOLDER: &str = "{path}";
const QUERY_PLACEHOLDER: &str = "{query}";

/// Backend URL with `{path}` and `{query}` placeholders.
#[derive(Debug, Clone)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        for placeholder in [PATH_PLACEHOLDER, QUERY_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(Error::Internal(format!(
                    "backend url template {template:?} is missing {placeholder}"
                )));
            }
        }
        Ok(Self(template.to_string()))
    }

    /// Substitute the query first so a path can never inject a placeholder.
    pub fn render(&self, path: &str, query: &str) -> String {
        self.0
            .replace(QUERY_PLACEHOLDER, query)
            .replace(PATH_PLACEHOLDER, path)
    }
}

/// Optional behaviors a backend implements natively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Honors a `fields=` selector and trims the response server-side.
    pub partial_response: bool,
    /// Filters set searches by the `name` field of the request body.
    pub name_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub id: String,
}

impl Dataset {
    fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Backend {
    pub id: String,
    pub name: String,
    /// May embed credentials, so it never leaves the server.
    #[serde(skip)]
    pub url_template: UrlTemplate,
    pub datasets: Vec<Dataset>,
    pub capabilities: Capabilities,
}

impl Backend {
    pub fn ensembl(url_template: &str) -> Result<Self> {
        Ok(Self {
            id: ENSEMBL_ID.to_string(),
            name: "Ensembl".to_string(),
            url_template: UrlTemplate::parse(url_template)?,
            datasets: vec![Dataset::new("1000 genomes pilot 2", "2")],
            capabilities: Capabilities::default(),
        })
    }

    pub fn google(api_key: &str) -> Result<Self> {
        let template = format!("{GOOGLE_URL_PREFIX}{api_key}&{QUERY_PLACEHOLDER}");
        Ok(Self {
            id: GOOGLE_ID.to_string(),
            name: "Google".to_string(),
            url_template: UrlTemplate::parse(&template)?,
            datasets: vec![
                Dataset::new("1000 Genomes", "10473108253681171589"),
                Dataset::new("Platinum Genomes", "3049512673186936334"),
                Dataset::new("DREAM SMC Challenge", "337315832689"),
                Dataset::new("PGP", "383928317087"),
                Dataset::new("Simons Foundation", "461916304629"),
            ],
            capabilities: Capabilities {
                partial_response: true,
                name_filter: true,
            },
        })
    }
}

/// Immutable set of backends, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: Vec<Backend>,
}

impl BackendRegistry {
    pub fn new(backends: Vec<Backend>) -> Self {
        Self { backends }
    }

    /// Ensembl is always available; Google only when a key file is present.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut backends = vec![Backend::ensembl(&config.ensembl_url)?];

        match read_api_key(&config.api_key_file)? {
            Some(key) => {
                tracing::info!(file = ?config.api_key_file, "Google backend enabled");
                backends.push(Backend::google(&key)?);
            }
            None => {
                tracing::debug!(file = ?config.api_key_file, "no API key file, Google backend disabled");
            }
        }

        Ok(Self::new(backends))
    }

    pub fn get(&self, id: &str) -> Result<&Backend> {
        self.backends
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::UnknownBackend(id.to_string()))
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    /// Client-safe JSON description of every backend.
    pub fn summary_json(&self) -> Result<String> {
        serde_json::to_string(&self.backends)
            .map_err(|e| Error::Internal(format!("failed to serialize backends: {e}")))
    }
}

/// First line of the key file, if the file exists and the line is non-empty.
pub fn read_api_key(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_template_requires_placeholders() {
        assert!(UrlTemplate::parse("http://host/{path}?{query}").is_ok());
        assert!(UrlTemplate::parse("http://host/{path}").is_err());
        assert!(UrlTemplate::parse("http://host/?{query}").is_err());
    }

    #[test]
    fn test_template_render() {
        let template = UrlTemplate::parse("http://host/api/{path}?key=k&{query}").unwrap();
        assert_eq!(
            template.render("reads/search", "fields=a%2Cb"),
            "http://host/api/reads/search?key=k&fields=a%2Cb"
        );
    }

    #[test]
    fn test_template_path_cannot_inject_query() {
        let template = UrlTemplate::parse("http://host/{path}?{query}").unwrap();
        assert_eq!(template.render("x{query}", "q=1"), "http://host/x{query}?q=1");
    }

    #[test]
    fn test_unknown_backend() {
        let registry = BackendRegistry::new(vec![Backend::ensembl(crate::config::DEFAULT_ENSEMBL_URL).unwrap()]);
        assert!(registry.get(ENSEMBL_ID).is_ok());
        match registry.get("nope") {
            Err(Error::UnknownBackend(id)) => assert_eq!(id, "nope"),
            other => panic!("expected UnknownBackend, got {other:?}"),
        }
    }

    #[test]
    fn test_google_capabilities() {
        let google = Backend::google("KEY").unwrap();
        assert!(google.capabilities.partial_response);
        assert!(google.capabilities.name_filter);
        assert_eq!(google.datasets.len(), 5);
        assert!(google.url_template.render("p", "q").contains("key=KEY&q"));
    }

    #[test]
    fn test_summary_hides_url_template() {
        let registry = BackendRegistry::new(vec![Backend::google("SECRET").unwrap()]);
        let json = registry.summary_json().unwrap();
        assert!(!json.contains("SECRET"));
        assert!(json.contains("Platinum Genomes"));
        assert!(json.contains("partialResponse"));
    }

    #[test]
    fn test_read_api_key_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  abc123  ").unwrap();
        writeln!(file, "ignored").unwrap();
        assert_eq!(read_api_key(file.path()).unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn test_read_api_key_missing_or_blank() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_api_key(&dir.path().join("absent.txt")).unwrap(), None);

        let blank = dir.path().join("blank.txt");
        std::fs::write(&blank, "\n").unwrap();
        assert_eq!(read_api_key(&blank).unwrap(), None);
    }

    #[test]
    fn test_from_config_enables_google_with_key() {
        let dir = tempfile::tempdir().unwrap();
        let key_file = dir.path().join("key.txt");

        let config = Config::parse_from([
            "genoproxy",
            "--api-key-file",
            key_file.to_str().unwrap(),
        ]);
        let registry = BackendRegistry::from_config(&config).unwrap();
        assert_eq!(registry.backends().len(), 1);
        assert!(registry.get(GOOGLE_ID).is_err());

        std::fs::write(&key_file, "my-key\n").unwrap();
        let registry = BackendRegistry::from_config(&config).unwrap();
        assert_eq!(registry.backends().len(), 2);
        assert!(registry.get(GOOGLE_ID).is_ok());
    }
}
