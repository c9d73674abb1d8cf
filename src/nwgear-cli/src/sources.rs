//! Where build documents and prices come from
//!
//! Build pages are rendered by an external service that loads the page in a
//! browser, waits for the item cards and returns the DOM as a JSON node tree.
//! Saved trees on disk work the same way without the service.

use anyhow::{bail, Context, Result};
use nwgear::{FetchConfig, Node, PriceError, PriceSource, PriceTable};
use std::collections::HashMap;
use std::path::Path;

/// Anything that can turn a build location into a document tree
pub trait DocumentSource {
    fn load(&self, location: &str) -> Result<Node>;
}

/// Reads saved JSON trees from disk
pub struct FileDocumentSource;

impl DocumentSource for FileDocumentSource {
    fn load(&self, location: &str) -> Result<Node> {
        let path = Path::new(location);
        Node::from_file(path).with_context(|| format!("Failed to load build {}", path.display()))
    }
}

/// Fetches build pages through the render service
pub struct HttpDocumentSource {
    render_url: String,
    wait_for_selector: String,
    timeout_ms: u64,
    agent: ureq::Agent,
}

impl HttpDocumentSource {
    pub fn new(render_url: &str, fetch: &FetchConfig) -> Self {
        HttpDocumentSource {
            render_url: render_url.trim_end_matches('/').to_string(),
            wait_for_selector: fetch.wait_for_selector.clone(),
            timeout_ms: fetch.timeout_ms,
            agent: ureq::AgentBuilder::new().timeout(fetch.timeout()).build(),
        }
    }

    pub fn request_url(&self, build_url: &str) -> String {
        format!(
            "{}?url={}&waitFor={}&timeout={}",
            self.render_url,
            urlencoding::encode(build_url),
            urlencoding::encode(&self.wait_for_selector),
            self.timeout_ms
        )
    }
}

impl DocumentSource for HttpDocumentSource {
    fn load(&self, location: &str) -> Result<Node> {
        let url = self.request_url(location);
        tracing::debug!("Rendering {}", location);

        match self.agent.get(&url).call() {
            Ok(resp) => resp
                .into_json::<Node>()
                .with_context(|| format!("Render service returned invalid JSON for {}", location)),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                bail!("Render service returned {} for {}: {}", code, location, body);
            }
            Err(e) => bail!("Render request for {} failed: {}", location, e),
        }
    }
}

pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Sends URLs to the render service and everything else to disk
pub struct Documents {
    http: Option<HttpDocumentSource>,
}

impl Documents {
    pub fn new(render_url: Option<&str>, fetch: &FetchConfig) -> Self {
        Documents {
            http: render_url.map(|url| HttpDocumentSource::new(url, fetch)),
        }
    }
}

impl DocumentSource for Documents {
    fn load(&self, location: &str) -> Result<Node> {
        if !is_url(location) {
            return FileDocumentSource.load(location);
        }
        match &self.http {
            Some(http) => http.load(location),
            None => bail!(
                "{} is a URL but no render service is configured (use --render-url or `nwgear configure --render-url`)",
                location
            ),
        }
    }
}

/// Price service returning a flat `{ "name": price }` map per server
pub struct HttpPriceSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpPriceSource {
    pub fn new(base_url: &str, fetch: &FetchConfig) -> Self {
        HttpPriceSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(fetch.timeout()).build(),
        }
    }

    pub fn server_url(&self, server: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(server))
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch(&self, server: &str) -> Result<PriceTable, PriceError> {
        let resp = self
            .agent
            .get(&self.server_url(server))
            .call()
            .map_err(|e| PriceError::Fetch(e.to_string()))?;
        let prices: HashMap<String, f64> = resp
            .into_json()
            .map_err(|e| PriceError::Fetch(e.to_string()))?;
        Ok(prices.into_iter().collect())
    }
}
