// crates/globeway-core/src/sources/rest.rs
//! Primary directory: restcountries v3.1.

use super::http::{join_url, send_for_text, shared_client};
use super::{CountrySource, NameQuery, NameSearch};
use crate::convert::{attach_primary_extras, primary_from_json, PRIMARY_PROVIDER};
use crate::error::{GlobeError, Result};
use crate::model::CountryRecord;
use async_trait::async_trait;
use tracing::{debug, warn};

/// `/all` accepts at most this many fields per request.
pub const MAX_CATALOG_FIELDS: usize = 10;

/// Core fields of the full catalog.
pub const CATALOG_FIELDS: &str =
    "name,cca2,cca3,flags,capital,region,subregion,population,languages,currencies";

/// The rest of a catalog row, fetched alongside and joined on `cca2`.
pub const CATALOG_EXTRA_FIELDS: &str = "cca2,flag,continents,area,timezones,tld,idd";

/// Fields requested by name searches; enough to build a usable record.
pub const SEARCH_FIELDS: &str =
    "name,cca2,cca3,flags,capital,region,subregion,population,area,languages,currencies,tld";

#[derive(Clone)]
pub struct RestCountries {
    client: reqwest::Client,
    base_url: String,
}

impl RestCountries {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(shared_client(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl RestCountries {
    async fn fetch_catalog(&self, fields: &str) -> Result<String> {
        let mut url = join_url(&self.base_url, &["all"])?;
        url.query_pairs_mut().append_pair("fields", fields);
        send_for_text(PRIMARY_PROVIDER, self.client.get(url)).await
    }
}

#[async_trait]
impl CountrySource for RestCountries {
    fn name(&self) -> &'static str {
        PRIMARY_PROVIDER
    }

    async fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        let (core, extras) = tokio::join!(
            self.fetch_catalog(CATALOG_FIELDS),
            self.fetch_catalog(CATALOG_EXTRA_FIELDS),
        );
        let mut records = primary_from_json(&core?)?;
        // Without the extras the core rows are still a usable catalog.
        match extras.and_then(|body| attach_primary_extras(&mut records, &body)) {
            Ok(completed) => debug!(completed, "catalog extras attached"),
            Err(e) => warn!(error = %e, "catalog extras unavailable"),
        }
        Ok(records)
    }
}

#[async_trait]
impl NameSearch for RestCountries {
    async fn search_by_name(&self, term: &str, query: NameQuery) -> Result<Vec<CountryRecord>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = join_url(&self.base_url, &["name", term])?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("fields", SEARCH_FIELDS);
            if query == NameQuery::Exact {
                q.append_pair("fullText", "true");
            }
        }
        match send_for_text(PRIMARY_PROVIDER, self.client.get(url)).await {
            Ok(body) => primary_from_json(&body),
            // The directory answers "no match" with 404.
            Err(GlobeError::Status { status: 404, .. }) => {
                debug!(term, "no country matched");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
