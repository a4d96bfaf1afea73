// crates/globeway-core/src/sources/graphql.rs
//! Secondary directory: the public countries GraphQL endpoint.
//!
//! One POST returns every country; there is no pagination.

use super::http::{send_for_text, shared_client};
use super::CountrySource;
use crate::convert::{secondary_from_json, SECONDARY_PROVIDER};
use crate::error::Result;
use crate::model::CountryRecord;
use async_trait::async_trait;
use serde_json::json;

pub const COUNTRIES_QUERY: &str = "query Countries { countries { \
    code name native capital emoji currency \
    continent { code name } \
    languages { code name } \
    phone \
    states { name } \
} }";

#[derive(Clone)]
pub struct GraphQlCountries {
    client: reqwest::Client,
    url: String,
}

impl GraphQlCountries {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(shared_client(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CountrySource for GraphQlCountries {
    fn name(&self) -> &'static str {
        SECONDARY_PROVIDER
    }

    async fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        let request = self
            .client
            .post(&self.url)
            .json(&json!({ "query": COUNTRIES_QUERY }));
        let body = send_for_text(SECONDARY_PROVIDER, request).await?;
        secondary_from_json(&body)
    }
}
