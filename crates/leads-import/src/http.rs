//! HTTP implementations of the import collaborators.
//!
//! `HttpLeadStore` talks to a PostgREST-style relational endpoint;
//! `HttpVerificationClient` talks to the messaging-gateway API that
//! checks number reachability. Both are thin and blocking; the pipeline
//! is synchronous-sequential per batch.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use leads_model::LeadRecord;

use crate::error::{ImportError, Result};
use crate::traits::{ChannelInstance, LeadStore, NumberCheck, VerificationClient};

/// HTTP request timeout for collaborator calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Substring the gateway uses to signal that a tenant has no connected
/// instance. The gateway reports this through an error message rather
/// than a distinct status, so the client recognizes it and maps it to
/// `Ok(None)`.
const NO_INSTANCE_MARKER: &str = "instance not found";

/// Connection settings shared by both HTTP collaborators.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Service base URL, without a trailing slash.
    pub base_url: String,
    /// API key, sent as a bearer token.
    pub api_key: String,
}

/// Record store backed by a PostgREST-style endpoint.
pub struct HttpLeadStore {
    client: Client,
    config: HttpConfig,
}

impl HttpLeadStore {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ImportError::Store(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn leads_url(&self) -> String {
        format!("{}/rest/v1/leads", self.config.base_url)
    }
}

impl LeadStore for HttpLeadStore {
    fn insert_batch(&self, records: &[LeadRecord]) -> Result<usize> {
        debug!(rows = records.len(), "bulk inserting leads");
        let response = self
            .client
            .post(self.leads_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header("apikey", self.config.api_key.as_str())
            .header("Prefer", "return=representation")
            .json(records)
            .send()
            .map_err(|err| ImportError::Store(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ImportError::Store(format!("status {status}: {message}")));
        }

        let inserted: Vec<serde_json::Value> = response
            .json()
            .map_err(|err| ImportError::Store(err.to_string()))?;
        Ok(inserted.len())
    }
}

/// Verification client backed by the messaging-gateway HTTP API.
pub struct HttpVerificationClient {
    client: Client,
    config: HttpConfig,
}

#[derive(Deserialize)]
struct InstanceResponse {
    name: String,
    state: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    results: Vec<NumberCheck>,
}

impl HttpVerificationClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn instance_url(&self, scope_id: &str) -> String {
        format!("{}/instances/{scope_id}", self.config.base_url)
    }

    fn verify_url(&self, instance: &ChannelInstance) -> String {
        format!("{}/instances/{}/verify-numbers", self.config.base_url, instance.name)
    }
}

impl VerificationClient for HttpVerificationClient {
    fn connected_instance(&self, scope_id: &str) -> Result<Option<ChannelInstance>> {
        let response = self
            .client
            .get(self.instance_url(scope_id))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            if message.to_lowercase().contains(NO_INSTANCE_MARKER) {
                debug!(scope_id, "no channel instance for tenant");
                return Ok(None);
            }
            return Err(ImportError::Verification(format!("status {status}: {message}")));
        }

        let instance: InstanceResponse = response.json()?;
        if instance.state.eq_ignore_ascii_case("open")
            || instance.state.eq_ignore_ascii_case("connected")
        {
            Ok(Some(ChannelInstance { name: instance.name }))
        } else {
            debug!(scope_id, state = %instance.state, "channel instance not connected");
            Ok(None)
        }
    }

    fn check_numbers(&self, instance: &ChannelInstance, numbers: &[String]) -> Result<Vec<NumberCheck>> {
        debug!(count = numbers.len(), "verifying number chunk");
        let response = self
            .client
            .post(self.verify_url(instance))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&json!({ "numbers": numbers }))
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ImportError::Verification(format!("status {status}: {message}")));
        }

        let parsed: VerifyResponse = response.json()?;
        Ok(parsed.results)
    }
}
