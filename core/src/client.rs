//! Stateless HTTP request builder and response parser for the record store.
//!
//! # Design
//! `RecordClient` holds the table URL and the authorization header and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. A `Transport` executes the round-trip in between,
//! keeping this module deterministic and free of I/O.

use serde::Serialize;

use crate::config::{is_path_segment, StoreConfig};
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{GuestFields, GuestRecord};

/// Synchronous, stateless client for one table of the record store.
#[derive(Debug, Clone)]
pub struct RecordClient {
    table_url: String,
    authorization: String,
}

#[derive(Serialize)]
struct FieldsEnvelope<'a> {
    fields: &'a GuestFields,
}

impl RecordClient {
    /// Validates the config up front so a bad credential or identifier fails
    /// here rather than on the first request.
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            table_url: format!(
                "{}/v0/{}/{}",
                config.endpoint.trim_end_matches('/'),
                config.base_id,
                config.table_id
            ),
            authorization: format!("Bearer {}", config.api_key),
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    pub fn build_get_guest(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.record_url(id)?,
            headers: vec![self.auth_header()],
            body: None,
        })
    }

    /// The `id` column is stripped from the payload; the record is addressed
    /// by URL only.
    pub fn build_update_guest(&self, id: &str, fields: &GuestFields) -> Result<HttpRequest, ApiError> {
        let url = self.record_url(id)?;
        let fields = fields.clone().without_id();
        let body = serde_json::to_string(&FieldsEnvelope { fields: &fields })
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url,
            headers: vec![
                self.auth_header(),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn build_delete_guest(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.record_url(id)?,
            headers: vec![self.auth_header()],
            body: None,
        })
    }

    pub fn parse_get_guest(&self, response: HttpResponse) -> Result<GuestRecord, ApiError> {
        check_status(&response)?;
        parse_record(&response.body)
    }

    pub fn parse_update_guest(&self, response: HttpResponse) -> Result<GuestRecord, ApiError> {
        check_status(&response)?;
        parse_record(&response.body)
    }

    pub fn parse_delete_guest(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    fn record_url(&self, id: &str) -> Result<String, ApiError> {
        if !is_path_segment(id) {
            return Err(ApiError::InvalidRecordId(id.to_string()));
        }
        Ok(format!("{}/{id}", self.table_url))
    }

    fn auth_header(&self) -> (String, String) {
        ("authorization".to_string(), self.authorization.clone())
    }
}

fn parse_record(body: &str) -> Result<GuestRecord, ApiError> {
    let mut record: GuestRecord =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    record.fields = record.fields.without_id();
    Ok(record)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
