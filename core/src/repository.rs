//! Guest lookups, RSVP updates, and invite deletion against the record store.
//!
//! # Design
//! `GuestRepository` pairs a `RecordClient` with a `Transport` and a
//! `RetryPolicy`. Each operation issues one logical request: build, execute
//! with bounded retries, parse. Nothing is cached; every read goes to the
//! store. Errors are always propagated to the caller, who decides whether to
//! log, map, or surface them.

use std::thread;

use crate::client::RecordClient;
use crate::config::StoreConfig;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpRequest, HttpResponse};
use crate::retry::{is_retryable_status, RetryPolicy};
use crate::transport::{Transport, UreqTransport};
use crate::types::GuestFields;

pub struct GuestRepository<T = UreqTransport> {
    client: RecordClient,
    transport: T,
    retry: RetryPolicy,
}

impl GuestRepository<UreqTransport> {
    /// Repository over HTTPS with the default 3-second timeout and 3 retries.
    pub fn connect(config: StoreConfig) -> Result<Self, ConfigError> {
        Self::with_transport(config, UreqTransport::default())
    }
}

impl<T: Transport> GuestRepository<T> {
    pub fn with_transport(config: StoreConfig, transport: T) -> Result<Self, ConfigError> {
        Ok(Self {
            client: RecordClient::new(&config)?,
            transport,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the field mapping of one guest. A missing record is
    /// `ApiError::NotFound`, never an empty success.
    pub fn get_guest(&self, id: &str) -> Result<GuestFields, ApiError> {
        let request = self.client.build_get_guest(id)?;
        let response = self.send(&request)?;
        let record = self.client.parse_get_guest(response)?;
        tracing::debug!(record = %record.id, "fetched guest");
        Ok(record.fields)
    }

    /// Merge `fields` into the stored record. Only fields that are set are
    /// sent; the store keeps everything else as it was.
    pub fn update_guest(&self, id: &str, fields: &GuestFields) -> Result<(), ApiError> {
        let request = self.client.build_update_guest(id, fields)?;
        let response = self.send(&request)?;
        let record = self.client.parse_update_guest(response)?;
        tracing::debug!(record = %record.id, "updated guest");
        Ok(())
    }

    /// Permanently remove the guest's record.
    pub fn delete_guest(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_guest(id)?;
        let response = self.send(&request)?;
        self.client.parse_delete_guest(response)?;
        tracing::debug!(record = %id, "deleted guest");
        Ok(())
    }

    /// Execute `request`, retrying transport failures and retryable statuses.
    ///
    /// When the last attempt still gets a retryable status, that response is
    /// returned so the parser reports it as `ApiError::Http`.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let attempts = self.retry.max_attempts();
        let mut attempt = 1;
        loop {
            tracing::debug!(method = request.method.as_str(), url = %request.url, attempt, "store request");
            let outcome = self.transport.execute(request);
            let last = attempt >= attempts;
            match outcome {
                Ok(response) if last || !is_retryable_status(response.status) => return Ok(response),
                Ok(response) => {
                    tracing::warn!(
                        method = request.method.as_str(),
                        status = response.status,
                        attempt,
                        "retryable status from record store"
                    );
                }
                Err(e) if last => {
                    tracing::warn!(method = request.method.as_str(), error = %e, attempts, "giving up on record store");
                    return Err(ApiError::Transport(e.0));
                }
                Err(e) => {
                    tracing::warn!(method = request.method.as_str(), error = %e, attempt, "record store transport error");
                }
            }
            if !self.retry.delay.is_zero() {
                thread::sleep(self.retry.delay);
            }
            attempt += 1;
        }
    }
}
