// API client module: a small blocking HTTP client that talks to the
// remote car store. The store speaks plain JSON over REST-ish routes
// (`/cars`, `/cars/{id}`) and owns every record; this side only sends
// fully assembled records and never caches anything.

use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a car. Uniqueness is enforced by the store, not here.
pub type CarId = u64;

/// A single vintage car as stored remotely. Field names mirror the
/// store's JSON documents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarRecord {
    pub id: CarId,
    pub brand: String,
    pub model: String,
    pub production_year: u16,
    pub convertible: bool,
}

/// Failure of a remote call.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status} - {body}")]
    Status { status: StatusCode, body: String },
}

/// Outcome of a read-only existence check.
///
/// `Unreachable` and `Absent` are kept apart so callers can tell a dead
/// server from a missing record; `is_found` gives the plain yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Found,
    Absent(StatusCode),
    Unreachable,
}

impl Probe {
    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found)
    }
}

/// Operations the remote store offers. `ApiClient` is the real thing;
/// tests swap in an in-memory double.
pub trait CarStore {
    /// GET the store root (`None`) or a single record (`Some(id)`).
    fn probe(&self, id: Option<CarId>) -> Probe;

    fn list(&self) -> Result<Vec<CarRecord>, StoreError>;

    fn create(&self, car: &CarRecord) -> Result<(), StoreError>;

    /// Full overwrite of the record keyed by `car.id`.
    fn replace(&self, car: &CarRecord) -> Result<(), StoreError>;

    fn delete(&self, id: CarId) -> Result<(), StoreError>;
}

/// Blocking client bound to one store endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            config: config.clone(),
        })
    }
}

/// Turn a non-2xx response into `StoreError::Status`, keeping the body
/// text for the operator.
fn check(res: Response) -> Result<Response, StoreError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status();
    let body = res.text().unwrap_or_default();
    log::warn!("store answered {}: {}", status, body);
    Err(StoreError::Status { status, body })
}

impl CarStore for ApiClient {
    fn probe(&self, id: Option<CarId>) -> Probe {
        let url = match id {
            None => self.config.base_url().to_string(),
            Some(id) => self.config.car_url(id),
        };
        log::debug!("probing {}", url);
        match self.client.get(&url).send() {
            Ok(res) if res.status().is_success() => Probe::Found,
            Ok(res) => {
                log::info!("probe of {} answered {}", url, res.status());
                Probe::Absent(res.status())
            }
            Err(e) => {
                log::warn!("probe of {} failed: {}", url, e);
                Probe::Unreachable
            }
        }
    }

    fn list(&self) -> Result<Vec<CarRecord>, StoreError> {
        let url = self.config.cars_url();
        log::debug!("GET {}", url);
        let res = check(self.client.get(&url).send()?)?;
        Ok(res.json()?)
    }

    fn create(&self, car: &CarRecord) -> Result<(), StoreError> {
        let url = self.config.cars_url();
        log::debug!("POST {} id={}", url, car.id);
        check(self.client.post(&url).json(car).send()?)?;
        Ok(())
    }

    fn replace(&self, car: &CarRecord) -> Result<(), StoreError> {
        let url = self.config.car_url(car.id);
        log::debug!("PUT {}", url);
        check(self.client.put(&url).json(car).send()?)?;
        Ok(())
    }

    fn delete(&self, id: CarId) -> Result<(), StoreError> {
        let url = self.config.car_url(id);
        log::debug!("DELETE {}", url);
        check(self.client.delete(&url).send()?)?;
        Ok(())
    }
}
