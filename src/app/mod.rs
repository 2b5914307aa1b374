// Wiring: turn a resolved configuration into a ready store.

use crate::adapters::{http, HttpService, InMemoryService, MockDataset};
use crate::config::AppConfig;
use crate::core::store::{Services, Store};
use crate::domain::model::{Company, Employee};
use crate::utils::error::Result;
use std::sync::Arc;

pub fn load_mock_dataset(config: &AppConfig) -> Result<MockDataset> {
    MockDataset::load(
        config.mock.companies_file.as_deref(),
        config.mock.employees_file.as_deref(),
    )
}

pub fn http_services(config: &AppConfig) -> Result<Services> {
    let client = http::build_client(config.timeout())?;
    let base_url = &config.service.base_url;
    Ok(Services {
        companies: Arc::new(HttpService::<Company>::new(
            client.clone(),
            base_url,
            &config.service.companies_path,
        )),
        employees: Arc::new(HttpService::<Employee>::new(
            client,
            base_url,
            &config.service.employees_path,
        )),
    })
}

/// In-process services seeded from the mock dataset.
pub fn offline_services(mock: &MockDataset) -> Services {
    Services {
        companies: Arc::new(InMemoryService::new(mock.companies.clone())),
        employees: Arc::new(InMemoryService::new(mock.employees.clone())),
    }
}

pub fn build_store(config: &AppConfig, offline: bool) -> Result<Store> {
    let mock = load_mock_dataset(config)?;
    let services = if offline {
        tracing::info!("Offline: using the local mock dataset as the service");
        offline_services(&mock)
    } else {
        tracing::info!("Service: {} ({} mode)", config.service.base_url, config.sync.mode);
        http_services(config)?
    };
    Ok(Store::new(services, config.sync, mock))
}
