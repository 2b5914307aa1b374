pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::cli::{CliArgs, Command};

pub use config::AppConfig;
pub use crate::core::{ActionOutcome, AppState, IdPolicy, Mode, Services, Store, SyncPolicy};
pub use domain::model::{
    Company, CompanyPatch, DeleteTarget, Employee, EmployeePatch, NewCompany, NewEmployee,
};
pub use utils::error::{AdminError, Result};
