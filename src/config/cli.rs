use crate::config::AppConfig;
use crate::core::policy::{IdPolicy, Mode};
use crate::domain::model::EntityId;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "company-admin")]
#[command(about = "Manage companies and employees against a remote service")]
pub struct CliArgs {
    #[arg(long, short, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override service.base_url")]
    pub base_url: Option<String>,

    #[arg(long, value_enum, help = "Override sync.mode")]
    pub mode: Option<Mode>,

    #[arg(long, value_enum, help = "Override sync.id_policy")]
    pub id_policy: Option<IdPolicy>,

    #[arg(long, help = "Work against the local mock dataset instead of the service")]
    pub offline: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List companies with their employee counts
    Companies {
        #[arg(long)]
        filter: Option<String>,
    },
    /// List employees, optionally only those of the given companies
    Employees {
        #[arg(long = "company")]
        companies: Vec<EntityId>,
    },
    AddCompany {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    RenameCompany {
        #[arg(long)]
        id: EntityId,
        #[arg(long)]
        name: String,
    },
    DeleteCompanies {
        #[arg(required = true)]
        ids: Vec<EntityId>,
    },
    AddEmployee {
        #[arg(long)]
        company: EntityId,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        position: String,
    },
    DeleteEmployees {
        #[arg(required = true)]
        ids: Vec<EntityId>,
    },
}

impl CliArgs {
    /// File config (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.service.base_url = base_url.clone();
        }
        if let Some(mode) = self.mode {
            config.sync.mode = mode;
        }
        if let Some(id_policy) = self.id_policy {
            config.sync.id_policy = id_policy;
        }

        config.validate()?;
        Ok(config)
    }
}
