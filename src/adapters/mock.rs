use crate::domain::model::{Company, Employee};
use crate::utils::error::{AdminError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

const BUNDLED_COMPANIES: &str = include_str!("../../data/companies.json");
const BUNDLED_EMPLOYEES: &str = include_str!("../../data/employees.json");

/// Local lists substituted for list results when a development-mode
/// request fails, and used to seed the offline service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockDataset {
    pub companies: Vec<Company>,
    pub employees: Vec<Employee>,
}

impl MockDataset {
    /// The dataset compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            companies: parse_list("bundled companies", BUNDLED_COMPANIES)?,
            employees: parse_list("bundled employees", BUNDLED_EMPLOYEES)?,
        })
    }

    /// Bundled data with either list replaced from a JSON file.
    pub fn load(
        companies_file: Option<&Path>,
        employees_file: Option<&Path>,
    ) -> Result<Self> {
        let mut dataset = Self::bundled()?;
        if let Some(path) = companies_file {
            dataset.companies = read_list(path)?;
        }
        if let Some(path) = employees_file {
            dataset.employees = read_list(path)?;
        }
        tracing::debug!(
            "Mock dataset: {} companies, {} employees",
            dataset.companies.len(),
            dataset.employees.len()
        );
        Ok(dataset)
    }
}

fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)?;
    parse_list(&path.display().to_string(), &content)
}

fn parse_list<T: DeserializeOwned>(source: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| AdminError::ConfigError {
        message: format!("Mock data in {} is not a valid list: {}", source, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bundled_dataset_parses_with_unique_ids() {
        let dataset = MockDataset::bundled().unwrap();
        assert!(!dataset.companies.is_empty());
        let ids: HashSet<_> = dataset.companies.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), dataset.companies.len());

        // every employee points at a bundled company
        assert!(dataset
            .employees
            .iter()
            .all(|e| ids.contains(&e.company_id)));
    }

    #[test]
    fn test_companies_override_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"id": 9, "name": "Local Only", "address": "-"}]"#)
            .unwrap();

        let dataset = MockDataset::load(Some(file.path()), None).unwrap();
        assert_eq!(dataset.companies.len(), 1);
        assert_eq!(dataset.companies[0].name, "Local Only");
        assert!(!dataset.employees.is_empty());
    }

    #[test]
    fn test_malformed_override_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let err = MockDataset::load(None, Some(file.path())).unwrap_err();
        assert!(matches!(err, AdminError::ConfigError { .. }));
    }
}
