use crate::core::action::ActionOutcome;
use crate::core::selectors;
use crate::core::store::{AppState, Store};
use crate::domain::model::{Company, CompanyPatch, DeleteTarget, EntityId};
use crate::utils::error::{AdminError, Result};
use crate::view::selection::Selection;
use crate::view::text_field::{FieldEdit, TextField};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Address,
}

impl CompanyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Address => "address",
        }
    }
}

impl FromStr for CompanyField {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(CompanyField::Name),
            "address" => Ok(CompanyField::Address),
            other => Err(AdminError::validation(format!(
                "Company has no editable field '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRow {
    pub id: EntityId,
    pub name: TextField,
    pub address: String,
    pub employee_count: usize,
    pub selected: bool,
}

/// Companies with their derived employee counts, row checkboxes and an
/// editable name cell.
#[derive(Debug, Default)]
pub struct CompaniesTable {
    selection: Selection,
    filter: Option<String>,
}

impl CompaniesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `listener` receives the selected ids after every selection change.
    pub fn with_selection_listener(listener: impl FnMut(&[EntityId]) + Send + 'static) -> Self {
        Self {
            selection: Selection::with_listener(listener),
            filter: None,
        }
    }

    /// Case-insensitive name filter; `None` or blank shows every company.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());
    }

    /// Checked ids still present in `state`, in the order they were checked.
    pub fn selected(&self, state: &AppState) -> Vec<EntityId> {
        self.selection
            .ids()
            .iter()
            .copied()
            .filter(|id| state.company.contains(*id))
            .collect()
    }

    pub fn selected_companies(&self, state: &AppState) -> Vec<Company> {
        selectors::companies(state)
            .iter()
            .filter(|c| self.selection.contains(c.id))
            .cloned()
            .collect()
    }

    pub fn visible<'a>(&self, state: &'a AppState) -> Vec<&'a Company> {
        selectors::companies(state)
            .iter()
            .filter(|c| match &self.filter {
                Some(needle) => c.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect()
    }

    fn visible_ids(&self, state: &AppState) -> Vec<EntityId> {
        self.visible(state).iter().map(|c| c.id).collect()
    }

    pub fn rows(&self, state: &AppState) -> Vec<CompanyRow> {
        let counts = selectors::employee_counts(state);
        self.visible(state)
            .into_iter()
            .map(|company| CompanyRow {
                id: company.id,
                name: TextField::new(company.id, CompanyField::Name.as_str(), &company.name),
                address: company.address.clone(),
                employee_count: counts.get(&company.id).copied().unwrap_or(0),
                selected: self.selection.contains(company.id),
            })
            .collect()
    }

    pub fn header_checked(&self, state: &AppState) -> bool {
        self.selection.all_selected(&self.visible_ids(state))
    }

    /// Drop checked ids that left the list and tell the listener.
    pub fn sync(&mut self, state: &AppState) {
        let company = &state.company;
        self.selection.retain_existing(|id| company.contains(id));
    }

    pub fn select(&mut self, state: &AppState, id: EntityId, checked: bool) {
        if checked && !state.company.contains(id) {
            tracing::debug!("company {} is not listed, selection ignored", id);
            return;
        }
        self.selection.toggle(id, checked);
    }

    pub fn select_all(&mut self, state: &AppState, checked: bool) {
        let visible = self.visible_ids(state);
        self.selection.select_all(&visible, checked);
    }

    pub fn patch_for(&self, edit: &FieldEdit) -> Result<CompanyPatch> {
        let patch = CompanyPatch::new(edit.id);
        Ok(match edit.field.parse::<CompanyField>()? {
            CompanyField::Name => patch.name(edit.value.clone()),
            CompanyField::Address => patch.address(edit.value.clone()),
        })
    }

    /// Dispatch the update a field edit asks for.
    pub async fn commit_edit(&self, store: &Store, edit: &FieldEdit) -> ActionOutcome {
        match self.patch_for(edit) {
            Ok(patch) => store.companies().update(patch).await,
            Err(error) => ActionOutcome::Rejected {
                message: error.user_friendly_message(),
            },
        }
    }

    /// Delete every selected company, then drop them from the selection.
    pub async fn delete_selected(&mut self, store: &Store) -> ActionOutcome {
        let state = store.snapshot();
        self.sync(&state);
        let companies = self.selected_companies(&state);
        if companies.is_empty() {
            return ActionOutcome::Rejected {
                message: "Nothing selected to delete".to_string(),
            };
        }
        let target = DeleteTarget::of(&companies);
        let outcome = store.companies().delete(target).await;
        self.sync(&store.snapshot());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slice::SliceState;
    use crate::domain::model::Employee;

    fn state() -> AppState {
        let company = |id, name: &str| Company {
            id,
            name: name.to_string(),
            address: format!("Street {}", id),
        };
        AppState {
            company: SliceState::with_entities(vec![
                company(1, "Acme"),
                company(2, "Globex"),
                company(3, "Acme Labs"),
            ]),
            employee: SliceState::with_entities(vec![Employee {
                id: 1,
                company_id: 3,
                first_name: "Ann".to_string(),
                last_name: String::new(),
                position: String::new(),
            }]),
        }
    }

    #[test]
    fn test_rows_carry_employee_counts() {
        let table = CompaniesTable::new();
        let rows = table.rows(&state());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].employee_count, 0);
        assert_eq!(rows[2].employee_count, 1);
        assert_eq!(rows[1].name.value(), "Globex");
    }

    #[test]
    fn test_select_all_respects_filter() {
        let state = state();
        let mut table = CompaniesTable::new();
        table.set_filter(Some(" acme ".to_string()));
        table.select_all(&state, true);
        assert_eq!(table.selected(&state), vec![1, 3]);
        assert!(table.header_checked(&state));

        table.select_all(&state, false);
        assert!(table.selected(&state).is_empty());
    }

    #[test]
    fn test_unknown_company_cannot_be_selected() {
        let state = state();
        let mut table = CompaniesTable::new();
        table.select(&state, 42, true);
        assert!(table.selected(&state).is_empty());
    }

    #[test]
    fn test_sync_prunes_deleted_companies() {
        let mut state = state();
        let mut table = CompaniesTable::new();
        table.select_all(&state, true);
        state.company.entities.retain(|c| c.id != 2);
        assert_eq!(table.selected(&state), vec![1, 3]);
        table.sync(&state);
        assert_eq!(table.selected(&state), vec![1, 3]);
    }

    #[test]
    fn test_patch_for_field_edit() {
        let table = CompaniesTable::new();
        let mut rows = table.rows(&state());
        let edit = rows[0].name.change("Acme Corp");
        assert_eq!(
            table.patch_for(&edit).unwrap(),
            CompanyPatch::new(1).name("Acme Corp")
        );

        let bad = FieldEdit {
            id: 1,
            field: "employees".to_string(),
            value: "3".to_string(),
        };
        assert!(table.patch_for(&bad).is_err());
    }
}
