use crate::core::action::ActionOutcome;
use crate::core::selectors;
use crate::core::store::{AppState, Store};
use crate::domain::model::{DeleteTarget, Employee, EmployeePatch, EntityId};
use crate::utils::error::{AdminError, Result};
use crate::view::selection::Selection;
use crate::view::text_field::{FieldEdit, TextField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: EntityId,
    pub company_id: EntityId,
    pub company_name: Option<String>,
    pub first_name: TextField,
    pub last_name: TextField,
    pub position: TextField,
    pub selected: bool,
}

/// Employees of the companies checked in the companies table, or everyone
/// while no company is checked.
#[derive(Debug, Default)]
pub struct EmployeesTable {
    selection: Selection,
    scope: Vec<EntityId>,
}

impl EmployeesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection_listener(listener: impl FnMut(&[EntityId]) + Send + 'static) -> Self {
        Self {
            selection: Selection::with_listener(listener),
            scope: Vec::new(),
        }
    }

    /// Restrict rows to these companies. Selected employees outside the new
    /// scope are unselected.
    pub fn set_company_scope(&mut self, state: &AppState, company_ids: &[EntityId]) {
        self.scope = company_ids.to_vec();
        self.sync(state);
    }

    /// Checked ids still among the visible rows.
    pub fn selected(&self, state: &AppState) -> Vec<EntityId> {
        let visible = self.visible_ids(state);
        self.selection
            .ids()
            .iter()
            .copied()
            .filter(|id| visible.contains(id))
            .collect()
    }

    pub fn visible<'a>(&self, state: &'a AppState) -> Vec<&'a Employee> {
        if self.scope.is_empty() {
            selectors::employees(state).iter().collect()
        } else {
            selectors::employees_of(state, &self.scope)
        }
    }

    pub fn rows(&self, state: &AppState) -> Vec<EmployeeRow> {
        self.visible(state)
            .into_iter()
            .map(|e| EmployeeRow {
                id: e.id,
                company_id: e.company_id,
                company_name: state.company.get(e.company_id).map(|c| c.name.clone()),
                first_name: TextField::new(e.id, "firstName", &e.first_name),
                last_name: TextField::new(e.id, "lastName", &e.last_name),
                position: TextField::new(e.id, "position", &e.position),
                selected: self.selection.contains(e.id),
            })
            .collect()
    }

    fn visible_ids(&self, state: &AppState) -> Vec<EntityId> {
        self.visible(state).iter().map(|e| e.id).collect()
    }

    pub fn header_checked(&self, state: &AppState) -> bool {
        self.selection.all_selected(&self.visible_ids(state))
    }

    pub fn sync(&mut self, state: &AppState) {
        let visible = self.visible_ids(state);
        self.selection.retain_existing(|id| visible.contains(&id));
    }

    pub fn select(&mut self, state: &AppState, id: EntityId, checked: bool) {
        if checked && !self.visible(state).iter().any(|e| e.id == id) {
            return;
        }
        self.selection.toggle(id, checked);
    }

    pub fn select_all(&mut self, state: &AppState, checked: bool) {
        let visible = self.visible_ids(state);
        self.selection.select_all(&visible, checked);
    }

    pub fn patch_for(&self, edit: &FieldEdit) -> Result<EmployeePatch> {
        let mut patch = EmployeePatch::new(edit.id);
        let value = Some(edit.value.clone());
        match edit.field.as_str() {
            "firstName" => patch.first_name = value,
            "lastName" => patch.last_name = value,
            "position" => patch.position = value,
            other => {
                return Err(AdminError::validation(format!(
                    "Employee has no editable field '{}'",
                    other
                )))
            }
        }
        Ok(patch)
    }

    pub async fn commit_edit(&self, store: &Store, edit: &FieldEdit) -> ActionOutcome {
        match self.patch_for(edit) {
            Ok(patch) => store.employees().update(patch).await,
            Err(error) => ActionOutcome::Rejected {
                message: error.user_friendly_message(),
            },
        }
    }

    pub async fn delete_selected(&mut self, store: &Store) -> ActionOutcome {
        let state = store.snapshot();
        self.sync(&state);
        let target = match self.selected(&state).as_slice() {
            [] => {
                return ActionOutcome::Rejected {
                    message: "Nothing selected to delete".to_string(),
                }
            }
            [single] => DeleteTarget::One(*single),
            many => DeleteTarget::Many(many.to_vec()),
        };
        let outcome = store.employees().delete(target).await;
        self.sync(&store.snapshot());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slice::SliceState;
    use crate::domain::model::Company;

    fn state() -> AppState {
        let employee = |id, company_id| Employee {
            id,
            company_id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            position: "Clerk".to_string(),
        };
        AppState {
            company: SliceState::with_entities(vec![Company {
                id: 1,
                name: "Acme".to_string(),
                address: String::new(),
            }]),
            employee: SliceState::with_entities(vec![
                employee(1, 1),
                employee(2, 2),
                employee(3, 1),
            ]),
        }
    }

    #[test]
    fn test_scope_limits_rows() {
        let state = state();
        let mut table = EmployeesTable::new();
        assert_eq!(table.rows(&state).len(), 3);

        table.set_company_scope(&state, &[1]);
        let rows = table.rows(&state);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(rows[0].company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_narrowing_scope_unselects_hidden_rows() {
        let state = state();
        let mut table = EmployeesTable::new();
        table.select_all(&state, true);
        assert_eq!(table.selected(&state), vec![1, 2, 3]);

        table.set_company_scope(&state, &[1]);
        assert_eq!(table.selected(&state), vec![1, 3]);
        assert!(table.header_checked(&state));
    }

    #[test]
    fn test_patch_for_each_field() {
        let table = EmployeesTable::new();
        let mut rows = table.rows(&state());
        let patch = table.patch_for(&rows[1].position.change("Manager")).unwrap();
        assert_eq!(patch.id, 2);
        assert_eq!(patch.position.as_deref(), Some("Manager"));
        assert_eq!(patch.first_name, None);

        let patch = table.patch_for(&rows[0].last_name.change("Smith")).unwrap();
        assert_eq!(patch.last_name.as_deref(), Some("Smith"));
    }
}
