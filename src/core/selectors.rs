//! Read-only views over [`AppState`].

use crate::core::store::AppState;
use crate::domain::model::{Company, Employee, EntityId};
use std::collections::{HashMap, HashSet};

pub fn companies(state: &AppState) -> &[Company] {
    &state.company.entities
}

pub fn employees(state: &AppState) -> &[Employee] {
    &state.employee.entities
}

pub fn company_loading(state: &AppState) -> bool {
    state.company.is_loading
}

pub fn employee_loading(state: &AppState) -> bool {
    state.employee.is_loading
}

pub fn is_loading(state: &AppState) -> bool {
    company_loading(state) || employee_loading(state)
}

/// First recorded error across slices.
pub fn error(state: &AppState) -> Option<&str> {
    state
        .company
        .error
        .as_deref()
        .or(state.employee.error.as_deref())
}

/// Employees per company id. Companies without employees are absent.
pub fn employee_counts(state: &AppState) -> HashMap<EntityId, usize> {
    let mut counts = HashMap::new();
    for employee in employees(state) {
        *counts.entry(employee.company_id).or_insert(0) += 1;
    }
    counts
}

pub fn employee_count(state: &AppState, company_id: EntityId) -> usize {
    employees(state)
        .iter()
        .filter(|e| e.company_id == company_id)
        .count()
}

/// Employees of the given companies, in list order.
pub fn employees_of<'a>(state: &'a AppState, company_ids: &[EntityId]) -> Vec<&'a Employee> {
    let wanted: HashSet<EntityId> = company_ids.iter().copied().collect();
    employees(state)
        .iter()
        .filter(|e| wanted.contains(&e.company_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slice::SliceState;

    fn employee(id: EntityId, company_id: EntityId) -> Employee {
        Employee {
            id,
            company_id,
            first_name: format!("E{}", id),
            last_name: String::new(),
            position: String::new(),
        }
    }

    fn state() -> AppState {
        AppState {
            company: SliceState::with_entities(vec![
                Company {
                    id: 1,
                    name: "A".to_string(),
                    address: String::new(),
                },
                Company {
                    id: 2,
                    name: "B".to_string(),
                    address: String::new(),
                },
            ]),
            employee: SliceState::with_entities(vec![
                employee(1, 1),
                employee(2, 1),
                employee(3, 2),
                employee(4, 7),
            ]),
        }
    }

    #[test]
    fn test_employee_counts() {
        let state = state();
        let counts = employee_counts(&state);
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(employee_count(&state, 3), 0);
    }

    #[test]
    fn test_employees_of_selected_companies() {
        let state = state();
        let ids: Vec<_> = employees_of(&state, &[1]).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_error_prefers_company_slice() {
        let mut state = state();
        assert_eq!(error(&state), None);
        state.employee.error = Some("employees down".to_string());
        assert_eq!(error(&state), Some("employees down"));
        state.company.error = Some("companies down".to_string());
        assert_eq!(error(&state), Some("companies down"));
    }
}
