use crate::domain::model::EntityId;

/// A change coming out of an inline text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub id: EntityId,
    pub field: String,
    pub value: String,
}

/// Inline-editable cell bound to one field of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    id: EntityId,
    name: String,
    value: String,
}

impl TextField {
    pub fn new(id: EntityId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Update the displayed value and report the edit to the parent.
    pub fn change(&mut self, value: impl Into<String>) -> FieldEdit {
        self.value = value.into();
        FieldEdit {
            id: self.id,
            field: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_reports_id_field_and_value() {
        let mut field = TextField::new(3, "name", "Acme");
        let edit = field.change("Acme Ltd");
        assert_eq!(field.value(), "Acme Ltd");
        assert_eq!(
            edit,
            FieldEdit {
                id: 3,
                field: "name".to_string(),
                value: "Acme Ltd".to_string(),
            }
        );
    }
}
