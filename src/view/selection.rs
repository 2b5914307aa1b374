use crate::domain::model::EntityId;
use std::fmt;

pub type SelectionListener = Box<dyn FnMut(&[EntityId]) + Send>;

/// Checked rows of a table, in the order they were checked.
///
/// The owning table keeps this a subset of its current list; every change is
/// reported to the listener.
#[derive(Default)]
pub struct Selection {
    ids: Vec<EntityId>,
    listener: Option<SelectionListener>,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("ids", &self.ids)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: impl FnMut(&[EntityId]) + Send + 'static) -> Self {
        Self {
            ids: Vec::new(),
            listener: Some(Box::new(listener)),
        }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn toggle(&mut self, id: EntityId, checked: bool) {
        let changed = if checked {
            if self.contains(id) {
                false
            } else {
                self.ids.push(id);
                true
            }
        } else {
            let before = self.ids.len();
            self.ids.retain(|&selected| selected != id);
            self.ids.len() != before
        };
        if changed {
            self.notify();
        }
    }

    /// Header checkbox: select exactly `visible`, or nothing.
    pub fn select_all(&mut self, visible: &[EntityId], checked: bool) {
        self.ids = if checked { visible.to_vec() } else { Vec::new() };
        self.notify();
    }

    pub fn all_selected(&self, visible: &[EntityId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.contains(*id))
    }

    /// Drop ids for which `exists` is false.
    pub fn retain_existing(&mut self, exists: impl Fn(EntityId) -> bool) {
        let before = self.ids.len();
        self.ids.retain(|&id| exists(id));
        if self.ids.len() != before {
            self.notify();
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.ids);
        }
    }
}
