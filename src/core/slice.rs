use crate::core::action::SliceAction;
use crate::core::policy::IdPolicy;
use crate::domain::model::{Created, Entity, EntityId, EntityPatch};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// One entity type's portion of application state.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceState<T> {
    pub entities: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
    high_water: EntityId,
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            is_loading: false,
            error: None,
            last_synced_at: None,
            high_water: 0,
        }
    }
}

impl<T: Entity> SliceState<T> {
    pub fn with_entities(entities: Vec<T>) -> Self {
        let mut state = Self::default();
        state.replace(entities);
        state
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> EntityId {
        self.entities.iter().map(Entity::id).max().unwrap_or(0)
    }

    /// Id the next locally created entity would receive.
    pub fn next_id(&self, policy: IdPolicy) -> EntityId {
        match policy {
            IdPolicy::LastPlusOne => self.entities.last().map_or(1, |last| last.id() + 1),
            IdPolicy::Monotonic => self.high_water.max(self.max_id()) + 1,
        }
    }

    /// Id for a locally numbered entity. Collisions with an existing id move
    /// past the highest id ever held.
    fn local_id(&self, policy: IdPolicy) -> EntityId {
        let candidate = self.next_id(policy);
        if self.contains(candidate) {
            let resolved = self.high_water.max(self.max_id()) + 1;
            tracing::warn!(
                "{} id {} already taken, assigning {} instead",
                T::KIND,
                candidate,
                resolved
            );
            resolved
        } else {
            candidate
        }
    }

    fn insert_created(&mut self, created: Created<T::Draft>, policy: IdPolicy) {
        match created.id.filter(|id| *id > 0) {
            // the server owns its ids; a stale local row with the same id is replaced
            Some(id) => {
                let entity = T::from_draft(id, created.fields);
                match self.entities.iter_mut().find(|e| e.id() == id) {
                    Some(existing) => {
                        tracing::warn!("{} {} already listed, replacing it", T::KIND, id);
                        *existing = entity;
                    }
                    None => self.entities.push(entity),
                }
                self.high_water = self.high_water.max(id);
            }
            None => {
                let id = self.local_id(policy);
                self.entities.push(T::from_draft(id, created.fields));
                self.high_water = self.high_water.max(id);
            }
        }
    }

    fn replace(&mut self, entities: Vec<T>) {
        self.entities = entities;
        self.high_water = self.high_water.max(self.max_id());
    }

    pub fn reduce(&mut self, action: SliceAction<T>, policy: IdPolicy) {
        match action {
            SliceAction::Pending(_) => {
                self.is_loading = true;
                self.error = None;
                return;
            }
            SliceAction::Rejected(_, message) => {
                self.is_loading = false;
                self.error = Some(message);
                return;
            }
            SliceAction::Settled(_) => {}
            SliceAction::Listed(entities) => self.replace(entities),
            SliceAction::Added(created) => self.insert_created(created, policy),
            SliceAction::Updated(patch) => {
                let target = patch.target();
                match self.entities.iter_mut().find(|e| e.id() == target) {
                    Some(entity) => entity.apply_patch(&patch),
                    None => tracing::debug!("{} {} not in list, update ignored", T::KIND, target),
                }
            }
            SliceAction::Deleted(ids) => {
                let ids: HashSet<EntityId> = ids.into_iter().collect();
                self.entities.retain(|e| !ids.contains(&e.id()));
            }
        }
        self.is_loading = false;
        self.last_synced_at = Some(Utc::now());
    }
}
