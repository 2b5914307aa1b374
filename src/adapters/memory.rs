use crate::domain::model::{
    Created, DeleteTarget, DeletedIds, Entity, EntityId, EntityPatch, Envelope, IdRef,
};
use crate::domain::ports::ResourceService;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// A resource held in process memory. Backs `--offline` runs and lets tests
/// script failures and non-success statuses.
pub struct InMemoryService<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    records: Vec<T>,
    failure: Option<String>,
    status: Option<String>,
    calls: usize,
}

enum Reply {
    Proceed,
    Status(String),
}

impl<T: Entity> InMemoryService<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records,
                failure: None,
                status: None,
                calls: 0,
            }),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every following call fails with `message`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.inner.lock().await.failure = Some(message.into());
    }

    /// Every following call answers with `status` and no data.
    pub async fn respond_with_status(&self, status: impl Into<String>) {
        self.inner.lock().await.status = Some(status.into());
    }

    pub async fn recover(&self) {
        let mut inner = self.inner.lock().await;
        inner.failure = None;
        inner.status = None;
    }

    pub async fn records(&self) -> Vec<T> {
        self.inner.lock().await.records.clone()
    }

    pub async fn calls(&self) -> usize {
        self.inner.lock().await.calls
    }
}

impl<T> Inner<T> {
    fn begin(&mut self) -> Result<Reply> {
        self.calls += 1;
        if let Some(message) = &self.failure {
            return Err(AdminError::service(message.clone()));
        }
        Ok(match &self.status {
            Some(status) => Reply::Status(status.clone()),
            None => Reply::Proceed,
        })
    }
}

#[async_trait]
impl<T: Entity> ResourceService<T> for InMemoryService<T> {
    async fn get(&self) -> Result<Envelope<Vec<T>>> {
        let mut inner = self.inner.lock().await;
        match inner.begin()? {
            Reply::Status(status) => Ok(Envelope::with_status(status, None)),
            Reply::Proceed => Ok(Envelope::ok(inner.records.clone())),
        }
    }

    async fn post(&self, draft: &T::Draft) -> Result<Envelope<Created<T::Draft>>> {
        let mut inner = self.inner.lock().await;
        if let Reply::Status(status) = inner.begin()? {
            return Ok(Envelope::with_status(status, None));
        }

        let id = inner.records.iter().map(Entity::id).max().unwrap_or(0) + 1;
        inner.records.push(T::from_draft(id, draft.clone()));
        Ok(Envelope::ok(Created {
            id: Some(id),
            fields: draft.clone(),
        }))
    }

    async fn patch(&self, patch: &T::Patch) -> Result<Envelope<T::Patch>> {
        let mut inner = self.inner.lock().await;
        if let Reply::Status(status) = inner.begin()? {
            return Ok(Envelope::with_status(status, None));
        }

        match inner.records.iter_mut().find(|r| r.id() == patch.target()) {
            Some(record) => {
                record.apply_patch(patch);
                Ok(Envelope::ok(patch.clone()))
            }
            None => Ok(Envelope::with_status("404", None)),
        }
    }

    async fn delete(&self, target: &DeleteTarget) -> Result<Envelope<DeletedIds>> {
        let mut inner = self.inner.lock().await;
        if let Reply::Status(status) = inner.begin()? {
            return Ok(Envelope::with_status(status, None));
        }

        let requested = target.ids();
        let removed: Vec<EntityId> = inner
            .records
            .iter()
            .map(Entity::id)
            .filter(|id| requested.contains(id))
            .collect();
        inner.records.retain(|r| !removed.contains(&r.id()));

        let data = match target {
            DeleteTarget::One(_) => match removed.first() {
                Some(&id) => DeletedIds::One(IdRef { id }),
                None => return Ok(Envelope::with_status("404", None)),
            },
            DeleteTarget::Many(_) => {
                DeletedIds::Many(removed.into_iter().map(|id| IdRef { id }).collect())
            }
        };
        Ok(Envelope::ok(data))
    }
}
