use crate::domain::model::{Created, DeleteTarget, DeletedIds, Entity, Envelope};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote access to one resource (`companies`, `employees`).
///
/// Transport failures come back as `Err`; a reachable server that declines
/// the request answers with a non-`"200"` envelope status instead.
#[async_trait]
pub trait ResourceService<T: Entity>: Send + Sync {
    async fn get(&self) -> Result<Envelope<Vec<T>>>;
    async fn post(&self, draft: &T::Draft) -> Result<Envelope<Created<T::Draft>>>;
    async fn patch(&self, patch: &T::Patch) -> Result<Envelope<T::Patch>>;
    async fn delete(&self, target: &DeleteTarget) -> Result<Envelope<DeletedIds>>;
}
