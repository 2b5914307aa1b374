pub mod action;
pub mod policy;
pub mod selectors;
pub mod slice;
pub mod store;

pub use crate::domain::model::{Company, Employee, Entity, EntityId};
pub use crate::domain::ports::ResourceService;
pub use crate::utils::error::Result;
pub use action::{ActionKind, ActionOutcome, SliceAction};
pub use policy::{IdPolicy, Mode, SyncPolicy};
pub use slice::SliceState;
pub use store::{AppState, Services, SliceActions, Store, StoredEntity};
