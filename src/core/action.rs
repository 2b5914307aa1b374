use crate::domain::model::{Created, Entity, EntityId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    RequestList,
    Add,
    Update,
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::RequestList => "request",
            ActionKind::Add => "add",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Reducer input: one phase of one async action.
#[derive(Debug, Clone)]
pub enum SliceAction<T: Entity> {
    Pending(ActionKind),
    /// Fulfilled with nothing to merge (non-"200" status, empty payload).
    Settled(ActionKind),
    Rejected(ActionKind, String),
    Listed(Vec<T>),
    Added(Created<T::Draft>),
    Updated(T::Patch),
    Deleted(Vec<EntityId>),
}

impl<T: Entity> SliceAction<T> {
    pub fn kind(&self) -> ActionKind {
        match self {
            SliceAction::Pending(kind)
            | SliceAction::Settled(kind)
            | SliceAction::Rejected(kind, _) => *kind,
            SliceAction::Listed(_) => ActionKind::RequestList,
            SliceAction::Added(_) => ActionKind::Add,
            SliceAction::Updated(_) => ActionKind::Update,
            SliceAction::Deleted(_) => ActionKind::Delete,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            SliceAction::Pending(_) => "pending",
            SliceAction::Rejected(..) => "rejected",
            _ => "fulfilled",
        }
    }

    /// Action type name in `company/add/fulfilled` form.
    pub fn type_name(&self) -> String {
        format!("{}/{}/{}", T::KIND, self.kind(), self.phase())
    }
}

/// How a dispatched action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The service confirmed the change and it was merged.
    Fulfilled,
    /// The service answered with a non-"200" status. A list fetch leaves an
    /// empty list, any other action changes nothing.
    Declined { status: String },
    /// The service call failed and local data was applied instead.
    FellBack { message: String },
    /// The error was recorded in the slice.
    Rejected { message: String },
}

impl ActionOutcome {
    pub fn is_fulfilled(&self) -> bool {
        !self.is_rejected()
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ActionOutcome::Rejected { .. })
    }
}
