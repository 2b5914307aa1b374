use crate::adapters::mock::MockDataset;
use crate::core::action::{ActionKind, ActionOutcome, SliceAction};
use crate::core::policy::{Mode, SyncPolicy};
use crate::core::slice::SliceState;
use crate::domain::model::{
    Company, Created, DeleteTarget, Employee, Entity, EntityPatch, Envelope,
};
use crate::domain::ports::ResourceService;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::Validate;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::watch;

/// Everything the views read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub company: SliceState<Company>,
    pub employee: SliceState<Employee>,
}

/// The remote side of every slice.
#[derive(Clone)]
pub struct Services {
    pub companies: Arc<dyn ResourceService<Company>>,
    pub employees: Arc<dyn ResourceService<Employee>>,
}

/// Ties an entity type to its slice, its service and its fallback list.
pub trait StoredEntity: Entity {
    fn slice(state: &AppState) -> &SliceState<Self>;
    fn slice_mut(state: &mut AppState) -> &mut SliceState<Self>;
    fn service(services: &Services) -> &dyn ResourceService<Self>;
    fn fallback_list(mock: &MockDataset) -> Vec<Self>;
}

impl StoredEntity for Company {
    fn slice(state: &AppState) -> &SliceState<Self> {
        &state.company
    }

    fn slice_mut(state: &mut AppState) -> &mut SliceState<Self> {
        &mut state.company
    }

    fn service(services: &Services) -> &dyn ResourceService<Self> {
        services.companies.as_ref()
    }

    fn fallback_list(mock: &MockDataset) -> Vec<Self> {
        mock.companies.clone()
    }
}

impl StoredEntity for Employee {
    fn slice(state: &AppState) -> &SliceState<Self> {
        &state.employee
    }

    fn slice_mut(state: &mut AppState) -> &mut SliceState<Self> {
        &mut state.employee
    }

    fn service(services: &Services) -> &dyn ResourceService<Self> {
        services.employees.as_ref()
    }

    fn fallback_list(mock: &MockDataset) -> Vec<Self> {
        mock.employees.clone()
    }
}

/// Application state plus the async actions that keep it in step with the
/// remote service.
///
/// Reducers run synchronously inside `send_modify`, so the store can be
/// shared by reference and several actions may be in flight at once; the
/// response that arrives last is applied last.
pub struct Store {
    state: watch::Sender<AppState>,
    services: Services,
    policy: SyncPolicy,
    mock: MockDataset,
}

impl Store {
    pub fn new(services: Services, policy: SyncPolicy, mock: MockDataset) -> Self {
        Self::with_state(AppState::default(), services, policy, mock)
    }

    pub fn with_state(
        state: AppState,
        services: Services,
        policy: SyncPolicy,
        mock: MockDataset,
    ) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            state,
            services,
            policy,
            mock,
        }
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Run a selector against the current state.
    pub fn select<R>(&self, selector: impl FnOnce(&AppState) -> R) -> R {
        selector(&self.state.borrow())
    }

    pub fn companies(&self) -> SliceActions<'_, Company> {
        SliceActions::new(self)
    }

    pub fn employees(&self) -> SliceActions<'_, Employee> {
        SliceActions::new(self)
    }

    /// Startup load of every slice.
    pub async fn bootstrap(&self) -> (ActionOutcome, ActionOutcome) {
        let companies = self.companies();
        let employees = self.employees();
        tokio::join!(companies.request_list(), employees.request_list())
    }

    fn apply<T: StoredEntity>(&self, action: SliceAction<T>) {
        tracing::debug!(action = %action.type_name(), "dispatch");
        let id_policy = self.policy.id_policy;
        self.state
            .send_modify(|state| T::slice_mut(state).reduce(action, id_policy));
    }

    fn reject<T: StoredEntity>(&self, kind: ActionKind, error: &AdminError) -> ActionOutcome {
        let message = error.user_friendly_message();
        tracing::error!("{}/{} rejected: {}", T::KIND, kind, error);
        self.apply(SliceAction::<T>::Rejected(kind, message.clone()));
        ActionOutcome::Rejected { message }
    }

    /// Apply the terminal phase for a finished service call.
    fn settle<T, D>(
        &self,
        kind: ActionKind,
        response: Result<Envelope<D>>,
        fulfil: impl FnOnce(Option<D>) -> SliceAction<T>,
        fallback: impl FnOnce() -> SliceAction<T>,
    ) -> ActionOutcome
    where
        T: StoredEntity,
    {
        match response {
            Ok(envelope) if envelope.is_ok() => {
                self.apply(fulfil(envelope.result.data));
                ActionOutcome::Fulfilled
            }
            Ok(envelope) => {
                let status = envelope.result.status;
                // a declined list fetch yields an empty list; other actions change nothing
                let action = match kind {
                    ActionKind::RequestList => SliceAction::<T>::Listed(Vec::new()),
                    _ => SliceAction::<T>::Settled(kind),
                };
                tracing::debug!(
                    "{}/{} answered with status {}, applying {}",
                    T::KIND,
                    kind,
                    status,
                    action.type_name()
                );
                self.apply(action);
                ActionOutcome::Declined { status }
            }
            Err(error) => match self.policy.mode {
                Mode::Development => {
                    tracing::warn!(
                        "{}/{} failed ({}), applying local data instead",
                        T::KIND,
                        kind,
                        error
                    );
                    self.apply(fallback());
                    ActionOutcome::FellBack {
                        message: error.user_friendly_message(),
                    }
                }
                Mode::Production => self.reject::<T>(kind, &error),
            },
        }
    }
}

/// Async actions for one slice.
pub struct SliceActions<'a, T> {
    store: &'a Store,
    _entity: PhantomData<T>,
}

impl<'a, T: StoredEntity> SliceActions<'a, T> {
    fn new(store: &'a Store) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn begin(&self, kind: ActionKind, payload: Option<&dyn Validate>) -> Option<ActionOutcome> {
        self.store.apply(SliceAction::<T>::Pending(kind));
        // Bad payloads never reach the service, in any mode.
        match payload.map(|p| p.validate()) {
            Some(Err(error)) => Some(self.store.reject::<T>(kind, &error)),
            _ => None,
        }
    }

    /// Fetch the whole list and replace the slice's entities.
    pub async fn request_list(&self) -> ActionOutcome {
        let kind = ActionKind::RequestList;
        self.begin(kind, None);

        let response = T::service(&self.store.services).get().await;
        let mock = &self.store.mock;
        self.store.settle::<T, _>(
            kind,
            response,
            |data| match data {
                Some(entities) => SliceAction::Listed(entities),
                None => SliceAction::Settled(kind),
            },
            || SliceAction::Listed(T::fallback_list(mock)),
        )
    }

    pub async fn add(&self, draft: T::Draft) -> ActionOutcome {
        let kind = ActionKind::Add;
        if let Some(outcome) = self.begin(kind, Some(&draft as &dyn Validate)) {
            return outcome;
        }

        let response = T::service(&self.store.services).post(&draft).await;
        let sent = draft.clone();
        self.store.settle::<T, _>(
            kind,
            response,
            // an empty 200 still means the server stored what we sent
            |data| SliceAction::Added(data.unwrap_or(Created { id: None, fields: sent })),
            || SliceAction::Added(Created { id: None, fields: draft }),
        )
    }

    pub async fn update(&self, patch: T::Patch) -> ActionOutcome {
        let kind = ActionKind::Update;
        if let Some(outcome) = self.begin(kind, Some(&patch as &dyn Validate)) {
            return outcome;
        }

        let response = T::service(&self.store.services).patch(&patch).await;
        let sent = patch.clone();
        self.store.settle::<T, _>(
            kind,
            response,
            |data| match data {
                Some(returned) if returned.target() == sent.target() => {
                    SliceAction::Updated(returned)
                }
                Some(returned) => {
                    tracing::warn!(
                        "{} update for {} answered for {}, applying the sent patch",
                        T::KIND,
                        sent.target(),
                        returned.target()
                    );
                    SliceAction::Updated(sent)
                }
                None => SliceAction::Updated(sent),
            },
            || SliceAction::Updated(patch),
        )
    }

    /// Delete one entity or a batch.
    pub async fn delete(&self, target: DeleteTarget) -> ActionOutcome {
        let kind = ActionKind::Delete;
        if let Some(outcome) = self.begin(kind, Some(&target as &dyn Validate)) {
            return outcome;
        }

        let response = T::service(&self.store.services).delete(&target).await;
        let requested = target.ids();
        self.store.settle::<T, _>(
            kind,
            response,
            |data| {
                SliceAction::Deleted(
                    data.map(|deleted| deleted.ids())
                        .unwrap_or_else(|| requested.clone()),
                )
            },
            || SliceAction::Deleted(target.ids()),
        )
    }
}
