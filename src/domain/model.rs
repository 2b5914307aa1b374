use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{require_text, Validate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;

pub type EntityId = u64;

/// Status string the remote service uses for success.
pub const STATUS_OK: &str = "200";

/// A record held in a slice. Each entity type names the payloads its actions
/// carry: a draft (no id) for create and a patch (id plus changed fields) for
/// update.
pub trait Entity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Draft: Clone + Debug + Serialize + DeserializeOwned + Validate + Send + Sync + 'static;
    type Patch: EntityPatch;

    /// Prefix for action names, e.g. `company/add`.
    const KIND: &'static str;

    fn id(&self) -> EntityId;
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;
    fn apply_patch(&mut self, patch: &Self::Patch);
}

pub trait EntityPatch:
    Clone + Debug + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    fn target(&self) -> EntityId;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CompanyPatch {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl Entity for Company {
    type Draft = NewCompany;
    type Patch = CompanyPatch;

    const KIND: &'static str = "company";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewCompany) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
        }
    }

    fn apply_patch(&mut self, patch: &CompanyPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(address) = &patch.address {
            self.address = address.clone();
        }
    }
}

impl Validate for NewCompany {
    fn validate(&self) -> Result<()> {
        require_text("Company name", &self.name)
    }
}

impl Validate for CompanyPatch {
    fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.address.is_none() {
            return Err(AdminError::validation(format!(
                "Update for company {} changes no fields",
                self.id
            )));
        }
        if let Some(name) = &self.name {
            require_text("Company name", name)?;
        }
        Ok(())
    }
}

impl EntityPatch for CompanyPatch {
    fn target(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub company_id: EntityId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub company_id: EntityId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl EmployeePatch {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl Entity for Employee {
    type Draft = NewEmployee;
    type Patch = EmployeePatch;

    const KIND: &'static str = "employee";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewEmployee) -> Self {
        Self {
            id,
            company_id: draft.company_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            position: draft.position,
        }
    }

    fn apply_patch(&mut self, patch: &EmployeePatch) {
        if let Some(company_id) = patch.company_id {
            self.company_id = company_id;
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(position) = &patch.position {
            self.position = position.clone();
        }
    }
}

impl Validate for NewEmployee {
    fn validate(&self) -> Result<()> {
        if self.company_id == 0 {
            return Err(AdminError::validation("Employee must belong to a company"));
        }
        require_text("Employee first name", &self.first_name)
    }
}

impl Validate for EmployeePatch {
    fn validate(&self) -> Result<()> {
        if self.company_id.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.position.is_none()
        {
            return Err(AdminError::validation(format!(
                "Update for employee {} changes no fields",
                self.id
            )));
        }
        if self.company_id == Some(0) {
            return Err(AdminError::validation("Employee must belong to a company"));
        }
        if let Some(first_name) = &self.first_name {
            require_text("Employee first name", first_name)?;
        }
        Ok(())
    }
}

impl EntityPatch for EmployeePatch {
    fn target(&self) -> EntityId {
        self.id
    }
}

/// What a delete action removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    One(EntityId),
    Many(Vec<EntityId>),
}

impl DeleteTarget {
    pub fn ids(&self) -> Vec<EntityId> {
        match self {
            Self::One(id) => vec![*id],
            Self::Many(ids) => ids.clone(),
        }
    }

    pub fn of<T: Entity>(entities: &[T]) -> Self {
        match entities {
            [single] => Self::One(single.id()),
            many => Self::Many(many.iter().map(Entity::id).collect()),
        }
    }
}

impl Validate for DeleteTarget {
    fn validate(&self) -> Result<()> {
        let ids = self.ids();
        if ids.is_empty() {
            return Err(AdminError::validation("Nothing selected to delete"));
        }
        if ids.contains(&0) {
            return Err(AdminError::validation("Entity id 0 is not valid"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: EntityId,
}

/// Delete acknowledgement: a single `{id}` or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeletedIds {
    One(IdRef),
    Many(Vec<IdRef>),
}

impl DeletedIds {
    pub fn ids(&self) -> Vec<EntityId> {
        match self {
            Self::One(r) => vec![r.id],
            Self::Many(refs) => refs.iter().map(|r| r.id).collect(),
        }
    }
}

impl From<&DeleteTarget> for DeletedIds {
    fn from(target: &DeleteTarget) -> Self {
        match target {
            DeleteTarget::One(id) => Self::One(IdRef { id: *id }),
            DeleteTarget::Many(ids) => Self::Many(ids.iter().map(|&id| IdRef { id }).collect()),
        }
    }
}

/// Create response: the stored fields, with the id the server assigned if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created<D> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub fields: D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<D> {
    pub result: ServiceResult<D>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResult<D> {
    #[serde(deserialize_with = "status_string")]
    pub status: String,
    pub data: Option<D>,
}

impl<D> Envelope<D> {
    pub fn ok(data: D) -> Self {
        Self::with_status(STATUS_OK, Some(data))
    }

    pub fn with_status(status: impl Into<String>, data: Option<D>) -> Self {
        Self {
            result: ServiceResult {
                status: status.into(),
                data,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.status == STATUS_OK
    }

    pub fn status(&self) -> &str {
        &self.result.status
    }

    /// Payload of a successful envelope; `None` for any other status.
    pub fn into_ok_data(self) -> Option<Option<D>> {
        if self.is_ok() {
            Some(self.result.data)
        } else {
            None
        }
    }
}

// Some backends send the status as a number.
fn status_string<'de, De>(deserializer: De) -> std::result::Result<String, De::Error>
where
    De: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Status {
        Text(String),
        Code(u64),
    }

    Ok(match Status::deserialize(deserializer)? {
        Status::Text(text) => text,
        Status::Code(code) => code.to_string(),
    })
}
