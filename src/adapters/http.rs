use crate::domain::model::{Created, DeleteTarget, DeletedIds, Entity, EntityPatch, Envelope};
use crate::domain::ports::ResourceService;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// REST access to `{base_url}/{resource}`.
pub struct HttpService<T> {
    client: Client,
    collection_url: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> HttpService<T> {
    pub fn new(client: Client, base_url: &str, resource: &str) -> Self {
        Self {
            client,
            collection_url: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                resource.trim_matches('/')
            ),
            _entity: PhantomData,
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.collection_url, id)
    }
}

async fn read_envelope<D: DeserializeOwned>(response: Response) -> Result<Envelope<D>> {
    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AdminError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

#[async_trait]
impl<T: Entity> ResourceService<T> for HttpService<T> {
    async fn get(&self) -> Result<Envelope<Vec<T>>> {
        tracing::debug!("GET {}", self.collection_url);
        let response = self.client.get(&self.collection_url).send().await?;
        read_envelope(response).await
    }

    async fn post(&self, draft: &T::Draft) -> Result<Envelope<Created<T::Draft>>> {
        tracing::debug!("POST {}", self.collection_url);
        let response = self
            .client
            .post(&self.collection_url)
            .json(draft)
            .send()
            .await?;
        read_envelope(response).await
    }

    async fn patch(&self, patch: &T::Patch) -> Result<Envelope<T::Patch>> {
        let url = self.item_url(patch.target());
        tracing::debug!("PATCH {}", url);
        let response = self.client.patch(&url).json(patch).send().await?;
        read_envelope(response).await
    }

    async fn delete(&self, target: &DeleteTarget) -> Result<Envelope<DeletedIds>> {
        let request = match target {
            DeleteTarget::One(id) => self.client.delete(self.item_url(*id)),
            DeleteTarget::Many(ids) => {
                let joined = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                self.client
                    .delete(&self.collection_url)
                    .query(&[("ids", joined)])
            }
        };
        tracing::debug!("DELETE {} ({:?})", self.collection_url, target);
        let response = request.send().await?;
        read_envelope(response).await
    }
}
