//! This module provides a client to connect to the to-do server

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::item::{ItemId, NewTodo, TodoItem};
use crate::resource::Resource;
use crate::traits::TodoSource;


/// A to-do source that fetches its data from an HTTP server.
///
/// There is no retry and no local bookkeeping: every call is a single HTTP request.
/// Callers are expected to [`list`](TodoSource::list) again after each successful mutation.
#[derive(Clone, Debug)]
pub struct Client {
    resource: Resource,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, NetworkError> {
        let resource = Resource::parse(url)?;
        Ok(Self {
            resource,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the base URL set in [`config`](crate::config)
    pub fn from_config() -> Result<Self, NetworkError> {
        Self::new(crate::config::base_url())
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

#[async_trait]
impl TodoSource for Client {
    async fn list(&self) -> Result<Vec<TodoItem>, NetworkError> {
        let url = self.resource.collection();
        log::debug!("Fetching items from {}", url);

        let response = self.http
            .get(url)
            .send()
            .await?;
        // The status code is not checked: an error page is not a JSON array, and fails below
        let status = response.status();
        let body = response.bytes().await?;

        let items: Vec<TodoItem> = serde_json::from_slice(&body).map_err(|err| {
            log::debug!("Unable to decode the item list (HTTP status {}): {}", status, err);
            err
        })?;
        log::debug!("Fetched {} items", items.len());
        Ok(items)
    }

    async fn create(&mut self, item: &NewTodo) -> Result<(), NetworkError> {
        let response = self.http
            .post(self.resource.collection())
            .json(item)
            .send()
            .await?;

        if response.status().is_success() == false {
            log::warn!("Unexpected HTTP status code {:?} when creating {:?}", response.status(), item.title);
        }
        Ok(())
    }

    async fn delete(&mut self, id: &ItemId) -> Result<(), NetworkError> {
        let response = self.http
            .delete(self.resource.member(id))
            .send()
            .await?;

        if response.status().is_success() == false {
            log::warn!("Unexpected HTTP status code {:?} when deleting {}", response.status(), id);
        }
        Ok(())
    }
}
