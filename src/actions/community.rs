//! Community list browsing and subscriptions.

use std::sync::Arc;

use serde_json::json;

use crate::api::{call, path_segment, ActionResult, ApiClient, ApiRequest};
use crate::models::{CommunityList, Subscription};

pub struct CommunityActions<C> {
    client: Arc<C>,
    lists: Vec<CommunityList>,
    subscriptions: Vec<Subscription>,
}

impl<C: ApiClient> CommunityActions<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            lists: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn lists(&self) -> &[CommunityList] {
        &self.lists
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn is_subscribed(&self, list_id: &str) -> bool {
        self.subscriptions.iter().any(|s| s.list_id == list_id)
    }

    /// Loaded lists the user is subscribed to.
    pub fn subscribed_lists(&self) -> impl Iterator<Item = &CommunityList> {
        self.lists.iter().filter(|l| self.is_subscribed(&l.id))
    }

    /// Public directory of lists, optionally filtered by a search term.
    pub async fn browse(&mut self, query: Option<&str>) -> ActionResult<Vec<CommunityList>> {
        let mut request = ApiRequest::get("/api/v1/community/lists");
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.query("q", query);
        }
        let result: ActionResult<Vec<CommunityList>> = call(&*self.client, request).await;

        if result.success {
            self.lists = result.data.clone().unwrap_or_default();
        }
        result
    }

    pub async fn load_subscriptions(&mut self) -> ActionResult<Vec<Subscription>> {
        let result: ActionResult<Vec<Subscription>> = call(
            &*self.client,
            ApiRequest::get("/api/v1/community/subscriptions").authenticated(),
        )
        .await;

        if result.success {
            self.subscriptions = result.data.clone().unwrap_or_default();
        }
        result
    }

    pub async fn subscribe(&mut self, list_id: &str, auto_update: bool) -> ActionResult<Subscription> {
        if self.is_subscribed(list_id) {
            return ActionResult::failure("Already subscribed to this list");
        }

        let segment = match path_segment(list_id) {
            Ok(segment) => segment,
            Err(e) => return ActionResult::failure(e.to_string()),
        };
        let request = ApiRequest::post(
            format!("/api/v1/community/lists/{}/subscribe", segment),
            json!({ "auto_update": auto_update }),
        )
        .authenticated();
        let result: ActionResult<Subscription> =
            call(&*self.client, request).await.require_data();

        if let Some(subscription) = result.data.as_ref().filter(|_| result.success) {
            self.subscriptions.push(subscription.clone());
            if let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) {
                list.subscriber_count += 1;
            }
        }
        result
    }

    pub async fn unsubscribe(&mut self, list_id: &str) -> ActionResult<()> {
        let segment = match path_segment(list_id) {
            Ok(segment) => segment,
            Err(e) => return ActionResult::failure(e.to_string()),
        };
        let request = ApiRequest::delete(format!("/api/v1/community/lists/{}/subscribe", segment))
            .authenticated();
        let result: ActionResult<()> = call(&*self.client, request).await;

        if result.success {
            self.subscriptions.retain(|s| s.list_id != list_id);
            if let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) {
                list.subscriber_count = list.subscriber_count.saturating_sub(1);
            }
        }
        result
    }
}
