//! Connected services and enforcement planning.
//!
//! Plans are always dry runs; executing one hands it to the server-side
//! engine, which is not part of this crate.

use std::sync::Arc;

use serde_json::json;

use crate::api::{call, ActionResult, ApiClient, ApiRequest};
use crate::models::{
    Aggressiveness, ConnectionStatus, EnforcementPlan, EnforcementRun, Provider, ServiceConnection,
};

pub struct EnforcementActions<C> {
    client: Arc<C>,
    connections: Vec<ServiceConnection>,
    current_plan: Option<EnforcementPlan>,
    last_run: Option<EnforcementRun>,
}

impl<C: ApiClient> EnforcementActions<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            connections: Vec::new(),
            current_plan: None,
            last_run: None,
        }
    }

    pub fn connections(&self) -> &[ServiceConnection] {
        &self.connections
    }

    /// Providers whose connection can currently be used.
    pub fn active_providers(&self) -> Vec<Provider> {
        self.connections
            .iter()
            .filter(|c| c.status == ConnectionStatus::Active)
            .map(|c| c.provider)
            .collect()
    }

    pub fn current_plan(&self) -> Option<&EnforcementPlan> {
        self.current_plan.as_ref()
    }

    pub fn last_run(&self) -> Option<&EnforcementRun> {
        self.last_run.as_ref()
    }

    pub async fn load_connections(&mut self) -> ActionResult<Vec<ServiceConnection>> {
        let result: ActionResult<Vec<ServiceConnection>> = call(
            &*self.client,
            ApiRequest::get("/api/v1/connections").authenticated(),
        )
        .await;

        if result.success {
            self.connections = result.data.clone().unwrap_or_default();
        }
        result
    }

    /// Requests a dry-run plan for the selected providers.
    ///
    /// Duplicated providers are collapsed; an empty selection fails locally.
    pub async fn plan(
        &mut self,
        providers: &[Provider],
        aggressiveness: Aggressiveness,
    ) -> ActionResult<EnforcementPlan> {
        let mut selected: Vec<Provider> = Vec::with_capacity(providers.len());
        for provider in providers {
            if !selected.contains(provider) {
                selected.push(*provider);
            }
        }
        if selected.is_empty() {
            return ActionResult::failure("Select at least one connected service");
        }

        let request = ApiRequest::post(
            "/api/v1/enforcement/plan",
            json!({
                "providers": selected,
                "aggressiveness": aggressiveness,
                "dry_run": true,
            }),
        )
        .authenticated();
        let result: ActionResult<EnforcementPlan> =
            call(&*self.client, request).await.require_data();

        if result.success {
            self.current_plan = result.data.clone();
        }
        result
    }

    /// Starts enforcement of the current plan.
    pub async fn execute(&mut self, plan_id: &str) -> ActionResult<EnforcementRun> {
        if self.current_plan.as_ref().map(|p| p.plan_id.as_str()) != Some(plan_id) {
            return ActionResult::failure("Plan not found; create a new plan first");
        }

        let request = ApiRequest::post("/api/v1/enforcement/execute", json!({ "plan_id": plan_id }))
            .authenticated();
        let result: ActionResult<EnforcementRun> =
            call(&*self.client, request).await.require_data();

        if result.success {
            #[cfg(feature = "tracing")]
            tracing::info!(plan_id, "enforcement started");

            self.last_run = result.data.clone();
            self.current_plan = None;
        }
        result
    }

    pub fn discard_plan(&mut self) {
        self.current_plan = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockClient;
    use crate::models::RunStatus;

    fn setup() -> (Arc<MockClient>, EnforcementActions<MockClient>) {
        let client = Arc::new(MockClient::signed_in());
        let enforcement = EnforcementActions::new(Arc::clone(&client));
        (client, enforcement)
    }

    fn plan_response(plan_id: &str) -> serde_json::Value {
        json!({
            "success": true,
            "data": {
                "plan_id": plan_id,
                "dry_run": true,
                "aggressiveness": "aggressive",
                "impacts": [{ "provider": "spotify", "tracks_to_remove": 7 }]
            }
        })
    }

    #[tokio::test]
    async fn test_active_providers() {
        let (client, mut enforcement) = setup();
        client.respond(json!({
            "success": true,
            "data": [
                { "provider": "spotify", "status": "active" },
                { "provider": "tidal", "status": "expired" },
                { "provider": "deezer", "status": "active" }
            ]
        }));

        enforcement.load_connections().await;

        assert_eq!(enforcement.connections().len(), 3);
        assert_eq!(
            enforcement.active_providers(),
            vec![Provider::Spotify, Provider::Deezer]
        );
    }

    #[tokio::test]
    async fn test_plan_is_dry_run_with_deduplicated_providers() {
        let (client, mut enforcement) = setup();
        client.respond(plan_response("p1"));

        let result = enforcement
            .plan(
                &[Provider::Spotify, Provider::AppleMusic, Provider::Spotify],
                Aggressiveness::Aggressive,
            )
            .await;

        assert!(result.success);
        assert_eq!(enforcement.current_plan().unwrap().totals().tracks_to_remove, 7);
        let body = client.last_request().unwrap().body.unwrap();
        assert_eq!(body["dry_run"], true);
        assert_eq!(body["aggressiveness"], "aggressive");
        assert_eq!(body["providers"], json!(["spotify", "apple_music"]));
    }

    #[tokio::test]
    async fn test_plan_without_providers_fails_locally() {
        let (client, mut enforcement) = setup();

        let result = enforcement.plan(&[], Aggressiveness::Moderate).await;

        assert!(!result.success);
        assert_eq!(client.request_count(), 0);
        assert!(enforcement.current_plan().is_none());
    }

    #[tokio::test]
    async fn test_execute_requires_current_plan() {
        let (client, mut enforcement) = setup();

        let result = enforcement.execute("p1").await;

        assert!(!result.success);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_execute_current_plan() {
        let (client, mut enforcement) = setup();
        client.respond(plan_response("p1"));
        client.respond(json!({
            "success": true,
            "data": { "run_id": "r1", "plan_id": "p1", "status": "pending" }
        }));
        enforcement.plan(&[Provider::Spotify], Aggressiveness::Moderate).await;

        let result = enforcement.execute("p1").await;

        assert!(result.success);
        assert_eq!(enforcement.last_run().unwrap().status, RunStatus::Pending);
        assert!(enforcement.current_plan().is_none());
        assert_eq!(client.last_request().unwrap().path, "/api/v1/enforcement/execute");
    }

    #[tokio::test]
    async fn test_execute_failure_keeps_plan() {
        let (client, mut enforcement) = setup();
        client.respond(plan_response("p1"));
        client.respond(json!({ "success": false, "message": "Spotify token expired" }));
        enforcement.plan(&[Provider::Spotify], Aggressiveness::Moderate).await;

        let result = enforcement.execute("p1").await;

        assert_eq!(result.message.as_deref(), Some("Spotify token expired"));
        assert!(enforcement.current_plan().is_some());
        assert!(enforcement.last_run().is_none());
    }
}
