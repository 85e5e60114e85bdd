//! Do-not-play list management and artist search.

use std::sync::Arc;

use serde_json::json;

use crate::api::{call, path_segment, ActionResult, ApiClient, ApiRequest};
use crate::models::{Artist, DnpEntry};

/// Maximum number of artists requested per search.
pub const SEARCH_LIMIT: usize = 20;

pub struct DnpActions<C> {
    client: Arc<C>,
    entries: Vec<DnpEntry>,
    search_results: Vec<Artist>,
    last_query: Option<String>,
}

impl<C: ApiClient> DnpActions<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            entries: Vec::new(),
            search_results: Vec::new(),
            last_query: None,
        }
    }

    pub fn entries(&self) -> &[DnpEntry] {
        &self.entries
    }

    pub fn search_results(&self) -> &[Artist] {
        &self.search_results
    }

    /// Query the current results belong to.
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.entries.iter().any(|e| e.artist.id == artist_id)
    }

    /// Fetches the user's list, replacing the local copy.
    pub async fn load(&mut self) -> ActionResult<Vec<DnpEntry>> {
        let result: ActionResult<Vec<DnpEntry>> = call(
            &*self.client,
            ApiRequest::get("/api/v1/dnp/list").authenticated(),
        )
        .await;

        if result.success {
            self.entries = result.data.clone().unwrap_or_default();
        }
        result
    }

    /// Searches artists by name.
    ///
    /// A blank query clears the results without a request.
    pub async fn search_artists(&mut self, query: &str) -> ActionResult<Vec<Artist>> {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return ActionResult::ok(Vec::new());
        }

        let request = ApiRequest::get("/api/v1/artists/search")
            .query("q", query)
            .query("limit", SEARCH_LIMIT)
            .authenticated();
        let result: ActionResult<Vec<Artist>> = call(&*self.client, request).await;

        if result.success {
            self.search_results = result.data.clone().unwrap_or_default();
            self.last_query = Some(query.to_string());
        }
        result
    }

    pub fn clear_search(&mut self) {
        self.search_results.clear();
        self.last_query = None;
    }

    /// Blocks an artist. Already-listed artists are rejected locally.
    pub async fn add_artist(&mut self, artist_id: &str, note: Option<&str>) -> ActionResult<DnpEntry> {
        if self.contains(artist_id) {
            return ActionResult::failure("Artist is already on your list");
        }

        let note = note.map(str::trim).filter(|n| !n.is_empty());
        let request = ApiRequest::post(
            "/api/v1/dnp/list",
            json!({ "artist_id": artist_id, "note": note }),
        )
        .authenticated();
        let result: ActionResult<DnpEntry> =
            call(&*self.client, request).await.require_data();

        if let Some(entry) = result.data.as_ref().filter(|_| result.success) {
            self.entries.push(entry.clone());
        }
        result
    }

    pub async fn remove_artist(&mut self, artist_id: &str) -> ActionResult<()> {
        let segment = match path_segment(artist_id) {
            Ok(segment) => segment,
            Err(e) => return ActionResult::failure(e.to_string()),
        };
        let request =
            ApiRequest::delete(format!("/api/v1/dnp/list/{}", segment)).authenticated();
        let result: ActionResult<()> = call(&*self.client, request).await;

        if result.success {
            self.entries.retain(|e| e.artist.id != artist_id);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockClient;
    use crate::api::{ApiError, Method};
    use serde_json::Value;

    fn entry_json(id: &str, name: &str) -> Value {
        json!({ "artist": { "id": id, "name": name }, "added_at": "2026-01-02T03:04:05Z" })
    }

    fn signed_in() -> (Arc<MockClient>, DnpActions<MockClient>) {
        let client = Arc::new(MockClient::signed_in());
        let dnp = DnpActions::new(Arc::clone(&client));
        (client, dnp)
    }

    #[tokio::test]
    async fn test_load_replaces_entries() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({
            "success": true,
            "data": [entry_json("a1", "One"), entry_json("a2", "Two")]
        }));

        let result = dnp.load().await;

        assert!(result.success);
        assert_eq!(dnp.entries().len(), 2);
        assert!(dnp.contains("a2"));
        assert!(client.last_request().unwrap().authenticated);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_entries() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({ "success": true, "data": [entry_json("a1", "One")] }));
        client.fail(ApiError::Status { status: 502, body: "bad gateway".to_string() });
        dnp.load().await;

        let result = dnp.load().await;

        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("Server error 502: bad gateway"));
        assert_eq!(dnp.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_search_sends_trimmed_query() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({
            "success": true,
            "data": [{ "id": "a9", "name": "Nine", "genres": ["pop"] }]
        }));

        let result = dnp.search_artists("  nine ").await;

        assert!(result.success);
        assert_eq!(dnp.search_results().len(), 1);
        assert_eq!(dnp.last_query(), Some("nine"));
        let request = client.last_request().unwrap();
        assert_eq!(request.path, "/api/v1/artists/search");
        assert_eq!(request.query[0], ("q".to_string(), "nine".to_string()));
        assert_eq!(request.query[1], ("limit".to_string(), SEARCH_LIMIT.to_string()));
    }

    #[tokio::test]
    async fn test_blank_search_clears_without_request() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({ "success": true, "data": [{ "id": "a9", "name": "Nine" }] }));
        dnp.search_artists("nine").await;

        let result = dnp.search_artists("   ").await;

        assert!(result.success);
        assert!(dnp.search_results().is_empty());
        assert_eq!(dnp.last_query(), None);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_search_is_not_retried() {
        let (client, mut dnp) = signed_in();
        client.fail(ApiError::Network("timeout".to_string()));

        let result = dnp.search_artists("abc").await;

        assert!(!result.success);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_add_artist_appends_entry() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({ "success": true, "data": entry_json("a3", "Three") }));

        let result = dnp.add_artist("a3", Some("  ")).await;

        assert!(result.success);
        assert!(dnp.contains("a3"));
        let body = client.last_request().unwrap().body.unwrap();
        assert_eq!(body["artist_id"], "a3");
        assert!(body["note"].is_null());
    }

    #[tokio::test]
    async fn test_add_duplicate_rejected_locally() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({ "success": true, "data": entry_json("a3", "Three") }));
        dnp.add_artist("a3", None).await;

        let result = dnp.add_artist("a3", Some("again")).await;

        assert!(!result.success);
        assert_eq!(client.request_count(), 1);
        assert_eq!(dnp.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_artist() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({ "success": true, "data": [entry_json("a1", "One"), entry_json("a2", "Two")] }));
        client.respond(json!({ "success": true, "message": "Removed" }));
        dnp.load().await;

        let result = dnp.remove_artist("a1").await;

        assert!(result.success);
        assert!(!dnp.contains("a1"));
        assert!(dnp.contains("a2"));
        let request = client.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/api/v1/dnp/list/a1");
    }

    #[tokio::test]
    async fn test_remove_artist_escapes_id() {
        let (client, mut dnp) = signed_in();
        client.respond(json!({ "success": true }));

        dnp.remove_artist("../../community/lists/l1/subscribe").await;

        let request = client.last_request().unwrap();
        assert_eq!(
            request.path,
            "/api/v1/dnp/list/..%2F..%2Fcommunity%2Flists%2Fl1%2Fsubscribe"
        );
    }

    #[tokio::test]
    async fn test_remove_artist_rejects_dot_segment() {
        let (client, mut dnp) = signed_in();

        let result = dnp.remove_artist("..").await;

        assert!(!result.success);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_signed_out_calls_fail_without_state_change() {
        let client = Arc::new(MockClient::new());
        let mut dnp = DnpActions::new(Arc::clone(&client));

        let result = dnp.add_artist("a1", None).await;

        assert!(!result.success);
        assert!(dnp.entries().is_empty());
    }
}
