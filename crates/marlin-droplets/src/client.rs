//! Convenience requests for droplet resources.
//!
//! Thin mapping layer: each method assembles an endpoint, method, and
//! optional payload, hands the request to the engine, and returns the
//! already-resumed handle.

use marlin_core::client::Api;
use marlin_core::endpoint::Endpoint;
use marlin_core::handle::Handle;
use marlin_core::ids::DropletId;
use marlin_core::query::Page;
use marlin_core::types::Action;
use marlin_core::Result;
use reqwest::Method;

use crate::models::{CreateDropletRequest, Droplet, DropletAction};

/// Droplet requests, implemented for [`Api`].
pub trait DropletRequests {
    /// List droplets on the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn list_droplets(&self, page: Option<Page>) -> Result<Handle<Vec<Droplet>>>;

    /// Fetch a single droplet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn droplet(&self, id: DropletId) -> Result<Handle<Droplet>>;

    /// Create a droplet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the payload cannot
    /// be serialized.
    fn create_droplet(&self, request: &CreateDropletRequest) -> Result<Handle<Droplet>>;

    /// Delete a droplet. Success carries no payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn delete_droplet(&self, id: DropletId) -> Result<Handle<Droplet>>;

    /// Initiate an action on a droplet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the action cannot
    /// be serialized.
    fn droplet_action(&self, id: DropletId, action: &DropletAction) -> Result<Handle<Action>>;

    /// List actions performed on a droplet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn droplet_actions(&self, id: DropletId, page: Option<Page>) -> Result<Handle<Vec<Action>>>;
}

impl DropletRequests for Api {
    fn list_droplets(&self, page: Option<Page>) -> Result<Handle<Vec<Droplet>>> {
        let request =
            self.request_to(&Endpoint::Droplets, Method::GET, Option::<&()>::None, page, &[])?;
        let handle = self.task(request).key_path("droplets").build();
        handle.resume();
        Ok(handle)
    }

    fn droplet(&self, id: DropletId) -> Result<Handle<Droplet>> {
        let request = self.request_to(
            &Endpoint::Droplet(id),
            Method::GET,
            Option::<&()>::None,
            None,
            &[],
        )?;
        let handle = self.task(request).key_path("droplet").build();
        handle.resume();
        Ok(handle)
    }

    fn create_droplet(&self, request: &CreateDropletRequest) -> Result<Handle<Droplet>> {
        let request =
            self.request_to(&Endpoint::Droplets, Method::POST, Some(request), None, &[])?;
        let handle = self.task(request).key_path("droplet").build();
        handle.resume();
        Ok(handle)
    }

    fn delete_droplet(&self, id: DropletId) -> Result<Handle<Droplet>> {
        let request = self.request_to(
            &Endpoint::Droplet(id),
            Method::DELETE,
            Option::<&()>::None,
            None,
            &[],
        )?;
        let handle = self.task(request).build();
        handle.resume();
        Ok(handle)
    }

    fn droplet_action(&self, id: DropletId, action: &DropletAction) -> Result<Handle<Action>> {
        let request = self.request_to(
            &Endpoint::DropletActions(id),
            Method::POST,
            Some(action),
            None,
            &[],
        )?;
        let handle = self.task(request).key_path("action").build();
        handle.resume();
        Ok(handle)
    }

    fn droplet_actions(&self, id: DropletId, page: Option<Page>) -> Result<Handle<Vec<Action>>> {
        let request = self.request_to(
            &Endpoint::DropletActions(id),
            Method::GET,
            Option::<&()>::None,
            page,
            &[],
        )?;
        let handle = self.task(request).key_path("actions").build();
        handle.resume();
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marlin_core::config::{ApiConfig, ApiVersion};
    use marlin_core::result::{ApiResult, FailureReason};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> Api {
        let config = ApiConfig::new(ApiVersion::V2, "ab837378789f2a87")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        Api::new(config).unwrap()
    }

    fn droplet_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "memory": 1024,
            "vcpus": 1,
            "disk": 25,
            "locked": false,
            "status": "active",
            "created_at": "2016-10-05T16:32:40Z",
            "size_slug": "s-1vcpu-1gb",
            "tags": ["web"]
        })
    }

    #[tokio::test]
    async fn list_droplets_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/droplets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplets": [droplet_json(3_164_444, "web-01")]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let droplets = api.list_droplets(None).unwrap().outcome().await;

        let droplets = droplets.value().unwrap();
        assert_eq!(droplets.len(), 1);
        assert_eq!(droplets[0].id, DropletId::new(3_164_444));
        assert_eq!(droplets[0].name, "web-01");
        assert_eq!(droplets[0].tags, ["web"]);
    }

    #[tokio::test]
    async fn list_droplets_sends_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/droplets"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"droplets": []})))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let result = api
            .list_droplets(Some(Page::new(1, 10)))
            .unwrap()
            .outcome()
            .await;
        assert_eq!(result.value().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn droplet_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/droplets/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let result = api.droplet(DropletId::new(42)).unwrap().outcome().await;
        assert_eq!(result, ApiResult::Failure(None, FailureReason::Other));
    }

    #[tokio::test]
    async fn create_droplet_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/droplets"))
            .and(body_json(json!({
                "name": "web-01",
                "region": "nyc3",
                "size": "s-1vcpu-1gb",
                "image": "ubuntu-24-04-x64"
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "droplet": droplet_json(1, "web-01")
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let request = CreateDropletRequest::new("web-01", "nyc3", "s-1vcpu-1gb", "ubuntu-24-04-x64");
        let result = api.create_droplet(&request).unwrap().outcome().await;

        assert_eq!(result.value().unwrap().name, "web-01");
    }

    #[tokio::test]
    async fn delete_droplet_finalizes_empty() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/droplets/42"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let result = api.delete_droplet(DropletId::new(42)).unwrap().outcome().await;
        assert_eq!(result, ApiResult::Success(None));
    }

    #[tokio::test]
    async fn droplet_action_posts_wire_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/droplets/42/actions"))
            .and(body_json(json!({"type": "reboot"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {
                    "id": 123,
                    "status": "in-progress",
                    "type": "reboot",
                    "resource_id": 42,
                    "resource_type": "droplet"
                }
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let result = api
            .droplet_action(DropletId::new(42), &DropletAction::Reboot)
            .unwrap()
            .outcome()
            .await;

        let action = result.value().unwrap();
        assert_eq!(action.kind, "reboot");
        assert!(!action.is_finished());
    }

    #[tokio::test]
    async fn droplet_actions_lists_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/droplets/42/actions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "actions": [
                    {"id": 1, "status": "completed", "type": "power_on"},
                    {"id": 2, "status": "in-progress", "type": "snapshot"}
                ]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let result = api
            .droplet_actions(DropletId::new(42), None)
            .unwrap()
            .outcome()
            .await;

        let actions = result.value().unwrap();
        assert_eq!(actions.len(), 2);
        assert!(actions[0].is_finished());
    }
}
