//! Convenience requests for block-storage volumes.
//!
//! Thin mapping layer over the `marlin-core` engine; volumes can be
//! addressed by id or by name+region filter.

use marlin_core::client::Api;
use marlin_core::endpoint::Endpoint;
use marlin_core::handle::Handle;
use marlin_core::ids::VolumeId;
use marlin_core::query::Page;
use marlin_core::Result;
use reqwest::Method;

use crate::models::{CreateVolumeRequest, Volume, VolumeFilter};

/// Volume requests, implemented for [`Api`].
pub trait VolumeRequests {
    /// List volumes on the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn list_volumes(&self, page: Option<Page>) -> Result<Handle<Vec<Volume>>>;

    /// Fetch a single volume by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn volume(&self, id: VolumeId) -> Result<Handle<Volume>>;

    /// Fetch volumes matching a name+region filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn volumes_named(&self, filter: &VolumeFilter) -> Result<Handle<Vec<Volume>>>;

    /// Create a volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the payload cannot
    /// be serialized.
    fn create_volume(&self, request: &CreateVolumeRequest) -> Result<Handle<Volume>>;

    /// Delete a volume by id. Success carries no payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn delete_volume(&self, id: VolumeId) -> Result<Handle<Volume>>;

    /// Delete volumes matching a name+region filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn delete_volumes_named(&self, filter: &VolumeFilter) -> Result<Handle<Volume>>;
}

impl VolumeRequests for Api {
    fn list_volumes(&self, page: Option<Page>) -> Result<Handle<Vec<Volume>>> {
        let request =
            self.request_to(&Endpoint::Volumes, Method::GET, Option::<&()>::None, page, &[])?;
        let handle = self.task(request).key_path("volumes").build();
        handle.resume();
        Ok(handle)
    }

    fn volume(&self, id: VolumeId) -> Result<Handle<Volume>> {
        let request = self.request_to(
            &Endpoint::Volume(id),
            Method::GET,
            Option::<&()>::None,
            None,
            &[],
        )?;
        let handle = self.task(request).key_path("volume").build();
        handle.resume();
        Ok(handle)
    }

    fn volumes_named(&self, filter: &VolumeFilter) -> Result<Handle<Vec<Volume>>> {
        let pairs = filter.to_pairs();
        let request = self.request_to(
            &Endpoint::Volumes,
            Method::GET,
            Option::<&()>::None,
            None,
            &pairs,
        )?;
        let handle = self.task(request).key_path("volumes").build();
        handle.resume();
        Ok(handle)
    }

    fn create_volume(&self, request: &CreateVolumeRequest) -> Result<Handle<Volume>> {
        let request = self.request_to(&Endpoint::Volumes, Method::POST, Some(request), None, &[])?;
        let handle = self.task(request).key_path("volume").build();
        handle.resume();
        Ok(handle)
    }

    fn delete_volume(&self, id: VolumeId) -> Result<Handle<Volume>> {
        let request = self.request_to(
            &Endpoint::Volume(id),
            Method::DELETE,
            Option::<&()>::None,
            None,
            &[],
        )?;
        let handle = self.task(request).build();
        handle.resume();
        Ok(handle)
    }

    fn delete_volumes_named(&self, filter: &VolumeFilter) -> Result<Handle<Volume>> {
        let pairs = filter.to_pairs();
        let request = self.request_to(
            &Endpoint::Volumes,
            Method::DELETE,
            Option::<&()>::None,
            None,
            &pairs,
        )?;
        let handle = self.task(request).build();
        handle.resume();
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marlin_core::config::{ApiConfig, ApiVersion};
    use marlin_core::result::ApiResult;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VOLUME_ID: &str = "506f78a4-e098-11e5-ad9f-000f53306ae1";

    async fn api_for(server: &MockServer) -> Api {
        let config = ApiConfig::new(ApiVersion::V2, "ab837378789f2a87")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        Api::new(config).unwrap()
    }

    fn volume_json(name: &str) -> serde_json::Value {
        json!({
            "id": VOLUME_ID,
            "name": name,
            "description": "test volume",
            "size_gigabytes": 10,
            "droplet_ids": [123],
            "created_at": "2016-10-07T12:08:02Z"
        })
    }

    #[tokio::test]
    async fn list_volumes_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volumes": [volume_json("test")]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let result = api.list_volumes(None).unwrap().outcome().await;

        let volumes = result.value().unwrap();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].name, "test");
        assert_eq!(volumes[0].size_gigabytes, 10);
    }

    #[tokio::test]
    async fn volume_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/volumes/{VOLUME_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volume": volume_json("test")
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let id = VolumeId::parse_str(VOLUME_ID).unwrap();
        let result = api.volume(id).unwrap().outcome().await;

        assert_eq!(result.value().unwrap().id, id);
    }

    #[tokio::test]
    async fn volumes_named_sends_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .and(query_param("name", "test"))
            .and(query_param("region", "nyc3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volumes": [volume_json("test")]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let filter = VolumeFilter::new("test", "nyc3");
        let result = api.volumes_named(&filter).unwrap().outcome().await;

        assert_eq!(result.value().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_volume_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volumes"))
            .and(body_json(json!({
                "size_gigabytes": 10,
                "name": "test",
                "region": "nyc3"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "volume": volume_json("test")
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let request = CreateVolumeRequest::new(10, "test", "nyc3");
        let result = api.create_volume(&request).unwrap().outcome().await;

        assert_eq!(result.value().unwrap().name, "test");
    }

    #[tokio::test]
    async fn delete_volume_finalizes_empty() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/volumes/{VOLUME_ID}")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let id = VolumeId::parse_str(VOLUME_ID).unwrap();
        let result = api.delete_volume(id).unwrap().outcome().await;

        assert_eq!(result, ApiResult::Success(None));
    }

    #[tokio::test]
    async fn delete_volumes_named_sends_filter() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/volumes"))
            .and(query_param("name", "test"))
            .and(query_param("region", "nyc3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let filter = VolumeFilter::new("test", "nyc3");
        let result = api.delete_volumes_named(&filter).unwrap().outcome().await;

        assert_eq!(result, ApiResult::Success(None));
    }
}
