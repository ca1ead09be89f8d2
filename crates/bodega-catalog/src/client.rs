//! # Catalog Client
//!
//! Thin GET-and-decode client for the catalog API.
//!
//! ## Request Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CatalogClient                              │
//! │                                                                 │
//! │  fetch("/products", &[("limit", "5")])                          │
//! │      GET {base_url}/products?limit=5                            │
//! │                                                                 │
//! │  fetch_by_id("/products", 3, &[])                               │
//! │      GET {base_url}/products/3                                  │
//! │                                                                 │
//! │  Both decode the JSON body into the caller's type. Non-2xx      │
//! │  short-circuits before decoding.                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// HTTP client for the remote catalog.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Creates a client from the given config.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(CatalogClient { client, config })
    }

    /// Creates a client against the default catalog.
    pub fn with_defaults() -> CatalogResult<Self> {
        Self::new(CatalogConfig::default())
    }

    /// The config this client was built with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fetches a collection resource.
    ///
    /// `endpoint` is appended verbatim to the base URL (include the leading
    /// slash). `params` become the query string; pass `&[]` for none.
    pub async fn fetch<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> CatalogResult<T>
    where
        T: DeserializeOwned,
    {
        self.request(self.endpoint_url(endpoint), params).await
    }

    /// Fetches a single resource by identifier.
    pub async fn fetch_by_id<T>(
        &self,
        endpoint: &str,
        id: impl std::fmt::Display,
        params: &[(&str, &str)],
    ) -> CatalogResult<T>
    where
        T: DeserializeOwned,
    {
        self.request(self.item_url(endpoint, id), params).await
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    fn item_url(&self, endpoint: &str, id: impl std::fmt::Display) -> String {
        format!("{}{}/{}", self.config.base_url, endpoint, id)
    }

    async fn request<T>(&self, url: String, params: &[(&str, &str)]) -> CatalogResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(url = %url, "Fetching catalog resource");

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Catalog request rejected");
            return Err(CatalogError::Status {
                code: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Binds a loopback listener that serves one canned response and returns
    /// the raw request it received.
    fn one_shot_server(response: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 2048];
            let n = stream.read(&mut buf).unwrap_or(0);
            stream.write_all(response).unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn client_for(base_url: String) -> CatalogClient {
        CatalogClient::new(CatalogConfig::new().with_base_url(base_url)).unwrap()
    }

    const OK_LIST: &[u8] = b"HTTP/1.1 200 OK\r\n\
        content-type: application/json\r\n\
        content-length: 7\r\n\
        connection: close\r\n\r\n[1,2,3]";

    const OK_EMPTY_LIST: &[u8] = b"HTTP/1.1 200 OK\r\n\
        content-type: application/json\r\n\
        content-length: 2\r\n\
        connection: close\r\n\r\n[]";

    const OK_OBJECT: &[u8] = b"HTTP/1.1 200 OK\r\n\
        content-type: application/json\r\n\
        content-length: 8\r\n\
        connection: close\r\n\r\n{\"id\":3}";

    const NOT_FOUND: &[u8] = b"HTTP/1.1 404 Not Found\r\n\
        content-length: 0\r\n\
        connection: close\r\n\r\n";

    const OK_GARBAGE: &[u8] = b"HTTP/1.1 200 OK\r\n\
        content-type: application/json\r\n\
        content-length: 9\r\n\
        connection: close\r\n\r\nnot json!";

    #[test]
    fn test_url_building() {
        let client = CatalogClient::with_defaults().unwrap();
        assert_eq!(
            client.endpoint_url("/products"),
            "https://fakestoreapi.com/products"
        );
        assert_eq!(
            client.item_url("/products", 3),
            "https://fakestoreapi.com/products/3"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_decodes_payload() {
        let (base_url, server) = one_shot_server(OK_LIST);
        let client = client_for(base_url);

        let items: Vec<i64> = client.fetch("/products", &[]).await.unwrap();
        assert_eq!(items, vec![1, 2, 3]);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /products "), "got: {request}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_appends_query_params() {
        let (base_url, server) = one_shot_server(OK_EMPTY_LIST);
        let client = client_for(base_url);

        let items: Vec<i64> = client.fetch("/products", &[("limit", "5")]).await.unwrap();
        assert!(items.is_empty());

        let request = server.join().unwrap();
        assert!(
            request.starts_with("GET /products?limit=5 "),
            "got: {request}"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_by_id_builds_path() {
        #[derive(Deserialize)]
        struct Product {
            id: i64,
        }

        let (base_url, server) = one_shot_server(OK_OBJECT);
        let client = client_for(base_url);

        let product: Product = client.fetch_by_id("/products", 3, &[]).await.unwrap();
        assert_eq!(product.id, 3);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /products/3 "), "got: {request}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_2xx_maps_to_status_error() {
        let (base_url, server) = one_shot_server(NOT_FOUND);
        let client = client_for(base_url);

        let result: CatalogResult<Vec<i64>> = client.fetch("/products", &[]).await;
        match result {
            Err(CatalogError::Status { code }) => assert_eq!(code, 404),
            other => panic!("expected status error, got {:?}", other.err()),
        }

        server.join().unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_invalid_body_maps_to_decode_error() {
        let (base_url, server) = one_shot_server(OK_GARBAGE);
        let client = client_for(base_url);

        let result: CatalogResult<Vec<i64>> = client.fetch("/products", &[]).await;
        assert!(matches!(result, Err(CatalogError::Decode(_))));

        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_unparseable_url_is_transport_error() {
        let client = client_for("not a url".to_string());

        let result: CatalogResult<Vec<i64>> = client.fetch("/products", &[]).await;
        assert!(matches!(result, Err(CatalogError::Transport(_))));
    }
}
