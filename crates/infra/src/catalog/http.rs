use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use storefront_catalog::{PageNumber, Product};

use super::{CatalogError, CatalogService};

/// HTTP catalog client: `GET {base_url}/products?page={n}&limit={page_size}`,
/// expecting a JSON array of products.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, page_size: u32) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, page_size)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, page_size: u32) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
        }
    }

    /// Build a client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url, page_size))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn get_products(&self, page: PageNumber) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.base_url);
        debug!(%url, page = page.get(), "fetching catalog page");

        let resp = self
            .client
            .get(&url)
            .query(&[("page", page.get()), ("limit", self.page_size)])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status().as_u16()));
        }

        resp.json::<Vec<Product>>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use serde::Deserialize;
    use serde_json::{Value, json};

    #[derive(Deserialize)]
    struct PageQuery {
        page: u32,
        limit: u32,
    }

    async fn products(Query(q): Query<PageQuery>) -> Json<Value> {
        let start = (q.page - 1) * q.limit + 1;
        let items: Vec<Value> = (start..start + q.limit)
            .map(|id| json!({ "id": id, "title": format!("Product {id}"), "price": 1.5, "category": "jewelery", "image": "" }))
            .collect();
        Json(Value::Array(items))
    }

    struct TestServer {
        base_url: String,
        handle: tokio::task::JoinHandle<()>,
    }

    impl TestServer {
        async fn spawn(app: Router) -> Self {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind ephemeral port");
            let addr = listener.local_addr().unwrap();
            let handle = tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            Self {
                base_url: format!("http://{}", addr),
                handle,
            }
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    #[tokio::test]
    async fn fetches_requested_page() {
        let srv = TestServer::spawn(Router::new().route("/products", get(products))).await;
        let client = HttpCatalogClient::new(format!("{}/", srv.base_url), 3);

        let page = client.get_products(PageNumber::new(2).unwrap()).await.unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page[0].product_id().unwrap().as_str(), "4");
        assert_eq!(page[2].title(), "Product 6");
        assert_eq!(page[0].category(), "jewelery");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let app = Router::new().route("/products", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let srv = TestServer::spawn(app).await;
        let client = HttpCatalogClient::new(srv.base_url.clone(), 3);

        match client.get_products(PageNumber::FIRST).await.unwrap_err() {
            CatalogError::Status(503) => {}
            other => panic!("Expected Status(503), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_array_body_is_a_decode_error() {
        let app = Router::new().route("/products", get(|| async { Json(json!({ "error": "nope" })) }));
        let srv = TestServer::spawn(app).await;
        let client = HttpCatalogClient::new(srv.base_url.clone(), 3);

        assert!(matches!(
            client.get_products(PageNumber::FIRST).await,
            Err(CatalogError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client = HttpCatalogClient::with_timeout("http://127.0.0.1:9", 3, Duration::from_millis(500)).unwrap();

        assert!(matches!(
            client.get_products(PageNumber::FIRST).await,
            Err(CatalogError::Network(_))
        ));
    }
}
