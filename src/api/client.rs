//! HTTP implementation of the products API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use super::ProductApi;
use crate::config::Config;
use crate::errors::AdminError;
use crate::models::{Product, ProductListResponse};
use crate::submit::ProductPayload;

/// Products API client authenticated with the session's bearer token.
#[derive(Clone)]
pub struct HttpProductApi {
    client: Client,
    products_url: String,
    session_token: Option<String>,
}

impl HttpProductApi {
    pub fn new(config: &Config) -> Result<Self, AdminError> {
        let client = Client::builder()
            .user_agent(concat!("pharmacy-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            products_url: config.products_url(),
            session_token: config.session_token.clone(),
        }
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    fn product_url(&self, id: &str) -> String {
        format!("{}/{}", self.products_url, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request, turning non-success statuses into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, AdminError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = AdminError::from_status_body(status.as_u16(), &body);
        tracing::warn!("Products API returned {}: {}", status, error.message());
        Err(error)
    }

    async fn read_product(response: Response) -> Result<Product, AdminError> {
        Ok(response.json::<Product>().await?)
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        tracing::debug!("GET {}", self.products_url);
        let request = self
            .client
            .get(&self.products_url)
            .query(&[("includeOutOfStock", "true")]);
        let response = self.send(request).await?;

        let list = response.json::<ProductListResponse>().await?;
        Ok(list.into_products())
    }

    async fn create_product(&self, payload: ProductPayload) -> Result<Product, AdminError> {
        tracing::debug!("POST {}", self.products_url);
        let request = self
            .client
            .post(&self.products_url)
            .multipart(payload.into_form()?);
        let response = self.send(request).await?;
        Self::read_product(response).await
    }

    async fn update_product(
        &self,
        id: &str,
        payload: ProductPayload,
    ) -> Result<Product, AdminError> {
        let url = self.product_url(id);
        tracing::debug!("PUT {}", url);
        let request = self.client.put(&url).multipart(payload.into_form()?);
        let response = self.send(request).await?;
        Self::read_product(response).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), AdminError> {
        let url = self.product_url(id);
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}
