use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CategoryId, ProductId},
    error::ApiErrorBody,
    protocol::{
        ApiResponse, Category, CategoryPayload, CreatedProduct, LoginRequest, LoginResponse,
        Product, ProductPayload, UploadedPhoto,
    },
};
use tracing::debug;
use url::Url;

use crate::{error::RequestError, photo::Photo, session::AuthSession};

/// The slice of the catalog backend the admin forms talk to.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<Category>, RequestError>;
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, RequestError>;
    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<CreatedProduct>, RequestError>;
    async fn update_product(
        &self,
        product_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<serde_json::Value>, RequestError>;
    async fn upload_photo(
        &self,
        product_id: ProductId,
        photo: Photo,
    ) -> Result<ApiResponse<UploadedPhoto>, RequestError>;
    async fn update_category(
        &self,
        category_id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<ApiResponse<serde_json::Value>, RequestError>;
    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<LoginResponse>, RequestError>;
}

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpCatalogApi {
    http: Client,
    base_url: String,
    session: AuthSession,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str, session: AuthSession) -> Result<Self> {
        Self::with_timeout(base_url, session, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, session: AuthSession, timeout: Duration) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("invalid api url '{base_url}'"))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, RequestError> {
        let request = match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        debug!("api: response status={}", status.as_u16());
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                message: ApiErrorBody::parse(&body).msg,
            });
        }
        let data = response.json::<T>().await?;
        Ok(ApiResponse::new(status.as_u16(), data))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_categories(&self) -> Result<Vec<Category>, RequestError> {
        let response = self
            .send(self.http.get(self.endpoint("/api/categories")))
            .await?;
        Ok(response.data)
    }

    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, RequestError> {
        let response = self
            .send(
                self.http
                    .get(self.endpoint(&format!("/api/products/{product_id}"))),
            )
            .await?;
        Ok(response.data)
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<CreatedProduct>, RequestError> {
        self.send(self.http.post(self.endpoint("/api/products")).json(payload))
            .await
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<serde_json::Value>, RequestError> {
        self.send(
            self.http
                .put(self.endpoint(&format!("/api/products/{product_id}")))
                .json(payload),
        )
        .await
    }

    async fn upload_photo(
        &self,
        product_id: ProductId,
        photo: Photo,
    ) -> Result<ApiResponse<UploadedPhoto>, RequestError> {
        let part = Part::bytes(photo.bytes)
            .file_name(photo.filename)
            .mime_str(&photo.mime_type)?;
        let form = Form::new()
            .part("image", part)
            .text("product_id", product_id.to_string());
        self.send(self.http.post(self.endpoint("/api/photos")).multipart(form))
            .await
    }

    async fn update_category(
        &self,
        category_id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<ApiResponse<serde_json::Value>, RequestError> {
        self.send(
            self.http
                .put(self.endpoint(&format!("/api/categories/{category_id}")))
                .json(payload),
        )
        .await
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<LoginResponse>, RequestError> {
        self.send(
            self.http
                .post(self.endpoint("/api/auth/login"))
                .json(&LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
        )
        .await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
