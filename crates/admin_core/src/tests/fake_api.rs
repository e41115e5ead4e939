//! In-process stand-in for the catalog backend used by form and pipeline tests.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{CategoryId, ProductId},
    protocol::{
        ApiResponse, Category, CategoryPayload, CreatedProduct, LoginResponse, Product,
        ProductPayload, UploadedPhoto,
    },
};
use tokio::sync::{Mutex, Notify, Semaphore};

use crate::{api::CatalogApi, error::RequestError, photo::Photo};

pub(crate) struct FakeCatalogApi {
    create_result: Result<ApiResponse<CreatedProduct>, RequestError>,
    login_result: Result<ApiResponse<LoginResponse>, RequestError>,
    categories_result: Result<Vec<Category>, RequestError>,
    failing_upload: Option<String>,
    upload_gate: Arc<Semaphore>,
    login_gate: Option<Arc<Notify>>,
    pub(crate) create_calls: Mutex<Vec<ProductPayload>>,
    pub(crate) uploads_issued: Mutex<Vec<(ProductId, String)>>,
    pub(crate) uploads_completed: Mutex<Vec<String>>,
    pub(crate) login_calls: Mutex<Vec<(String, String)>>,
}

pub(crate) fn created(status: u16, id: i64) -> ApiResponse<CreatedProduct> {
    ApiResponse::new(
        status,
        CreatedProduct {
            id: ProductId(id),
            rest: serde_json::Map::new(),
        },
    )
}

impl FakeCatalogApi {
    pub(crate) fn new() -> Self {
        Self {
            create_result: Ok(created(200, 1)),
            login_result: Ok(ApiResponse::new(
                200,
                LoginResponse {
                    token: "token-1".to_string(),
                },
            )),
            categories_result: Ok(Vec::new()),
            failing_upload: None,
            upload_gate: Arc::new(Semaphore::new(Semaphore::MAX_PERMITS)),
            login_gate: None,
            create_calls: Mutex::new(Vec::new()),
            uploads_issued: Mutex::new(Vec::new()),
            uploads_completed: Mutex::new(Vec::new()),
            login_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_create(
        mut self,
        result: Result<ApiResponse<CreatedProduct>, RequestError>,
    ) -> Self {
        self.create_result = result;
        self
    }

    pub(crate) fn with_login(
        mut self,
        result: Result<ApiResponse<LoginResponse>, RequestError>,
    ) -> Self {
        self.login_result = result;
        self
    }

    pub(crate) fn with_categories(mut self, result: Result<Vec<Category>, RequestError>) -> Self {
        self.categories_result = result;
        self
    }

    pub(crate) fn with_failing_upload(mut self, filename: &str) -> Self {
        self.failing_upload = Some(filename.to_string());
        self
    }

    /// Holds every upload until permits are added to the returned gate.
    pub(crate) fn with_closed_upload_gate(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.upload_gate = Arc::clone(&gate);
        (self, gate)
    }

    /// Holds the login request open until the returned notify fires.
    pub(crate) fn with_held_login(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.login_gate = Some(Arc::clone(&gate));
        (self, gate)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalogApi {
    async fn fetch_categories(&self) -> Result<Vec<Category>, RequestError> {
        self.categories_result.clone()
    }

    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, RequestError> {
        Err(RequestError::Status {
            status: 404,
            message: Some(format!("product {product_id} not found")),
        })
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<CreatedProduct>, RequestError> {
        self.create_calls.lock().await.push(payload.clone());
        self.create_result.clone()
    }

    async fn update_product(
        &self,
        _product_id: ProductId,
        _payload: &ProductPayload,
    ) -> Result<ApiResponse<serde_json::Value>, RequestError> {
        Ok(ApiResponse::new(200, serde_json::Value::Null))
    }

    async fn upload_photo(
        &self,
        product_id: ProductId,
        photo: Photo,
    ) -> Result<ApiResponse<UploadedPhoto>, RequestError> {
        self.uploads_issued
            .lock()
            .await
            .push((product_id, photo.filename.clone()));
        let _permit = self
            .upload_gate
            .acquire()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        self.uploads_completed
            .lock()
            .await
            .push(photo.filename.clone());
        if self.failing_upload.as_deref() == Some(photo.filename.as_str()) {
            return Err(RequestError::Status {
                status: 500,
                message: None,
            });
        }
        Ok(ApiResponse::new(
            200,
            UploadedPhoto {
                id: None,
                url: Some(format!("/photos/{}", photo.filename)),
            },
        ))
    }

    async fn update_category(
        &self,
        _category_id: CategoryId,
        _payload: &CategoryPayload,
    ) -> Result<ApiResponse<serde_json::Value>, RequestError> {
        Ok(ApiResponse::new(200, serde_json::Value::Null))
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<LoginResponse>, RequestError> {
        self.login_calls
            .lock()
            .await
            .push((email.to_string(), password.to_string()));
        if let Some(gate) = &self.login_gate {
            gate.notified().await;
        }
        self.login_result.clone()
    }
}
