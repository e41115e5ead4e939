use std::sync::Arc;

use shared::domain::{ProductId, Route};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::{
    api::CatalogApi,
    error::SubmitError,
    photo::Photo,
    product::ProductDraft,
};

/// Persists a product draft: create first, then one upload per photo.
///
/// Uploads are started only after the backend confirms the create and are
/// never awaited before the caller is told where to navigate. A failed upload
/// is logged and leaves the created product in place.
#[derive(Clone)]
pub struct ProductSubmission {
    api: Arc<dyn CatalogApi>,
}

impl ProductSubmission {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, draft: ProductDraft) -> Result<ProductSubmitted, SubmitError> {
        let payload = draft.payload();
        let response = match self.api.create_product(&payload).await {
            Ok(response) => response,
            Err(err) => {
                error!("product: create failed title={:?} error={err}", payload.title);
                return Err(err.into());
            }
        };
        if !response.is_success() {
            warn!(
                "product: create answered non-success status={} title={:?}",
                response.status, payload.title
            );
            return Err(SubmitError::UnexpectedStatus(response.status));
        }

        let product_id = response.data.id;
        info!(
            "product: created product_id={product_id} photos={}",
            draft.photos.len()
        );
        let uploads = PhotoUploads::spawn(Arc::clone(&self.api), product_id, draft.photos);
        Ok(ProductSubmitted {
            product_id,
            navigate_to: Route::Products,
            uploads,
        })
    }
}

#[derive(Debug)]
pub struct ProductSubmitted {
    pub product_id: ProductId,
    pub navigate_to: Route,
    pub uploads: PhotoUploads,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Rejected { status: u16 },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub filename: String,
    pub outcome: UploadOutcome,
}

impl UploadReport {
    pub fn is_uploaded(&self) -> bool {
        self.outcome == UploadOutcome::Uploaded
    }
}

/// Photo uploads running in the background for one created product.
///
/// Dropping this detaches the uploads; they keep running.
#[derive(Debug, Default)]
pub struct PhotoUploads {
    tasks: Vec<(String, JoinHandle<UploadReport>)>,
}

impl PhotoUploads {
    fn spawn(api: Arc<dyn CatalogApi>, product_id: ProductId, photos: Vec<Photo>) -> Self {
        let tasks = photos
            .into_iter()
            .map(|photo| {
                let filename = photo.filename.clone();
                let api = Arc::clone(&api);
                let task = tokio::spawn(upload_photo(api, product_id, photo));
                (filename, task)
            })
            .collect();
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every upload, for callers that must not exit before them.
    pub async fn settle(self) -> Vec<UploadReport> {
        let (filenames, tasks): (Vec<_>, Vec<_>) = self.tasks.into_iter().unzip();
        futures::future::join_all(tasks)
            .await
            .into_iter()
            .zip(filenames)
            .map(|(joined, filename)| {
                joined.unwrap_or_else(|err| UploadReport {
                    filename,
                    outcome: UploadOutcome::Failed(format!("upload task aborted: {err}")),
                })
            })
            .collect()
    }
}

async fn upload_photo(
    api: Arc<dyn CatalogApi>,
    product_id: ProductId,
    photo: Photo,
) -> UploadReport {
    let filename = photo.filename.clone();
    let outcome = match api.upload_photo(product_id, photo).await {
        Ok(response) if response.is_success() => {
            info!("photo: uploaded product_id={product_id} filename={filename}");
            UploadOutcome::Uploaded
        }
        Ok(response) => {
            warn!(
                "photo: upload rejected product_id={product_id} filename={filename} status={}",
                response.status
            );
            UploadOutcome::Rejected {
                status: response.status,
            }
        }
        Err(err) => {
            warn!("photo: upload failed product_id={product_id} filename={filename} error={err}");
            UploadOutcome::Failed(err.to_string())
        }
    };
    UploadReport { filename, outcome }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
