use shared::{domain::ProductStatus, protocol::Category};
use tracing::{error, info};

use crate::api::CatalogApi;

/// One entry of a single-select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub fn category_options(categories: &[Category]) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|category| SelectOption {
            value: category.id.to_string(),
            label: category.title.clone(),
        })
        .collect()
}

/// Fetches categories for the selector. A failed fetch leaves it empty.
pub async fn load_category_options(api: &dyn CatalogApi) -> Vec<SelectOption> {
    match api.fetch_categories().await {
        Ok(categories) => {
            info!("categories: loaded count={}", categories.len());
            category_options(&categories)
        }
        Err(err) => {
            error!("categories: fetch failed error={err}");
            Vec::new()
        }
    }
}

pub fn status_options() -> Vec<SelectOption> {
    ProductStatus::ALL
        .into_iter()
        .map(|status| SelectOption {
            value: status.as_str().to_string(),
            label: status.label().to_string(),
        })
        .collect()
}
