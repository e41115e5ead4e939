//! Client-side core of the catalog admin: validated forms for products,
//! categories and sign-in, and the submission pipeline that persists them
//! through the catalog backend.

pub mod api;
pub mod auth;
pub mod category;
pub mod error;
pub mod form;
pub mod options;
pub mod photo;
pub mod pipeline;
pub mod product;
mod rules;
pub mod session;

pub use api::{CatalogApi, HttpCatalogApi};
pub use auth::LoginForm;
pub use category::{CategoryDraft, CategoryField, EditCategoryForm};
pub use error::{FormError, RequestError, SubmitError};
pub use form::{FieldValue, FormController, FormField, FormSchema, ValidationErrors};
pub use photo::{Photo, PhotoError};
pub use pipeline::{PhotoUploads, ProductSubmission, ProductSubmitted, UploadOutcome};
pub use product::{AddProductForm, EditProductForm, ProductDraft, ProductField};
pub use session::AuthSession;

#[cfg(test)]
#[path = "tests/fake_api.rs"]
mod fake_api;
