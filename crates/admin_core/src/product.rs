//! Product forms: the canonical draft, its field rules and the add/edit forms.

use shared::{
    domain::ProductStatus,
    protocol::{Product, ProductPayload},
};
use tracing::warn;

use crate::{
    error::{FormError, SubmitError},
    form::{FieldValue, FormController, FormField, FormSchema, ValidationErrors},
    photo::Photo,
    pipeline::{ProductSubmission, ProductSubmitted},
    rules::{self, Range},
};

/// Shown beneath the form when the backend rejects or never answers a save.
pub const SAVE_FAILED_MESSAGE: &str = "Something went wrong..";

const TITLE_MAX_CHARS: usize = 50;
const DESCRIPTION_MIN_CHARS: usize = 25;
const PRICE_RANGE: Range<'static> = Range {
    min: 0.0,
    max: 10_000.0,
    below_min: "Price can not be negative",
    above_max: "Max 10000",
};
const QUANTITY_RANGE: Range<'static> = Range {
    min: 0.0,
    max: 10_000.0,
    below_min: "Quantity can not be negative",
    above_max: "Max 10000",
};
const PRICE_TYPE_ERROR: &str = "Price must be a number";
const QUANTITY_TYPE_ERROR: &str = "Quantity must be an integer";
const STATUS_INVALID: &str = "Invalid value";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductField {
    Title,
    Category,
    Description,
    Price,
    Quantity,
    Status,
    Published,
}

impl FormField for ProductField {
    const ALL: &'static [Self] = &[
        Self::Title,
        Self::Category,
        Self::Description,
        Self::Price,
        Self::Quantity,
        Self::Status,
        Self::Published,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Description => "description",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::Status => "status",
            Self::Published => "published",
        }
    }
}

/// Product fields exactly as typed; numbers stay text until validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormValues {
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub status: String,
    pub published: bool,
}

impl Default for ProductFormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: String::new(),
            description: String::new(),
            price: "0".to_string(),
            quantity: "0".to_string(),
            status: String::new(),
            published: false,
        }
    }
}

impl From<&Product> for ProductFormValues {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            status: product.status.as_str().to_string(),
            published: product.published,
        }
    }
}

fn check_title(raw: &str) -> Result<String, String> {
    if let Some(message) = rules::required(raw)
        .or_else(|| rules::max_chars(raw, TITLE_MAX_CHARS, "Max number of characters is 50"))
    {
        return Err(message);
    }
    Ok(raw.to_string())
}

fn check_category(raw: &str) -> Result<String, String> {
    match rules::required(raw) {
        Some(message) => Err(message),
        None => Ok(raw.to_string()),
    }
}

fn check_description(raw: &str) -> Result<String, String> {
    if let Some(message) = rules::required(raw).or_else(|| {
        rules::min_chars(raw, DESCRIPTION_MIN_CHARS, "Min number of characters is 25")
    }) {
        return Err(message);
    }
    Ok(raw.to_string())
}

fn check_price(raw: &str) -> Result<f64, String> {
    if let Some(message) = rules::required(raw.trim()) {
        return Err(message);
    }
    let price = rules::parse_number(raw).ok_or_else(|| PRICE_TYPE_ERROR.to_string())?;
    match PRICE_RANGE.check(price) {
        Some(message) => Err(message),
        None => Ok(price),
    }
}

fn check_quantity(raw: &str) -> Result<u32, String> {
    if let Some(message) = rules::required(raw.trim()) {
        return Err(message);
    }
    let quantity = rules::parse_integer(raw).ok_or_else(|| QUANTITY_TYPE_ERROR.to_string())?;
    if let Some(message) = QUANTITY_RANGE.check(quantity) {
        return Err(message);
    }
    // Range check bounds the value to 0..=10000.
    Ok(quantity as u32)
}

fn check_status(raw: &str) -> Result<ProductStatus, String> {
    if let Some(message) = rules::required(raw) {
        return Err(message);
    }
    raw.parse::<ProductStatus>()
        .map_err(|_| STATUS_INVALID.to_string())
}

pub struct ProductSchema;

impl FormSchema for ProductSchema {
    type Field = ProductField;
    type Values = ProductFormValues;

    fn validate_field(values: &ProductFormValues, field: ProductField) -> Option<String> {
        match field {
            ProductField::Title => check_title(&values.title).err(),
            ProductField::Category => check_category(&values.category).err(),
            ProductField::Description => check_description(&values.description).err(),
            ProductField::Price => check_price(&values.price).err(),
            ProductField::Quantity => check_quantity(&values.quantity).err(),
            ProductField::Status => check_status(&values.status).err(),
            ProductField::Published => None,
        }
    }

    fn assign(
        values: &mut ProductFormValues,
        field: ProductField,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let name = field.name();
        match field {
            ProductField::Title => values.title = value.into_text(name)?,
            ProductField::Category => values.category = value.into_text(name)?,
            ProductField::Description => values.description = value.into_text(name)?,
            ProductField::Price => values.price = value.into_text(name)?,
            ProductField::Quantity => values.quantity = value.into_text(name)?,
            ProductField::Status => values.status = value.into_text(name)?,
            ProductField::Published => values.published = value.into_flag(name)?,
        }
        Ok(())
    }
}

/// The one product record every product form produces once its values pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub status: ProductStatus,
    pub published: bool,
    pub photos: Vec<Photo>,
}

impl ProductDraft {
    pub fn from_values(
        values: &ProductFormValues,
        photos: Vec<Photo>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = check_title(&values.title);
        let category = check_category(&values.category);
        let description = check_description(&values.description);
        let price = check_price(&values.price);
        let quantity = check_quantity(&values.quantity);
        let status = check_status(&values.status);

        match (title, category, description, price, quantity, status) {
            (Ok(title), Ok(category), Ok(description), Ok(price), Ok(quantity), Ok(status)) => {
                Ok(Self {
                    title,
                    category,
                    description,
                    price,
                    quantity,
                    status,
                    published: values.published,
                    photos,
                })
            }
            (title, category, description, price, quantity, status) => {
                let failures = [
                    (ProductField::Title, title.err()),
                    (ProductField::Category, category.err()),
                    (ProductField::Description, description.err()),
                    (ProductField::Price, price.err()),
                    (ProductField::Quantity, quantity.err()),
                    (ProductField::Status, status.err()),
                ];
                for (field, message) in failures {
                    if let Some(message) = message {
                        errors.insert(field.name(), message);
                    }
                }
                Err(errors)
            }
        }
    }

    pub fn payload(&self) -> ProductPayload {
        ProductPayload {
            title: self.title.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            status: self.status,
            published: self.published,
        }
    }
}

/// Creates a product and uploads its photos through [`ProductSubmission`].
#[derive(Debug)]
pub struct AddProductForm {
    controller: FormController<ProductSchema>,
    photos: Vec<Photo>,
    submit_error: Option<String>,
}

impl Default for AddProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddProductForm {
    pub fn new() -> Self {
        Self {
            controller: FormController::new(ProductFormValues::default()),
            photos: Vec::new(),
            submit_error: None,
        }
    }

    pub fn controller(&self) -> &FormController<ProductSchema> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController<ProductSchema> {
        &mut self.controller
    }

    /// Replaces the attached photos, mirroring a drop zone's current file list.
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos;
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Validates, creates the product and starts the photo uploads.
    ///
    /// On success the form is cleared and the caller gets the route to show
    /// next; uploads may still be running. On a request failure the entered
    /// values and photos are kept and [`Self::submit_error`] is set.
    pub async fn submit(
        &mut self,
        pipeline: &ProductSubmission,
    ) -> Result<ProductSubmitted, SubmitError> {
        self.submit_error = None;
        let photos = &self.photos;
        let draft = self
            .controller
            .submit(|values| ProductDraft::from_values(values, photos.clone()))
            .and_then(|draft| draft)
            .map_err(SubmitError::Invalid)?;

        match pipeline.submit(draft).await {
            Ok(submitted) => {
                self.controller.reset(ProductFormValues::default());
                self.photos.clear();
                Ok(submitted)
            }
            Err(err) => {
                warn!("product: add form kept values after failure error={err}");
                self.submit_error = Some(SAVE_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }
}

/// Edits an existing product. Persisting the result is left to the caller.
#[derive(Debug)]
pub struct EditProductForm {
    controller: FormController<ProductSchema>,
}

impl EditProductForm {
    pub fn new(product: &Product) -> Self {
        Self {
            controller: FormController::new(ProductFormValues::from(product)),
        }
    }

    pub fn controller(&self) -> &FormController<ProductSchema> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController<ProductSchema> {
        &mut self.controller
    }

    pub fn reinitialize(&mut self, product: &Product) {
        self.controller.reset(ProductFormValues::from(product));
    }

    pub fn submit<R>(
        &mut self,
        on_submit: impl FnOnce(ProductDraft) -> R,
    ) -> Result<R, ValidationErrors> {
        let draft = self
            .controller
            .submit(|values| ProductDraft::from_values(values, Vec::new()))
            .and_then(|draft| draft)?;
        Ok(on_submit(draft))
    }
}

#[cfg(test)]
#[path = "tests/product_tests.rs"]
mod tests;
