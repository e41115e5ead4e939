use shared::protocol::{Category, CategoryPayload};

use crate::{
    error::FormError,
    form::{FieldValue, FormController, FormField, FormSchema, ValidationErrors},
    rules,
};

const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryField {
    Title,
    Description,
}

impl FormField for CategoryField {
    const ALL: &'static [Self] = &[Self::Title, Self::Description];

    fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub title: String,
    pub description: String,
}

impl CategoryDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn payload(&self) -> CategoryPayload {
        CategoryPayload {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self::new(category.title.clone(), category.description.clone())
    }
}

pub struct CategorySchema;

impl FormSchema for CategorySchema {
    type Field = CategoryField;
    type Values = CategoryDraft;

    fn validate_field(values: &CategoryDraft, field: CategoryField) -> Option<String> {
        match field {
            CategoryField::Title => rules::required(&values.title).or_else(|| {
                rules::max_chars(&values.title, TITLE_MAX_CHARS, "Max number of characters is 50")
            }),
            CategoryField::Description => rules::required(&values.description),
        }
    }

    fn assign(
        values: &mut CategoryDraft,
        field: CategoryField,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let text = value.into_text(field.name())?;
        match field {
            CategoryField::Title => values.title = text,
            CategoryField::Description => values.description = text,
        }
        Ok(())
    }
}

/// Edits a category supplied by the caller and hands the result back to it.
#[derive(Debug)]
pub struct EditCategoryForm {
    controller: FormController<CategorySchema>,
}

impl EditCategoryForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            controller: FormController::new(CategoryDraft::new(title, description)),
        }
    }

    pub fn controller(&self) -> &FormController<CategorySchema> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController<CategorySchema> {
        &mut self.controller
    }

    /// Picks up a new title/description from the caller, dropping edits.
    pub fn reinitialize(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.controller
            .reset(CategoryDraft::new(title, description));
    }

    pub fn submit<R>(
        &mut self,
        on_submit: impl FnOnce(CategoryDraft) -> R,
    ) -> Result<R, ValidationErrors> {
        self.controller.submit(|values| on_submit(values.clone()))
    }
}

#[cfg(test)]
#[path = "tests/category_tests.rs"]
mod tests;
