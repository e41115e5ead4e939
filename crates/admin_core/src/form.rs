//! Field-level form state shared by every admin form.
//!
//! A [`FormController`] owns the current values of one form, recomputes
//! [`ValidationErrors`] as fields change and decides whether a submission may
//! proceed. The per-form rules live behind [`FormSchema`].

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    hash::Hash,
};

use tracing::debug;

use crate::error::FormError;

pub trait FormField: Copy + Eq + Hash + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// Raw input as delivered by a text box or a checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn into_text(self, field: &'static str) -> Result<String, FormError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Flag(_) => Err(FormError::FieldType {
                field,
                expected: "text",
            }),
        }
    }

    pub fn into_flag(self, field: &'static str) -> Result<bool, FormError> {
        match self {
            Self::Flag(flag) => Ok(flag),
            Self::Text(_) => Err(FormError::FieldType {
                field,
                expected: "boolean",
            }),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

pub trait FormSchema {
    type Field: FormField;
    type Values: Clone + fmt::Debug;

    /// Returns the message for `field`, or `None` when the field is valid.
    fn validate_field(values: &Self::Values, field: Self::Field) -> Option<String>;

    fn assign(
        values: &mut Self::Values,
        field: Self::Field,
        value: FieldValue,
    ) -> Result<(), FormError>;

    /// Fields whose rules read `field` and must be rechecked when it changes.
    fn dependents(_field: Self::Field) -> &'static [Self::Field] {
        &[]
    }
}

/// Field name to message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn field<F: FormField>(&self, field: F) -> Option<&str> {
        self.get(field.name())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationMode {
    pub on_change: bool,
    pub on_blur: bool,
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self {
            on_change: true,
            on_blur: true,
        }
    }
}

pub struct FormController<S: FormSchema> {
    values: S::Values,
    errors: ValidationErrors,
    touched: HashSet<S::Field>,
    mode: ValidationMode,
}

impl<S: FormSchema> fmt::Debug for FormController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("mode", &self.mode)
            .finish()
    }
}

impl<S: FormSchema> FormController<S> {
    pub fn new(values: S::Values) -> Self {
        Self::with_mode(values, ValidationMode::default())
    }

    pub fn with_mode(values: S::Values, mode: ValidationMode) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
            touched: HashSet::new(),
            mode,
        }
    }

    pub fn values(&self) -> &S::Values {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: S::Field) -> bool {
        self.touched.contains(&field)
    }

    /// Error text to render beneath `field`; untouched fields stay quiet.
    pub fn visible_error(&self, field: S::Field) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.field(field)
        } else {
            None
        }
    }

    pub fn set_field(
        &mut self,
        field: S::Field,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        S::assign(&mut self.values, field, value.into())?;
        if self.mode.on_change {
            self.revalidate(field);
            for dependent in S::dependents(field) {
                self.revalidate(*dependent);
            }
        }
        Ok(())
    }

    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let field = S::Field::from_name(name).ok_or_else(|| FormError::UnknownField(name.into()))?;
        self.set_field(field, value)
    }

    pub fn set_touched(&mut self, field: S::Field) {
        self.touched.insert(field);
        if self.mode.on_blur {
            self.revalidate(field);
        }
    }

    pub fn validate_all(&mut self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in S::Field::ALL {
            if let Some(message) = S::validate_field(&self.values, *field) {
                errors.insert(field.name(), message);
            }
        }
        self.errors = errors.clone();
        errors
    }

    /// Runs every rule and hands the values to `on_submit` only when all pass.
    /// On failure every field is marked touched so its error becomes visible.
    pub fn submit<R>(
        &mut self,
        on_submit: impl FnOnce(&S::Values) -> R,
    ) -> Result<R, ValidationErrors> {
        let errors = self.validate_all();
        if !errors.is_empty() {
            debug!("form: submit blocked invalid_fields={}", errors.len());
            self.touched.extend(S::Field::ALL.iter().copied());
            return Err(errors);
        }
        Ok(on_submit(&self.values))
    }

    /// Replaces the values wholesale and forgets errors and touched state.
    pub fn reset(&mut self, values: S::Values) {
        self.values = values;
        self.errors = ValidationErrors::new();
        self.touched.clear();
    }

    fn revalidate(&mut self, field: S::Field) {
        match S::validate_field(&self.values, field) {
            Some(message) => self.errors.insert(field.name(), message),
            None => {
                self.errors.remove(field.name());
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
