use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PasswordField {
    Password,
    Confirm,
    Remember,
}

impl FormField for PasswordField {
    const ALL: &'static [Self] = &[Self::Password, Self::Confirm, Self::Remember];

    fn name(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Confirm => "confirm",
            Self::Remember => "remember",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct PasswordValues {
    password: String,
    confirm: String,
    remember: bool,
}

struct PasswordSchema;

impl FormSchema for PasswordSchema {
    type Field = PasswordField;
    type Values = PasswordValues;

    fn validate_field(values: &PasswordValues, field: PasswordField) -> Option<String> {
        match field {
            PasswordField::Password if values.password.is_empty() => Some("Required".into()),
            PasswordField::Confirm if values.confirm != values.password => {
                Some("Passwords differ".into())
            }
            _ => None,
        }
    }

    fn assign(
        values: &mut PasswordValues,
        field: PasswordField,
        value: FieldValue,
    ) -> Result<(), FormError> {
        match field {
            PasswordField::Password => values.password = value.into_text(field.name())?,
            PasswordField::Confirm => values.confirm = value.into_text(field.name())?,
            PasswordField::Remember => values.remember = value.into_flag(field.name())?,
        }
        Ok(())
    }

    fn dependents(field: PasswordField) -> &'static [PasswordField] {
        match field {
            PasswordField::Password => &[PasswordField::Confirm],
            _ => &[],
        }
    }
}

fn controller() -> FormController<PasswordSchema> {
    FormController::new(PasswordValues::default())
}

#[test]
fn change_revalidates_field_and_clears_it_once_valid() {
    let mut form = controller();
    form.set_field(PasswordField::Password, "").expect("set");
    assert_eq!(form.errors().get("password"), Some("Required"));

    form.set_field(PasswordField::Password, "hunter22").expect("set");
    assert!(!form.errors().contains("password"));
}

#[test]
fn change_rechecks_cross_field_dependents() {
    let mut form = controller();
    form.set_field(PasswordField::Confirm, "abc").expect("set");
    assert_eq!(form.errors().get("confirm"), Some("Passwords differ"));

    form.set_field(PasswordField::Password, "abc").expect("set");
    assert!(!form.errors().contains("confirm"));
}

#[test]
fn untouched_errors_stay_hidden_until_blur() {
    let mut form = controller();
    form.set_field(PasswordField::Password, "").expect("set");
    assert_eq!(form.visible_error(PasswordField::Password), None);

    form.set_touched(PasswordField::Password);
    assert_eq!(form.visible_error(PasswordField::Password), Some("Required"));
}

#[test]
fn without_change_validation_errors_wait_for_blur() {
    let mut form = FormController::<PasswordSchema>::with_mode(
        PasswordValues::default(),
        ValidationMode {
            on_change: false,
            on_blur: true,
        },
    );
    form.set_field(PasswordField::Password, "").expect("set");
    assert!(form.errors().is_empty());

    form.set_touched(PasswordField::Password);
    assert_eq!(form.errors().get("password"), Some("Required"));
}

#[test]
fn submit_with_errors_skips_callback_and_touches_everything() {
    let mut form = controller();
    let mut called = false;
    let errors = form
        .submit(|_| called = true)
        .expect_err("empty password must block submit");

    assert!(!called);
    assert_eq!(errors.get("password"), Some("Required"));
    assert!(PasswordField::ALL.iter().all(|field| form.is_touched(*field)));
    assert_eq!(form.visible_error(PasswordField::Password), Some("Required"));
}

#[test]
fn submit_hands_current_values_to_callback() {
    let mut form = controller();
    form.set_field(PasswordField::Password, "pw").expect("set");
    form.set_field(PasswordField::Confirm, "pw").expect("set");
    form.set_field(PasswordField::Remember, true).expect("set");

    let remembered = form.submit(|values| values.remember).expect("valid");
    assert!(remembered);
}

#[test]
fn wrong_value_kind_is_rejected() {
    let mut form = controller();
    let err = form
        .set_field(PasswordField::Remember, "yes")
        .expect_err("flag field");
    assert_eq!(
        err,
        FormError::FieldType {
            field: "remember",
            expected: "boolean"
        }
    );
}

#[test]
fn fields_can_be_addressed_by_name() {
    let mut form = controller();
    form.set_field_by_name("password", "pw").expect("known field");
    assert_eq!(form.values().password, "pw");

    let err = form
        .set_field_by_name("username", "bob")
        .expect_err("unknown field");
    assert_eq!(err, FormError::UnknownField("username".into()));
}

#[test]
fn reset_forgets_errors_and_touched_state() {
    let mut form = controller();
    let _ = form.submit(|_| ());
    form.reset(PasswordValues {
        password: "new".into(),
        confirm: "new".into(),
        remember: false,
    });

    assert!(form.errors().is_empty());
    assert!(!form.is_touched(PasswordField::Password));
    assert_eq!(form.values().password, "new");
}

#[test]
fn errors_display_in_field_order() {
    let mut errors = ValidationErrors::new();
    errors.insert("title", "Required");
    errors.insert("price", "Max 10000");
    assert_eq!(errors.to_string(), "price: Max 10000; title: Required");
}
