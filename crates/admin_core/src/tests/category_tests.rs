use super::*;

fn form() -> EditCategoryForm {
    EditCategoryForm::new("Lamps", "Lights for every desk")
}

#[test]
fn form_starts_from_caller_values() {
    let form = form();
    assert_eq!(
        form.controller().values(),
        &CategoryDraft::new("Lamps", "Lights for every desk")
    );
    assert!(form.controller().errors().is_empty());
}

#[test]
fn submit_delegates_new_values_to_the_owner() {
    let mut form = form();
    form.controller_mut()
        .set_field(CategoryField::Title, "Desk lamps")
        .expect("title");

    let mut received = None;
    form.submit(|draft| received = Some(draft)).expect("valid");
    assert_eq!(
        received,
        Some(CategoryDraft::new("Desk lamps", "Lights for every desk"))
    );
}

#[test]
fn change_validation_flags_cleared_title() {
    let mut form = form();
    form.controller_mut()
        .set_field(CategoryField::Title, "")
        .expect("title");
    assert_eq!(
        form.controller().errors().field(CategoryField::Title),
        Some("Required")
    );
    assert_eq!(form.controller().visible_error(CategoryField::Title), None);

    form.controller_mut().set_touched(CategoryField::Title);
    assert_eq!(
        form.controller().visible_error(CategoryField::Title),
        Some("Required")
    );
}

#[test]
fn invalid_category_is_not_delegated() {
    let mut form = form();
    form.controller_mut()
        .set_field(CategoryField::Title, "z".repeat(51))
        .expect("title");

    let mut delegated = false;
    let errors = form.submit(|_| delegated = true).expect_err("too long");
    assert!(!delegated);
    assert_eq!(
        errors.field(CategoryField::Title),
        Some("Max number of characters is 50")
    );
}

#[test]
fn reinitialize_picks_up_new_caller_values() {
    let mut form = form();
    form.controller_mut()
        .set_field(CategoryField::Description, "")
        .expect("description");

    form.reinitialize("Chairs", "Somewhere to sit");
    assert_eq!(form.controller().values().title, "Chairs");
    assert!(form.controller().errors().is_empty());
}

#[test]
fn payload_mirrors_the_draft() {
    let payload = CategoryDraft::new("Lamps", "Lights").payload();
    assert_eq!(payload.title, "Lamps");
    assert_eq!(payload.description, "Lights");
}
