use super::common::*;
use crate::workflows::validation::{EMAIL_MESSAGE, IDENTIFICATION_MESSAGE};
use crate::workflows::work_with_us::{
    ApplicationWizard, FieldName, ProjectPhoto, ReferenceField, Specialty, TextField, WizardError,
};

#[test]
fn selecting_department_resets_municipality_and_loads_list() {
    let mut wizard = ApplicationWizard::new();
    fill_personal_data(&mut wizard);
    assert_eq!(wizard.profile().municipality, "Medellín");

    wizard.set_field(TextField::Department, "Valle del Cauca");

    assert_eq!(wizard.profile().department, "Valle del Cauca");
    assert!(wizard.profile().municipality.is_empty());
    for expected in ["Cali", "Palmira", "Buenaventura"] {
        assert!(
            wizard.municipalities().contains(&expected),
            "{expected} should be offered for Valle del Cauca"
        );
    }
}

#[test]
fn unknown_department_offers_no_municipalities() {
    let mut wizard = ApplicationWizard::new();
    wizard.set_department("Atlántida");
    assert!(wizard.municipalities().is_empty());
}

#[test]
fn toggling_otro_twice_drops_the_detail() {
    let mut wizard = ApplicationWizard::new();
    wizard.toggle_specialty(Specialty::Plomeria);
    wizard.toggle_specialty(Specialty::Otro);
    wizard.set_field(TextField::OtherSpecialtyDetail, "Soldadura");
    wizard.toggle_specialty(Specialty::Otro);

    let specialties = &wizard.profile().specialties;
    assert_eq!(specialties.selected(), vec![Specialty::Plomeria]);
    assert_eq!(specialties.other_detail(), None);

    wizard.set_field(TextField::OtherSpecialtyDetail, "ignorado");
    assert_eq!(wizard.profile().specialties.other_detail(), None);
}

#[test]
fn add_reference_appends_exactly_one_blank_row() {
    let mut wizard = ApplicationWizard::new();
    assert_eq!(wizard.profile().references.len(), 1);

    wizard.add_reference();

    let references = &wizard.profile().references;
    assert_eq!(references.len(), 2);
    assert!(references.get(1).is_some_and(|entry| entry.is_blank()));
}

#[test]
fn updating_missing_reference_is_an_error() {
    let mut wizard = ApplicationWizard::new();
    assert_eq!(
        wizard.update_reference(3, ReferenceField::Phone, "3001112233"),
        Err(WizardError::UnknownReference { index: 3 })
    );
}

#[test]
fn live_fields_validate_on_every_edit() {
    let mut wizard = ApplicationWizard::new();

    wizard.set_field(TextField::IdentificationNumber, "12ab");
    assert_eq!(
        wizard.error(FieldName::IdentificationNumber),
        Some(IDENTIFICATION_MESSAGE)
    );
    wizard.set_field(TextField::IdentificationNumber, "12345678");
    assert_eq!(wizard.error(FieldName::IdentificationNumber), None);

    wizard.set_field(TextField::Email, "juan@");
    assert_eq!(wizard.error(FieldName::Email), Some(EMAIL_MESSAGE));
    wizard.set_field(TextField::Email, "");
    assert_eq!(wizard.error(FieldName::Email), None);
}

#[test]
fn non_live_fields_only_clear_their_error() {
    let mut wizard = ApplicationWizard::new();
    assert!(wizard.advance().is_err());
    assert!(wizard.error(FieldName::FullName).is_some());

    wizard.set_field(TextField::FullName, " ");
    assert_eq!(wizard.error(FieldName::FullName), None);
}

#[test]
fn photos_can_be_attached_and_removed() {
    let mut wizard = ApplicationWizard::new();
    let photo = ProjectPhoto::new(
        "https://cdn.example.com/obra.jpg",
        "obra.jpg",
        "image/jpeg",
        350_000,
    )
    .expect("jpeg accepted");

    wizard.attach_photo(photo.clone());
    assert_eq!(wizard.profile().project_photos.len(), 1);
    assert_eq!(wizard.remove_photo(4), None);
    assert_eq!(wizard.remove_photo(0), Some(photo));
    assert!(wizard.profile().project_photos.is_empty());
}
