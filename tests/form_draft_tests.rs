use chrono::NaiveDate;
use vehicle_registration_form::{
    DraftStore, FieldErrorKind, FieldName, FileDraftStore, FormDraft, FormError,
    MemoryDraftStore, RegistrationRecord,
};

const KEY: &str = "form_data";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn mount<S: DraftStore>(store: S) -> FormDraft<S> {
    FormDraft::mount_with(store, KEY, today())
}

fn stored_mapping(store: &MemoryDraftStore) -> serde_json::Map<String, serde_json::Value> {
    let raw = store.raw(KEY).expect("draft slot should exist");
    serde_json::from_str(raw).expect("draft should be a JSON object")
}

fn fill_valid(form: &mut FormDraft<MemoryDraftStore>) {
    form.change(FieldName::VehicleNumber, "1").unwrap();
    form.change(FieldName::VehicleType, "car").unwrap();
    form.change_arrival_date(NaiveDate::from_ymd_opt(2024, 6, 15));
    form.change(FieldName::DriverFullName, "A B").unwrap();
    form.change(FieldName::PassportSeries, "1234").unwrap();
    form.change(FieldName::PassportNumber, "123456").unwrap();
    form.change(FieldName::IssuingAuthority, "X").unwrap();
    form.change(FieldName::IssueDate, "01.01.2020").unwrap();
}

#[test]
fn test_empty_value_is_missing_after_touch() {
    let mut form = mount(MemoryDraftStore::new());
    form.change_arrival_date(None);

    for field in FieldName::ALL {
        if field != FieldName::ArrivalDate {
            form.change(field, "").unwrap();
        }
        let error = form.visible_error(field).expect("error should be visible");
        assert_eq!(error.kind, FieldErrorKind::Missing, "{}", field);
    }
}

#[test]
fn test_empty_value_is_missing_after_submit() {
    let mut form = mount(MemoryDraftStore::new());
    form.change_arrival_date(None);

    assert!(matches!(form.submit(), Err(FormError::Validation(_))));
    for field in FieldName::ALL {
        assert_eq!(
            form.visible_error(field).map(|error| error.kind),
            Some(FieldErrorKind::Missing),
            "{}",
            field
        );
    }
}

#[test]
fn test_field_shape_rules() {
    let mut form = mount(MemoryDraftStore::new());

    form.change(FieldName::VehicleNumber, "12a3").unwrap();
    assert_eq!(
        form.error(FieldName::VehicleNumber).map(|e| e.kind),
        Some(FieldErrorKind::Malformed)
    );
    form.change(FieldName::VehicleNumber, "123").unwrap();
    assert!(form.error(FieldName::VehicleNumber).is_none());

    for series in ["123", "12345"] {
        form.change(FieldName::PassportSeries, series).unwrap();
        assert_eq!(
            form.error(FieldName::PassportSeries).map(|e| e.kind),
            Some(FieldErrorKind::Malformed)
        );
    }
    form.change(FieldName::PassportSeries, "1234").unwrap();
    assert!(form.error(FieldName::PassportSeries).is_none());

    form.change(FieldName::IssueDate, "01.02.2024").unwrap();
    assert!(form.error(FieldName::IssueDate).is_none());
    for bad in ["01-02-2024", "1.2.2024"] {
        form.change(FieldName::IssueDate, bad).unwrap();
        assert_eq!(
            form.error(FieldName::IssueDate).map(|e| e.kind),
            Some(FieldErrorKind::Malformed)
        );
    }
}

#[test]
fn test_draft_round_trip_on_remount() {
    let mut form = mount(MemoryDraftStore::new());
    form.change(FieldName::VehicleNumber, "777").unwrap();

    let remounted = mount(form.into_store());
    let expected = RegistrationRecord {
        vehicle_number: "777".to_string(),
        ..RegistrationRecord::empty(today())
    };
    assert_eq!(remounted.record(), &expected);
}

#[test]
fn test_empty_edit_leaves_draft_untouched() {
    let mut form = mount(MemoryDraftStore::new());
    form.change(FieldName::VehicleNumber, "777").unwrap();
    form.change(FieldName::VehicleType, "").unwrap();

    let mapping = stored_mapping(form.store());
    assert_eq!(mapping["auto_number"], "777");
    assert!(!mapping.contains_key("auto_type"));
}

#[test]
fn test_blanking_a_field_keeps_its_stale_draft_value() {
    let mut form = mount(MemoryDraftStore::new());
    form.change(FieldName::VehicleType, "truck").unwrap();
    form.change(FieldName::VehicleType, "").unwrap();

    assert_eq!(form.record().vehicle_type, "");
    assert_eq!(stored_mapping(form.store())["auto_type"], "truck");

    // Al recargar reaparece el valor anterior
    let remounted = mount(form.into_store());
    assert_eq!(remounted.record().vehicle_type, "truck");
}

#[test]
fn test_cancel_resets_record_and_draft() {
    let mut form = mount(MemoryDraftStore::new());
    fill_valid(&mut form);
    form.cancel();

    assert_eq!(form.record(), &RegistrationRecord::empty(today()));
    assert!(form.draft().load().is_none());

    let remounted = mount(form.into_store());
    assert_eq!(remounted.record(), &RegistrationRecord::empty(today()));
}

#[test]
fn test_full_valid_submission() {
    let mut form = mount(MemoryDraftStore::new());
    fill_valid(&mut form);

    let finalized = form.submit().expect("submission should succeed");
    assert_eq!(finalized.vehicle_number, "1");
    assert_eq!(finalized.vehicle_type, "car");
    assert_eq!(finalized.arrival_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    assert_eq!(finalized.driver_full_name, "A B");
    assert_eq!(finalized.passport_series, "1234");
    assert_eq!(finalized.passport_number, "123456");
    assert_eq!(finalized.issuing_authority, "X");
    assert_eq!(finalized.issue_date, "01.01.2020");
    assert_eq!(form.error_count(), 0);

    let rendered: serde_json::Value =
        serde_json::from_str(&finalized.render().unwrap()).unwrap();
    assert_eq!(rendered.as_object().unwrap().len(), 8);
    assert_eq!(rendered["date"], "2024-06-15");
}

#[test]
fn test_submit_does_not_write_the_draft() {
    let mut form = mount(MemoryDraftStore::new());
    fill_valid(&mut form);
    let before = form.store().raw(KEY).map(str::to_string);

    form.submit().unwrap();
    assert_eq!(form.store().raw(KEY).map(str::to_string), before);
}

#[test]
fn test_malformed_draft_mounts_with_defaults() {
    let store = MemoryDraftStore::with_entry(KEY, "{\"auto_number\": ");
    let mut form = mount(store);
    assert_eq!(form.record(), &RegistrationRecord::empty(today()));

    form.change(FieldName::VehicleType, "bus").unwrap();
    let mapping = stored_mapping(form.store());
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping["auto_type"], "bus");
}

#[test]
fn test_legacy_draft_with_unknown_keys() {
    let store = MemoryDraftStore::with_entry(
        KEY,
        r#"{"auto_number":"55","theme":"dark","date":"2024-02-20"}"#,
    );
    let mut form = mount(store);
    assert_eq!(form.record().vehicle_number, "55");
    assert_eq!(form.record().arrival_date, NaiveDate::from_ymd_opt(2024, 2, 20));

    form.change(FieldName::DriverFullName, "Иванов Иван").unwrap();
    let mapping = stored_mapping(form.store());
    assert_eq!(mapping["theme"], "dark");
    assert_eq!(mapping["fullname"], "Иванов Иван");
}

#[test]
fn test_draft_with_non_string_values_keeps_saved_fields() {
    let store = MemoryDraftStore::with_entry(KEY, r#"{"auto_number":"777","fullname":"A B","v":1}"#);
    let mut form = mount(store);
    assert_eq!(form.record().vehicle_number, "777");
    assert_eq!(form.record().driver_full_name, "A B");

    form.change(FieldName::VehicleType, "bus").unwrap();

    let mapping = stored_mapping(form.store());
    assert_eq!(mapping["auto_number"], "777");
    assert_eq!(mapping["fullname"], "A B");
    assert_eq!(mapping["v"], 1);
    assert_eq!(mapping["auto_type"], "bus");

    let remounted = mount(form.into_store());
    assert_eq!(remounted.record().vehicle_number, "777");
    assert_eq!(remounted.record().vehicle_type, "bus");
}

#[test]
fn test_non_string_value_for_known_field_is_skipped() {
    let store = MemoryDraftStore::with_entry(KEY, r#"{"auto_number":777,"auto_type":"car"}"#);
    let form = mount(store);
    assert_eq!(form.record().vehicle_number, "");
    assert_eq!(form.record().vehicle_type, "car");
}

#[test]
fn test_file_store_survives_remount() {
    let dir = tempfile::tempdir().unwrap();

    let mut form = mount(FileDraftStore::new(dir.path()));
    form.change(FieldName::PassportNumber, "654321").unwrap();
    drop(form);

    let remounted = mount(FileDraftStore::new(dir.path()));
    assert_eq!(remounted.record().passport_number, "654321");
    assert_eq!(remounted.record().vehicle_number, "");
}
