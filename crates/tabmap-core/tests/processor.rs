use proptest::prelude::*;
use tabmap_core::{BatchOutcome, ProcessOptions, process, process_with_options};
use tabmap_model::{FieldDefinition, FieldKind, FieldValue, Mapping, RawRow, SchemaDefinition};

fn customer_schema() -> SchemaDefinition {
    SchemaDefinition::new(
        "Customer",
        vec![
            FieldDefinition::new("email", FieldKind::Email).required(true),
            FieldDefinition::new("phone", FieldKind::Text),
        ],
    )
    .expect("schema")
}

fn customer_mapping() -> Mapping {
    Mapping::from_entries([("E-mail", Some("email")), ("Phone#", Some("phone"))])
}

fn row(email: &str, phone: &str) -> RawRow {
    [("E-mail", email), ("Phone#", phone)].into_iter().collect()
}

#[test]
fn customer_rows_split_into_processed_and_rejected() {
    let rows = vec![row("a@b.com", "123"), row("bad", "")];
    let outcome = process(&customer_schema(), &customer_mapping(), &rows);

    assert_eq!(outcome.valid_count(), 1);
    assert_eq!(outcome.invalid_count(), 1);
    assert_eq!(outcome.total_rows(), 2);

    let record = &outcome.processed[0];
    assert_eq!(record.get("email"), Some(&FieldValue::Text("a@b.com".into())));
    assert_eq!(record.get("phone"), Some(&FieldValue::Text("123".into())));

    let rejected = &outcome.rejected[0];
    assert_eq!(rejected.row_index, 1);
    assert_eq!(rejected.raw_row, rows[1]);
    assert_eq!(rejected.errors.len(), 1);
    assert_eq!(rejected.errors[0].field, "email");
    assert_eq!(rejected.errors[0].value, "bad");
    assert_eq!(rejected.errors[0].error, "Invalid email format: bad");
}

#[test]
fn rejected_rows_collect_every_field_error() {
    let schema = SchemaDefinition::new(
        "T",
        vec![
            FieldDefinition::new("age", FieldKind::Integer).required(true),
            FieldDefinition::new("active", FieldKind::Boolean),
        ],
    )
    .expect("schema");
    let mapping = Mapping::from_entries([("Age", Some("age")), ("Active", Some("active"))]);
    let rows: Vec<RawRow> = vec![[("Age", "old"), ("Active", "maybe")].into_iter().collect()];

    let outcome = process(&schema, &mapping, &rows);
    assert!(outcome.processed.is_empty());
    let fields: Vec<&str> = outcome.rejected[0]
        .errors
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(fields, ["age", "active"]);
}

#[test]
fn optional_empty_values_are_null() {
    let rows = vec![row("a@b.com", "  ")];
    let outcome = process(&customer_schema(), &customer_mapping(), &rows);
    let record = &outcome.processed[0];
    assert!(record.contains_field("phone"));
    assert_eq!(record.get("phone"), None);
}

#[test]
fn unmapped_columns_are_ignored() {
    let mapping = customer_mapping().with_target("Phone#", None);
    let outcome = process(&customer_schema(), &mapping, &[row("a@b.com", "not checked")]);
    assert_eq!(outcome.valid_count(), 1);
    assert!(!outcome.processed[0].contains_field("phone"));
}

#[test]
fn required_field_without_a_column_rejects_the_row() {
    let mapping = customer_mapping().with_target("E-mail", None);
    let rows = vec![row("a@b.com", "123")];
    let outcome = process(&customer_schema(), &mapping, &rows);

    assert_eq!(outcome.valid_count(), 0);
    let rejected = &outcome.rejected[0];
    assert_eq!(rejected.raw_row, rows[0]);
    assert_eq!(rejected.errors.len(), 1);
    assert_eq!(rejected.errors[0].field, "email");
    assert_eq!(rejected.errors[0].value, "");
    assert_eq!(rejected.errors[0].error, "required field missing");
}

#[test]
fn empty_input_gives_empty_outcome() {
    let outcome = process(&customer_schema(), &customer_mapping(), &[]);
    assert_eq!(outcome, BatchOutcome::default());
    assert!(!outcome.has_rejections());
}

#[test]
fn parallel_matches_sequential() {
    let rows: Vec<RawRow> = (0..500)
        .map(|i| {
            if i % 7 == 0 {
                row("broken", &i.to_string())
            } else {
                row(&format!("user{i}@example.com"), &i.to_string())
            }
        })
        .collect();
    let schema = customer_schema();
    let mapping = customer_mapping();

    let sequential = process(&schema, &mapping, &rows);
    let parallel = process_with_options(&schema, &mapping, &rows, ProcessOptions { parallel: true });
    assert_eq!(sequential, parallel);

    let indices: Vec<usize> = parallel.rejected.iter().map(|r| r.row_index).collect();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(parallel.invalid_count(), 72);
}

proptest! {
    #[test]
    fn every_row_lands_in_exactly_one_bucket(emails in proptest::collection::vec("[a-z@.]{0,12}", 0..40)) {
        let rows: Vec<RawRow> = emails.iter().map(|e| row(e, "")).collect();
        let outcome = process(&customer_schema(), &customer_mapping(), &rows);
        prop_assert_eq!(outcome.total_rows(), rows.len());
        for rejected in &outcome.rejected {
            prop_assert!(!rejected.errors.is_empty());
        }
    }
}
