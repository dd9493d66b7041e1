use proptest::prelude::*;
use tabmap_map::{ConfidenceLevel, MappingEngine, suggest};
use tabmap_model::{FieldDefinition, FieldKind, SchemaDefinition};

fn customer() -> SchemaDefinition {
    SchemaDefinition::new(
        "Customer",
        vec![
            FieldDefinition::new("first_name", FieldKind::Text).required(true),
            FieldDefinition::new("last_name", FieldKind::Text).required(true),
            FieldDefinition::new("email", FieldKind::Email).required(true),
            FieldDefinition::new("phone", FieldKind::Text),
            FieldDefinition::new("zip_code", FieldKind::Text),
        ],
    )
    .expect("schema")
}

#[test]
fn suggests_mappings_and_unmapped() {
    let schema = customer();
    let columns = ["First Name", "E-mail", "Phone#", "ZIP", "Notes"];
    let mapping = suggest(&columns, &schema);

    assert_eq!(mapping.len(), 5);
    assert_eq!(mapping.target_for("First Name"), Some("first_name"));
    assert_eq!(mapping.target_for("E-mail"), Some("email"));
    // "phone#" contains "phone": 5/6
    assert_eq!(mapping.target_for("Phone#"), Some("phone"));
    // "zip" in "zipcode" is only 3/7
    assert_eq!(mapping.target_for("ZIP"), None);
    assert_eq!(mapping.target_for("Notes"), None);
    let order: Vec<&str> = mapping.iter().map(|(column, _)| column).collect();
    assert_eq!(order, columns);
}

#[test]
fn exact_match_beats_earlier_partial() {
    let schema = SchemaDefinition::new(
        "Contact",
        vec![
            FieldDefinition::new("email_addr", FieldKind::Email),
            FieldDefinition::new("email", FieldKind::Email),
        ],
    )
    .expect("schema");
    let mapping = suggest(&["Email"], &schema);
    assert_eq!(mapping.target_for("Email"), Some("email"));
}

#[test]
fn duplicate_targets_are_allowed() {
    let schema = customer();
    let mapping = suggest(&["email", "E_mail"], &schema);
    assert_eq!(mapping.target_for("email"), Some("email"));
    assert_eq!(mapping.target_for("E_mail"), Some("email"));
}

#[test]
fn confidence_accompanies_targets_only() {
    let schema = customer();
    let suggestions =
        MappingEngine::new(&schema).suggest_with_confidence(&["Email", "Phone#", "Fax"]);
    assert_eq!(suggestions[0].confidence, Some(100));
    assert_eq!(suggestions[0].level(), Some(ConfidenceLevel::High));
    assert_eq!(suggestions[1].confidence, Some(80));
    assert_eq!(suggestions[2].target, None);
    assert_eq!(suggestions[2].confidence, None);
}

#[test]
fn suggestions_serialize_for_display() {
    let schema = customer();
    let suggestions = MappingEngine::new(&schema).suggest_with_confidence(&["Email"]);
    let json = serde_json::to_value(&suggestions).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!([{"column": "Email", "target": "email", "confidence": 100}])
    );
}

proptest! {
    #[test]
    fn suggest_is_deterministic(columns in prop::collection::vec("[A-Za-z_ -]{0,12}", 0..8)) {
        let schema = customer();
        let first = suggest(&columns, &schema);
        let second = suggest(&columns, &schema);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn targets_always_exist_in_schema(columns in prop::collection::vec("[A-Za-z_ -]{0,12}", 0..8)) {
        let schema = customer();
        let mapping = suggest(&columns, &schema);
        for (_, target) in mapping.mapped() {
            prop_assert!(schema.contains_field(target));
        }
    }

    #[test]
    fn field_name_maps_to_itself(idx in 0usize..5) {
        let schema = customer();
        let name = schema.field_names().nth(idx).expect("field").to_string();
        let mapping = suggest(&[name.clone()], &schema);
        prop_assert_eq!(mapping.target_for(&name), Some(name.as_str()));
    }
}
