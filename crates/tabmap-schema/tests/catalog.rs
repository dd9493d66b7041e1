use std::fs;

use tabmap_model::FieldKind;
use tabmap_schema::{
    CatalogError, DirectoryProvider, EmbeddedProvider, SchemaCatalog, SchemaProvider,
    SchemaSourceError,
};
use tempfile::TempDir;

#[test]
fn embedded_schemas_load() {
    let catalog = SchemaCatalog::new(EmbeddedProvider);
    let summaries = catalog.list_schemas().expect("list embedded schemas");
    let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
    for expected in ["Company", "Customer", "Employee", "Member", "Product"] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    let customer = catalog.get_schema("Customer").expect("Customer");
    assert_eq!(customer.label.as_deref(), Some("Customers"));
    let email = customer.field("email").expect("email field");
    assert_eq!(email.kind, FieldKind::Email);
    assert!(email.required);
    assert_eq!(customer.field("zip_code").and_then(|f| f.max_length), Some(20));
}

#[test]
fn embedded_fields_keep_declaration_order() {
    let product = EmbeddedProvider
        .load_schema("Product")
        .expect("load")
        .expect("Product exists");
    let names: Vec<&str> = product.field_names().collect();
    assert_eq!(
        names,
        ["name", "sku", "description", "price", "quantity", "category", "is_active"]
    );
    assert_eq!(
        product.field("price").map(|f| f.kind),
        Some(FieldKind::Decimal)
    );
}

#[test]
fn embedded_relations_and_choices() {
    let catalog = SchemaCatalog::new(EmbeddedProvider);
    let employee = catalog.get_schema("employee").expect("Employee");
    assert_eq!(
        employee
            .field("company")
            .and_then(|f| f.related_schema.as_deref()),
        Some("Company")
    );
    let block = catalog.get_schema("HostelBlock").expect("HostelBlock");
    let block_type = block.field("block_type").expect("block_type");
    assert!(block_type.allows("WH"));
    assert!(!block_type.allows("XX"));
}

#[test]
fn embedded_relations_point_at_embedded_schemas() {
    let catalog = SchemaCatalog::new(EmbeddedProvider);
    for summary in catalog.list_schemas().expect("list embedded schemas") {
        let schema = catalog.get_schema(&summary.name).expect("schema");
        for field in schema.fields() {
            if let Some(related) = field.related_schema.as_deref() {
                assert!(
                    catalog.get_schema(related).is_ok(),
                    "{}.{} relates to unknown schema {related}",
                    schema.name,
                    field.name
                );
            }
        }
    }

    let room = catalog.get_schema("HostelRoom").expect("HostelRoom");
    assert_eq!(
        room.field("floor").and_then(|f| f.related_schema.as_deref()),
        Some("HostelFloor")
    );
    let floor = catalog.get_schema("HostelFloor").expect("HostelFloor");
    assert_eq!(
        floor.field("block").and_then(|f| f.related_schema.as_deref()),
        Some("HostelBlock")
    );
    assert!(floor.field("floor_no").is_some_and(|f| f.required));
}

#[test]
fn directory_provider_reads_csv_pair() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("Schemas.csv"),
        "Schema Name,Schema Label,Description\nInvoice,Invoices,Billing documents\n",
    )
    .expect("write schemas");
    fs::write(
        dir.path().join("Fields.csv"),
        "Field Order,Schema Name,Field Name,Field Label,Kind,Required,Max Length,Allowed Values,Related Schema\n\
         1,Invoice,number,Invoice number,Text,Y,12,,\n\
         2,Invoice,total,Total,Decimal,Y,,,\n\
         3,Invoice,paid,Paid,bool,N,,,\n",
    )
    .expect("write fields");

    let catalog = SchemaCatalog::new(DirectoryProvider::new(dir.path()));
    let invoice = catalog.get_schema("INVOICE").expect("Invoice");
    assert_eq!(invoice.description.as_deref(), Some("Billing documents"));
    assert_eq!(invoice.required_fields().count(), 2);
    assert_eq!(invoice.field("paid").map(|f| f.kind), Some(FieldKind::Boolean));
}

#[test]
fn missing_directory_is_unavailable() {
    let dir = TempDir::new().expect("tempdir");
    let catalog = SchemaCatalog::new(DirectoryProvider::new(dir.path().join("absent")));
    let err = catalog.get_schema("Customer").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Unavailable {
            source: SchemaSourceError::DirectoryNotFound { .. }
        }
    ));
}

#[test]
fn missing_fields_file_is_unavailable() {
    let dir = TempDir::new().expect("tempdir");
    let err = SchemaCatalog::new(DirectoryProvider::new(dir.path()))
        .list_schemas()
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Unavailable {
            source: SchemaSourceError::FileNotFound { .. }
        }
    ));
}
