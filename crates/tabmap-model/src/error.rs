use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("schema name must not be empty")]
    EmptySchemaName,
    #[error("field name must not be empty in schema {schema}")]
    EmptyFieldName { schema: String },
    #[error("duplicate field {field} in schema {schema}")]
    DuplicateField { schema: String, field: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
