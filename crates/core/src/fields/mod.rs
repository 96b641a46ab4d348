//! Fields module - field identifiers, schemas, and view couplings.

mod coupling;
mod fields_model;

// Re-export the public interface
pub use coupling::Coupling;
pub use fields_model::{
    field_spec, schema, FieldId, FieldSpec, FieldStorage, InputKind, ModelVariant,
};
