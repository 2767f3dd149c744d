//! Form fields derived from declarative data-model schemas
//!
//! This crate converts a model's declared fields into renderable,
//! validating input fields:
//! - a closed dispatch from canonical field types to concrete field
//!   constructors, with enum and literal-set types reduced to choice lists
//! - constructor-option assembly carrying labels, descriptions, defaults,
//!   and an ordered validator chain (presence check first)
//! - an adapter running each model field's own, possibly cross-field,
//!   validation against submitted data
//! - a form wrapper that routes model-level root-validator failures into a
//!   separate error list once every field has passed
//!
//! ```
//! use schema_forms::form::Form;
//! use schema_forms::schema::{FieldType, ModelField, ModelSchema};
//! use std::collections::HashMap;
//! use serde_json::json;
//!
//! let schema = ModelSchema::new("Person")
//!     .with_field(ModelField::new("identifier", FieldType::Text))
//!     .with_field(ModelField::new("age", FieldType::Integer).with_default_factory(|| json!(18)));
//!
//! let mut form = Form::from_model(&schema).unwrap();
//! form.bind(HashMap::from([("identifier".to_string(), json!("klaus-1"))]));
//! assert!(form.validate());
//! assert_eq!(form.cleaned_data().get("age"), Some(&json!(18)));
//! ```

pub mod choices;
pub mod conversion;
pub mod field;
pub mod fields;
pub mod form;
pub mod schema;
pub mod validators;

pub use choices::{Coerce, enum_choices, escape_label};
pub use conversion::{
	CanonicalType, ConvertError, FieldConstructor, FieldDescriptor, FieldFactory, FieldKind,
	FieldOptions, Metadata, decompose, model_fields,
};
pub use field::{FieldCore, FieldError, FieldResult, FormField, Widget};
pub use fields::{
	BooleanField, DateField, DateTimeField, DecimalField, EmailField, FloatField, IntegerField,
	MultiCheckboxField, PasswordField, SelectField, TextField, TimeField,
};
pub use form::Form;
pub use schema::{
	DefaultFactory, EnumSource, FieldDefault, FieldType, FieldValidatorFn, ModelField,
	ModelSchema, RootValidatorFn,
};
pub use validators::{FieldValidator, Validator, Verdict};
