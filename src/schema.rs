//! Declarative data-model schemas consumed by the conversion layer
//!
//! A [`ModelSchema`] describes the fields of a data model in declaration
//! order, together with the model-level validators that operate on the full
//! value set. The conversion engine reads these descriptors; it never
//! validates or mutates them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Validation callable attached to a single model field.
///
/// Receives the submitted value and the full set of bound sibling values,
/// so cross-field rules can be expressed. Returns an optional normalized
/// replacement value on success, or an error message on failure.
pub type FieldValidatorFn = Arc<
	dyn Fn(&serde_json::Value, &HashMap<String, serde_json::Value>) -> Result<Option<serde_json::Value>, String>
		+ Send
		+ Sync,
>;

/// Model-level validator operating on the full set of bound values.
pub type RootValidatorFn =
	Arc<dyn Fn(&HashMap<String, serde_json::Value>) -> Result<(), String> + Send + Sync>;

/// Zero-argument callable producing a fresh default value.
pub type DefaultFactory = Arc<dyn Fn() -> serde_json::Value + Send + Sync>;

/// An enumeration backing a choice field: a type name plus ordered
/// `(member_name, display_value)` pairs.
///
/// Both native enumerations and closed literal sets reduce to this shape;
/// two sources compare equal when their names and member pairs match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSource {
	pub name: String,
	pub members: Vec<(String, String)>,
}

impl EnumSource {
	pub fn new(
		name: impl Into<String>,
		members: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
	) -> Self {
		Self {
			name: name.into(),
			members: members
				.into_iter()
				.map(|(n, v)| (n.into(), v.into()))
				.collect(),
		}
	}

	/// Synthesize a source from a closed literal set: each literal becomes a
	/// member named and valued by itself, in declaration order.
	pub fn from_literals(values: &[String]) -> Self {
		Self {
			name: "Choices".to_string(),
			members: values.iter().map(|v| (v.clone(), v.clone())).collect(),
		}
	}
}

/// The declared type of a model field.
///
/// `Optional` unwraps for dispatch (requiredness is carried by the field's
/// own flag); `Sequence` marks the field as multiple and dispatches on the
/// element type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
	Text,
	Integer,
	Float,
	Boolean,
	Decimal,
	Date,
	DateTime,
	Time,
	Secret,
	Email,
	Enum(EnumSource),
	Literal(Vec<String>),
	Optional(Box<FieldType>),
	Sequence(Box<FieldType>),
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldType::Text => write!(f, "text"),
			FieldType::Integer => write!(f, "integer"),
			FieldType::Float => write!(f, "float"),
			FieldType::Boolean => write!(f, "boolean"),
			FieldType::Decimal => write!(f, "decimal"),
			FieldType::Date => write!(f, "date"),
			FieldType::DateTime => write!(f, "datetime"),
			FieldType::Time => write!(f, "time"),
			FieldType::Secret => write!(f, "secret"),
			FieldType::Email => write!(f, "email"),
			FieldType::Enum(source) => write!(f, "enum {}", source.name),
			FieldType::Literal(values) => write!(f, "literal[{}]", values.join(", ")),
			FieldType::Optional(inner) => write!(f, "optional {}", inner),
			FieldType::Sequence(inner) => write!(f, "sequence of {}", inner),
		}
	}
}

/// A field default: either a static value or a factory invoked at field
/// construction time.
#[derive(Clone)]
pub enum FieldDefault {
	Static(serde_json::Value),
	Factory(DefaultFactory),
}

impl FieldDefault {
	/// Resolve to a concrete value, invoking the factory if needed.
	pub fn resolve(&self) -> serde_json::Value {
		match self {
			FieldDefault::Static(value) => value.clone(),
			FieldDefault::Factory(factory) => factory(),
		}
	}

	pub fn is_factory(&self) -> bool {
		matches!(self, FieldDefault::Factory(_))
	}
}

impl PartialEq for FieldDefault {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Static(a), Self::Static(b)) => a == b,
			// Factories compare by kind only; their output is opaque.
			(Self::Factory(_), Self::Factory(_)) => true,
			_ => false,
		}
	}
}

impl fmt::Debug for FieldDefault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldDefault::Static(value) => f.debug_tuple("Static").field(value).finish(),
			FieldDefault::Factory(_) => f.debug_tuple("Factory").field(&"<fn>").finish(),
		}
	}
}

/// A single declared attribute of a data model: type, requiredness,
/// default, presentation metadata, and an optional validation callable.
#[derive(Clone)]
pub struct ModelField {
	pub name: String,
	pub type_: FieldType,
	pub required: bool,
	pub default: Option<FieldDefault>,
	pub title: Option<String>,
	pub description: Option<String>,
	pub validator: Option<FieldValidatorFn>,
}

impl ModelField {
	/// Create a required field of the given type.
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::schema::{FieldType, ModelField};
	///
	/// let field = ModelField::new("identifier", FieldType::Text);
	/// assert!(field.required);
	/// assert!(field.default.is_none());
	/// ```
	pub fn new(name: impl Into<String>, type_: FieldType) -> Self {
		Self {
			name: name.into(),
			type_,
			required: true,
			default: None,
			title: None,
			description: None,
			validator: None,
		}
	}

	/// Set a static default. A field with a default is no longer required.
	pub fn with_default(mut self, value: serde_json::Value) -> Self {
		self.default = Some(FieldDefault::Static(value));
		self.required = false;
		self
	}

	/// Set a default factory. A field with a default is no longer required.
	pub fn with_default_factory(
		mut self,
		factory: impl Fn() -> serde_json::Value + Send + Sync + 'static,
	) -> Self {
		self.default = Some(FieldDefault::Factory(Arc::new(factory)));
		self.required = false;
		self
	}

	/// Mark the field as not required without supplying a default.
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Attach the field's own validation callable.
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::schema::{FieldType, ModelField};
	///
	/// let field = ModelField::new("age", FieldType::Integer).with_validator(|value, _bound| {
	///     match value.as_i64() {
	///         Some(age) if age >= 18 => Ok(None),
	///         _ => Err("must be over 18 years old.".to_string()),
	///     }
	/// });
	/// assert!(field.validator.is_some());
	/// ```
	pub fn with_validator(
		mut self,
		validator: impl Fn(
			&serde_json::Value,
			&HashMap<String, serde_json::Value>,
		) -> Result<Option<serde_json::Value>, String>
		+ Send
		+ Sync
		+ 'static,
	) -> Self {
		self.validator = Some(Arc::new(validator));
		self
	}
}

impl fmt::Debug for ModelField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelField")
			.field("name", &self.name)
			.field("type_", &self.type_)
			.field("required", &self.required)
			.field("default", &self.default)
			.field("title", &self.title)
			.field("description", &self.description)
			.field("validator", &self.validator.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

/// A declarative data model: named, with ordered fields and ordered
/// model-level validators.
///
/// Pre-root validators run before post-root validators at form validation
/// time; within each group, declaration order is preserved.
#[derive(Clone, Default)]
pub struct ModelSchema {
	name: String,
	fields: Vec<ModelField>,
	pre_root_validators: Vec<RootValidatorFn>,
	post_root_validators: Vec<RootValidatorFn>,
}

impl ModelSchema {
	/// Create an empty schema with the given model name.
	///
	/// # Examples
	///
	/// ```
	/// use schema_forms::schema::{FieldType, ModelField, ModelSchema};
	///
	/// let schema = ModelSchema::new("Person")
	///     .with_field(ModelField::new("identifier", FieldType::Text))
	///     .with_field(ModelField::new("name", FieldType::Text).with_default("Klaus".into()));
	/// assert_eq!(schema.name(), "Person");
	/// assert_eq!(schema.fields().len(), 2);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: vec![],
			pre_root_validators: vec![],
			post_root_validators: vec![],
		}
	}

	pub fn with_field(mut self, field: ModelField) -> Self {
		self.fields.push(field);
		self
	}

	pub fn with_pre_root_validator(
		mut self,
		validator: impl Fn(&HashMap<String, serde_json::Value>) -> Result<(), String>
		+ Send
		+ Sync
		+ 'static,
	) -> Self {
		self.pre_root_validators.push(Arc::new(validator));
		self
	}

	pub fn with_post_root_validator(
		mut self,
		validator: impl Fn(&HashMap<String, serde_json::Value>) -> Result<(), String>
		+ Send
		+ Sync
		+ 'static,
	) -> Self {
		self.post_root_validators.push(Arc::new(validator));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[ModelField] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&ModelField> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn pre_root_validators(&self) -> &[RootValidatorFn] {
		&self.pre_root_validators
	}

	pub fn post_root_validators(&self) -> &[RootValidatorFn] {
		&self.post_root_validators
	}
}

impl fmt::Debug for ModelSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelSchema")
			.field("name", &self.name)
			.field("fields", &self.fields)
			.field("pre_root_validators", &self.pre_root_validators.len())
			.field("post_root_validators", &self.post_root_validators.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_field_default_resolution() {
		// Arrange
		let static_default = FieldDefault::Static(json!("Klaus"));
		let factory_default = FieldDefault::Factory(Arc::new(|| json!(18)));

		// Act & Assert
		assert_eq!(static_default.resolve(), json!("Klaus"));
		assert_eq!(factory_default.resolve(), json!(18));
		assert!(!static_default.is_factory());
		assert!(factory_default.is_factory());
	}

	#[rstest]
	fn test_default_clears_required() {
		// Arrange
		let field = ModelField::new("name", FieldType::Text).with_default(json!("Klaus"));

		// Assert
		assert!(!field.required);
	}

	#[rstest]
	fn test_default_factory_clears_required() {
		// Arrange
		let field = ModelField::new("age", FieldType::Integer).with_default_factory(|| json!(18));

		// Assert
		assert!(!field.required);
		assert_eq!(field.default.unwrap().resolve(), json!(18));
	}

	#[rstest]
	fn test_enum_source_from_literals() {
		// Arrange
		let values = vec!["complex".to_string(), "complicated".to_string()];

		// Act
		let source = EnumSource::from_literals(&values);

		// Assert: members named and valued by each literal, in order
		assert_eq!(
			source.members,
			vec![
				("complex".to_string(), "complex".to_string()),
				("complicated".to_string(), "complicated".to_string()),
			]
		);
	}

	#[rstest]
	fn test_enum_source_value_equality() {
		// Two independently synthesized sources over the same literal set
		// compare equal by value.
		let values = vec!["a".to_string(), "b".to_string()];
		assert_eq!(
			EnumSource::from_literals(&values),
			EnumSource::from_literals(&values)
		);
	}

	#[rstest]
	#[case(FieldType::Text, "text")]
	#[case(FieldType::Sequence(Box::new(FieldType::Integer)), "sequence of integer")]
	#[case(FieldType::Optional(Box::new(FieldType::Email)), "optional email")]
	fn test_field_type_display(#[case] type_: FieldType, #[case] expected: &str) {
		assert_eq!(type_.to_string(), expected);
	}

	#[rstest]
	fn test_schema_declaration_order() {
		// Arrange
		let schema = ModelSchema::new("Person")
			.with_field(ModelField::new("identifier", FieldType::Text))
			.with_field(ModelField::new("name", FieldType::Text))
			.with_field(ModelField::new("age", FieldType::Integer));

		// Assert
		let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["identifier", "name", "age"]);
		assert!(schema.field("age").is_some());
		assert!(schema.field("missing").is_none());
	}
}
