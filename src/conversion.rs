//! Conversion engine: model field descriptors to concrete form fields
//!
//! The dispatch key is a closed [`CanonicalType`] derived from the declared
//! [`FieldType`] by [`decompose`]; [`FieldKind::resolve`] is a total match
//! over `(CanonicalType, multiple)`, so an unsupported combination is a
//! single, named error instead of a runtime lookup surprise.

use crate::choices::{Coerce, enum_choices};
use crate::field::FormField;
use crate::fields::{
	BooleanField, DateField, DateTimeField, DecimalField, EmailField, FloatField, IntegerField,
	MultiCheckboxField, PasswordField, SelectField, TextField, TimeField,
};
use crate::schema::{EnumSource, FieldType, ModelField, ModelSchema};
use crate::validators::{FieldValidator, Validator};
use std::fmt;
use std::sync::Arc;

/// Conversion failures surfaced at form construction time
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
	#[error("{type_name} cannot be converted to a form field")]
	Unsupported { type_name: String },
}

/// The dispatch key derived from a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalType {
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
	Enum,
}

/// Reduce a declared type to its canonical dispatch key plus, for
/// enumeration-like types, the choice source backing it.
///
/// Native enumerations keep their own source; closed literal sets get a
/// fresh source synthesized from their values. Total over all declared
/// types; the synthesized source compares by value, not identity.
///
/// # Examples
///
/// ```
/// use schema_forms::conversion::{CanonicalType, decompose};
/// use schema_forms::schema::FieldType;
///
/// let (canon, choices) = decompose(&FieldType::Integer);
/// assert_eq!(canon, CanonicalType::Integer);
/// assert!(choices.is_none());
///
/// let literal = FieldType::Literal(vec!["complex".into(), "complicated".into()]);
/// let (canon, choices) = decompose(&literal);
/// assert_eq!(canon, CanonicalType::Enum);
/// assert_eq!(choices.unwrap().members.len(), 2);
/// ```
pub fn decompose(type_: &FieldType) -> (CanonicalType, Option<EnumSource>) {
	match type_ {
		FieldType::Text => (CanonicalType::Text, None),
		FieldType::Integer => (CanonicalType::Integer, None),
		FieldType::Float => (CanonicalType::Float, None),
		FieldType::Boolean => (CanonicalType::Boolean, None),
		FieldType::Decimal => (CanonicalType::Decimal, None),
		FieldType::Date => (CanonicalType::Date, None),
		FieldType::DateTime => (CanonicalType::DateTime, None),
		FieldType::Time => (CanonicalType::Time, None),
		FieldType::Secret => (CanonicalType::Secret, None),
		FieldType::Email => (CanonicalType::Email, None),
		FieldType::Enum(source) => (CanonicalType::Enum, Some(source.clone())),
		FieldType::Literal(values) => (CanonicalType::Enum, Some(EnumSource::from_literals(values))),
		FieldType::Optional(inner) | FieldType::Sequence(inner) => decompose(inner),
	}
}

/// The concrete constructor a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Text,
	Integer,
	Float,
	Boolean,
	Decimal,
	Date,
	DateTime,
	Time,
	Password,
	Email,
	Select,
	MultiCheckbox,
}

impl FieldKind {
	/// Total dispatch over `(canonical type, multiple)`.
	///
	/// Only enumeration-backed fields have a multiple variant; any other
	/// sequence type has no conversion.
	pub fn resolve(canon: CanonicalType, multiple: bool) -> Option<FieldKind> {
		match (canon, multiple) {
			(CanonicalType::Enum, true) => Some(FieldKind::MultiCheckbox),
			(CanonicalType::Enum, false) => Some(FieldKind::Select),
			(_, true) => None,
			(CanonicalType::Text, false) => Some(FieldKind::Text),
			(CanonicalType::Integer, false) => Some(FieldKind::Integer),
			(CanonicalType::Float, false) => Some(FieldKind::Float),
			(CanonicalType::Boolean, false) => Some(FieldKind::Boolean),
			(CanonicalType::Decimal, false) => Some(FieldKind::Decimal),
			(CanonicalType::Date, false) => Some(FieldKind::Date),
			(CanonicalType::DateTime, false) => Some(FieldKind::DateTime),
			(CanonicalType::Time, false) => Some(FieldKind::Time),
			(CanonicalType::Secret, false) => Some(FieldKind::Password),
			(CanonicalType::Email, false) => Some(FieldKind::Email),
		}
	}
}

/// Custom constructor override bypassing dispatch entirely.
pub type FieldFactory = Arc<dyn Fn(FieldOptions) -> Box<dyn FormField> + Send + Sync>;

/// Either a dispatch-table constructor or an explicit override.
#[derive(Clone)]
pub enum FieldConstructor {
	Kind(FieldKind),
	Custom(FieldFactory),
}

impl fmt::Debug for FieldConstructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldConstructor::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
			FieldConstructor::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
		}
	}
}

/// Presentation metadata carried from the model field.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
	/// Falls back to the field name.
	pub label: String,
	/// Falls back to the empty string.
	pub description: String,
	pub default: Option<crate::schema::FieldDefault>,
}

/// Assembled constructor arguments for one concrete field.
pub struct FieldOptions {
	pub name: String,
	pub label: String,
	pub description: String,
	pub required: bool,
	pub default: Option<serde_json::Value>,
	/// Presence validator first, then the model-field adapter.
	pub validators: Vec<Validator>,
	pub choices: Option<Vec<(String, String)>>,
	pub coerce: Option<Coerce>,
}

impl fmt::Debug for FieldOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldOptions")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("description", &self.description)
			.field("required", &self.required)
			.field("default", &self.default)
			.field("validators", &self.validators)
			.field("choices", &self.choices)
			.field("coerce", &self.coerce.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

/// One form-eligible model field, reduced to everything needed to pick and
/// invoke a constructor.
///
/// Mutable until constructed: callers may override metadata, requiredness,
/// or the factory between enumeration and construction.
#[derive(Clone)]
pub struct FieldDescriptor {
	pub name: String,
	pub canon: CanonicalType,
	/// The declared (element) type, kept for error reporting.
	pub type_: FieldType,
	pub multiple: bool,
	pub required: bool,
	pub metadata: Metadata,
	pub choices: Option<EnumSource>,
	pub validator: FieldValidator,
	pub factory: Option<FieldFactory>,
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("canon", &self.canon)
			.field("type_", &self.type_)
			.field("multiple", &self.multiple)
			.field("required", &self.required)
			.field("metadata", &self.metadata)
			.field("choices", &self.choices)
			.field("validator", &self.validator)
			.field("factory", &self.factory.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

impl PartialEq for FieldDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
			&& self.canon == other.canon
			&& self.type_ == other.type_
			&& self.multiple == other.multiple
			&& self.required == other.required
			&& self.metadata == other.metadata
			&& self.choices == other.choices
			&& self.validator == other.validator
	}
}

impl FieldDescriptor {
	/// Build a descriptor from one model field.
	///
	/// `Optional` wrappers unwrap and clear the required flag; a `Sequence`
	/// wrapper sets the multiple flag and dispatches on the element type.
	pub fn from_model_field(model: &str, field: &ModelField) -> Self {
		let mut required = field.required;
		let mut type_ = &field.type_;
		while let FieldType::Optional(inner) = type_ {
			required = false;
			type_ = inner;
		}
		let (multiple, type_) = match type_ {
			FieldType::Sequence(inner) => (true, inner.as_ref().clone()),
			other => (false, other.clone()),
		};
		let (canon, choices) = decompose(&type_);

		Self {
			canon,
			multiple,
			required,
			metadata: Metadata {
				label: field.title.clone().unwrap_or_else(|| field.name.clone()),
				description: field.description.clone().unwrap_or_default(),
				default: field.default.clone(),
			},
			choices,
			validator: FieldValidator::new(model, field),
			factory: None,
			type_,
			name: field.name.clone(),
		}
	}

	/// Assemble the constructor options: metadata verbatim, exactly one
	/// presence validator first, then the model-field adapter, and — for
	/// choice fields — the choice pairs and coercion function.
	pub fn compute_options(&self) -> FieldOptions {
		let mut validators = vec![if self.required {
			Validator::Required
		} else {
			Validator::Optional
		}];
		validators.push(Validator::Field(self.validator.clone()));

		let (choices, coerce) = match &self.choices {
			Some(source) => {
				let (pairs, coerce) = enum_choices(source);
				(Some(pairs), Some(coerce))
			}
			None => (None, None),
		};

		FieldOptions {
			name: self.name.clone(),
			label: self.metadata.label.clone(),
			description: self.metadata.description.clone(),
			required: self.required,
			default: self.metadata.default.as_ref().map(|d| d.resolve()),
			validators,
			choices,
			coerce,
		}
	}

	/// Resolve the constructor: the explicit factory if set, otherwise the
	/// dispatch table entry for `(canonical type, multiple)`.
	pub fn cast(&self) -> Result<(FieldConstructor, FieldOptions), ConvertError> {
		let constructor = match &self.factory {
			Some(factory) => FieldConstructor::Custom(factory.clone()),
			None => FieldKind::resolve(self.canon, self.multiple)
				.map(FieldConstructor::Kind)
				.ok_or_else(|| ConvertError::Unsupported {
					type_name: if self.multiple {
						format!("sequence of {}", self.type_)
					} else {
						self.type_.to_string()
					},
				})?,
		};
		Ok((constructor, self.compute_options()))
	}

	/// Build the concrete renderable field.
	pub fn construct(&self) -> Result<Box<dyn FormField>, ConvertError> {
		let (constructor, options) = self.cast()?;
		let field: Box<dyn FormField> = match constructor {
			FieldConstructor::Custom(factory) => factory(options),
			FieldConstructor::Kind(kind) => match kind {
				FieldKind::Text => Box::new(TextField::from_options(options)),
				FieldKind::Password => Box::new(PasswordField::from_options(options)),
				FieldKind::Email => Box::new(EmailField::from_options(options)),
				FieldKind::Integer => Box::new(IntegerField::from_options(options)),
				FieldKind::Float => Box::new(FloatField::from_options(options)),
				FieldKind::Decimal => Box::new(DecimalField::from_options(options)),
				FieldKind::Boolean => Box::new(BooleanField::from_options(options)),
				FieldKind::Date => Box::new(DateField::from_options(options)),
				FieldKind::DateTime => Box::new(DateTimeField::from_options(options)),
				FieldKind::Time => Box::new(TimeField::from_options(options)),
				FieldKind::Select => Box::new(SelectField::from_options(options)),
				FieldKind::MultiCheckbox => Box::new(MultiCheckboxField::from_options(options)),
			},
		};
		Ok(field)
	}
}

/// Enumerate a schema's form-eligible fields as descriptors, in declaration
/// order.
///
/// `only` and `exclude` are name filters; an empty `only` means every
/// declared field. The effective set is `only − exclude`; names matching no
/// declared field are silently ignored.
///
/// # Examples
///
/// ```
/// use schema_forms::conversion::model_fields;
/// use schema_forms::schema::{FieldType, ModelField, ModelSchema};
///
/// let schema = ModelSchema::new("Person")
///     .with_field(ModelField::new("identifier", FieldType::Text))
///     .with_field(ModelField::new("age", FieldType::Integer));
///
/// let all = model_fields(&schema, &[], &[]);
/// assert_eq!(all.len(), 2);
///
/// let only_age = model_fields(&schema, &["age"], &[]);
/// assert_eq!(only_age.len(), 1);
/// assert_eq!(only_age[0].0, "age");
/// ```
pub fn model_fields(
	schema: &ModelSchema,
	only: &[&str],
	exclude: &[&str],
) -> Vec<(String, FieldDescriptor)> {
	schema
		.fields()
		.iter()
		.filter(|field| only.is_empty() || only.contains(&field.name.as_str()))
		.filter(|field| !exclude.contains(&field.name.as_str()))
		.map(|field| {
			(
				field.name.clone(),
				FieldDescriptor::from_model_field(schema.name(), field),
			)
		})
		.collect()
}
