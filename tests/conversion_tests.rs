//! End-to-end conversion and validation scenarios

use rstest::rstest;
use schema_forms::{
	EnumSource, FieldKind, FieldType, Form, ModelField, ModelSchema, Widget, model_fields,
};
use serde_json::json;
use std::collections::HashMap;

fn person_schema() -> ModelSchema {
	ModelSchema::new("Person")
		.with_field(
			ModelField::new("identifier", FieldType::Text).with_validator(|value, bound| {
				let id = value.as_str().unwrap_or_default();
				let name = bound
					.get("name")
					.and_then(|v| v.as_str())
					.unwrap_or_default();
				if id.contains(&name.to_lowercase()) {
					Ok(None)
				} else {
					Err("The identifier must contain the name in lowercase.".to_string())
				}
			}),
		)
		.with_field(ModelField::new("name", FieldType::Text).with_default(json!("Klaus")))
		.with_field(
			ModelField::new("age", FieldType::Integer)
				.with_default_factory(|| json!(18))
				.with_validator(|value, _| match value.as_i64() {
					Some(age) if age >= 18 => Ok(None),
					_ => Err("must be over 18 years old.".to_string()),
				}),
		)
		.with_post_root_validator(|values| {
			let id = values
				.get("identifier")
				.and_then(|v| v.as_str())
				.unwrap_or_default();
			let age = values.get("age").and_then(|v| v.as_i64()).unwrap_or(0);
			if id == "admin" && age < 21 {
				Err("You must be over 21 to be an admin.".to_string())
			} else {
				Ok(())
			}
		})
}

fn bind(form: &mut Form, data: &[(&str, serde_json::Value)]) {
	let map: HashMap<String, serde_json::Value> = data
		.iter()
		.map(|(k, v)| (k.to_string(), v.clone()))
		.collect();
	form.bind(map);
}

#[rstest]
fn test_person_submission_cycle() {
	let schema = person_schema();
	let mut form = Form::from_model(&schema).unwrap();

	// The cross-field rule fails against the defaulted name "Klaus";
	// root validators never run, so form_errors stays empty.
	bind(&mut form, &[("age", json!(18)), ("identifier", json!("admin"))]);
	assert!(!form.validate());
	assert_eq!(
		form.errors().get("identifier").unwrap(),
		&vec!["The identifier must contain the name in lowercase.".to_string()]
	);
	assert_eq!(form.errors().len(), 1);
	assert!(form.form_errors().is_empty());

	// Per-field validation passes; the admin/21 root rule now fires.
	bind(
		&mut form,
		&[
			("age", json!(18)),
			("identifier", json!("admin")),
			("name", json!("Admin")),
		],
	);
	assert!(!form.validate());
	assert!(form.errors().is_empty());
	assert_eq!(
		form.form_errors(),
		&["You must be over 21 to be an admin.".to_string()]
	);
}

#[rstest]
fn test_person_field_level_age_rule() {
	let mut form = Form::from_model(&person_schema()).unwrap();
	bind(
		&mut form,
		&[("age", json!(17)), ("identifier", json!("klaus-1"))],
	);

	assert!(!form.validate());
	assert_eq!(
		form.errors().get("age").unwrap(),
		&vec!["must be over 18 years old.".to_string()]
	);
}

#[rstest]
fn test_literal_multi_select_scenario() {
	// A literal field with allowed values {"complex","complicated"}
	// rendered as a multi-select.
	let schema = ModelSchema::new("Task").with_field(ModelField::new(
		"difficulty",
		FieldType::Sequence(Box::new(FieldType::Literal(vec![
			"complex".to_string(),
			"complicated".to_string(),
		]))),
	));

	let fields = model_fields(&schema, &[], &[]);
	let (constructor, options) = fields[0].1.cast().unwrap();
	assert!(matches!(
		constructor,
		schema_forms::FieldConstructor::Kind(FieldKind::MultiCheckbox)
	));
	assert_eq!(
		options.choices.unwrap(),
		vec![
			("complex".to_string(), "complex".to_string()),
			("complicated".to_string(), "complicated".to_string()),
		]
	);
	let coerce = options.coerce.unwrap();
	assert!(coerce(&json!("complex")).is_ok());
	assert!(coerce(&json!("other value")).is_err());

	let mut form = Form::from_model(&schema).unwrap();
	assert_eq!(form.fields()[0].widget(), Widget::CheckboxSelectMultiple);

	bind(&mut form, &[("difficulty", json!(["complex"]))]);
	assert!(form.validate());
	assert_eq!(
		form.cleaned_data().get("difficulty"),
		Some(&json!(["complex"]))
	);

	bind(&mut form, &[("difficulty", json!(["other value"]))]);
	assert!(!form.validate());
	assert!(form.errors().contains_key("difficulty"));
}

#[rstest]
fn test_enum_single_select_round_trip() {
	let schema = ModelSchema::new("Profile").with_field(ModelField::new(
		"color",
		FieldType::Enum(EnumSource::new("Color", [("red", "Red"), ("blue", "Blue")])),
	));

	let mut form = Form::from_model(&schema).unwrap();
	assert_eq!(form.fields()[0].widget(), Widget::Select);

	bind(&mut form, &[("color", json!("red"))]);
	assert!(form.validate());
	assert_eq!(form.cleaned_data().get("color"), Some(&json!("red")));

	// Re-validating already-cleaned data must not change it.
	let cleaned = form.cleaned_data().clone();
	form.bind(cleaned);
	assert!(form.validate());
	assert_eq!(form.cleaned_data().get("color"), Some(&json!("red")));

	bind(&mut form, &[("color", json!("green"))]);
	assert!(!form.validate());
}

#[rstest]
fn test_every_primitive_constructs_expected_widget() {
	let schema = ModelSchema::new("Everything")
		.with_field(ModelField::new("a", FieldType::Text))
		.with_field(ModelField::new("b", FieldType::Integer))
		.with_field(ModelField::new("c", FieldType::Float))
		.with_field(ModelField::new("d", FieldType::Boolean))
		.with_field(ModelField::new("e", FieldType::Decimal))
		.with_field(ModelField::new("f", FieldType::Date))
		.with_field(ModelField::new("g", FieldType::DateTime))
		.with_field(ModelField::new("h", FieldType::Time))
		.with_field(ModelField::new("i", FieldType::Secret))
		.with_field(ModelField::new("j", FieldType::Email));

	let form = Form::from_model(&schema).unwrap();
	let widgets: Vec<Widget> = form.fields().iter().map(|f| f.widget()).collect();
	assert_eq!(
		widgets,
		vec![
			Widget::TextInput,
			Widget::NumberInput,
			Widget::NumberInput,
			Widget::CheckboxInput,
			Widget::NumberInput,
			Widget::DateInput,
			Widget::DateTimeInput,
			Widget::TimeInput,
			Widget::PasswordInput,
			Widget::EmailInput,
		]
	);
}

#[rstest]
fn test_unsupported_sequence_fails_at_construction() {
	let schema = ModelSchema::new("Bad").with_field(ModelField::new(
		"numbers",
		FieldType::Sequence(Box::new(FieldType::Integer)),
	));

	let err = Form::from_model(&schema).unwrap_err();
	assert_eq!(
		err.to_string(),
		"sequence of integer cannot be converted to a form field"
	);
}

#[rstest]
fn test_optional_email_left_empty_is_valid() {
	let schema = ModelSchema::new("UserInfo").with_field(ModelField::new(
		"email",
		FieldType::Optional(Box::new(FieldType::Email)),
	));

	let mut form = Form::from_model(&schema).unwrap();
	bind(&mut form, &[]);
	assert!(form.validate());

	bind(&mut form, &[("email", json!("ck@example.org"))]);
	assert!(form.validate());

	bind(&mut form, &[("email", json!("not-an-email"))]);
	assert!(!form.validate());
}

#[rstest]
fn test_readonly_form() {
	let mut form = Form::from_model(&person_schema()).unwrap();
	form.readonly_all();
	assert!(form.fields().iter().all(|f| f.is_readonly()));

	// Readonly presentation does not change validation behavior.
	bind(
		&mut form,
		&[("age", json!(30)), ("identifier", json!("klaus-9"))],
	);
	assert!(form.validate());
}
