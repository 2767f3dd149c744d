//! Choice-list and coercion building for enumeration-backed fields

use crate::field::{FieldError, FieldResult};
use crate::schema::EnumSource;
use std::sync::Arc;

/// Maps a submitted token back to its enumeration member token.
///
/// Idempotent: an already-coerced member passes through unchanged, so the
/// same function is safe for both stored values and submitted form data.
pub type Coerce = Arc<dyn Fn(&serde_json::Value) -> FieldResult<serde_json::Value> + Send + Sync>;

/// Escape a display label for attribute-safe rendering.
///
/// Only the apostrophe and the double quote are replaced; everything else
/// passes through untouched.
pub fn escape_label(label: &str) -> String {
	label.replace('\'', "&apos;").replace('"', "&quot;")
}

/// Build the ordered `(token, display)` choice pairs and the round-trip
/// coercion function for an enumeration source.
///
/// Pairs follow member declaration order; display values are escaped with
/// [`escape_label`]. The coercion function accepts a member token and
/// returns it unchanged, and fails with [`FieldError::InvalidChoice`] for
/// anything that names no member.
///
/// # Examples
///
/// ```
/// use schema_forms::choices::enum_choices;
/// use schema_forms::schema::EnumSource;
/// use serde_json::json;
///
/// let source = EnumSource::new("MyChoices", [("foo", "Foo"), ("bar", "Bar")]);
/// let (choices, coerce) = enum_choices(&source);
///
/// assert_eq!(choices, vec![
///     ("foo".to_string(), "Foo".to_string()),
///     ("bar".to_string(), "Bar".to_string()),
/// ]);
/// assert_eq!(coerce(&json!("foo")).unwrap(), json!("foo"));
/// assert!(coerce(&json!("test")).is_err());
/// ```
pub fn enum_choices(source: &EnumSource) -> (Vec<(String, String)>, Coerce) {
	let choices = source
		.members
		.iter()
		.map(|(name, value)| (name.clone(), escape_label(value)))
		.collect();

	let tokens: Vec<String> = source.members.iter().map(|(name, _)| name.clone()).collect();
	let coerce: Coerce = Arc::new(move |value: &serde_json::Value| {
		let token = value
			.as_str()
			.ok_or_else(|| FieldError::InvalidChoice(value.to_string()))?;
		if tokens.iter().any(|t| t == token) {
			Ok(serde_json::Value::String(token.to_string()))
		} else {
			Err(FieldError::InvalidChoice(token.to_string()))
		}
	});

	(choices, coerce)
}
