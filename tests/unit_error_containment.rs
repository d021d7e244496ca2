#![allow(missing_docs)]

use attrof::attr::{
	Diagnostics, DynValue, FieldDescriptor, FieldKind, FieldValue, ListTypeOptions, NestedListValue, ObjectDescriptor, ObjectShape,
	require_str,
};

/// Element that refuses to decode a reserved name, simulating a per-element
/// adapter failure in the middle of a list.
#[derive(Debug, Clone, Default, PartialEq)]
struct Label {
	name: String,
}

impl ObjectShape for Label {
	fn descriptor() -> ObjectDescriptor {
		ObjectDescriptor::new("Label", vec![FieldDescriptor::new("name", FieldKind::String)])
	}

	fn decode(fields: &[FieldValue]) -> (Option<Self>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let (name, d) = require_str(fields, "name");
		diags.append(d);
		if name == "reserved" {
			diags.add_error("invalid field value", "name: reserved label");
		}
		if diags.has_error() {
			return (None, diags);
		}
		(Some(Self { name }), diags)
	}

	fn encode(&self) -> (Vec<FieldValue>, Diagnostics) {
		let mut diags = Diagnostics::new();
		if self.name.is_empty() {
			diags.add_error("invalid field value", "name: empty label");
			return (Vec::new(), diags);
		}
		(
			vec![FieldValue {
				name: "name".into(),
				value: DynValue::String(self.name.as_str().into()),
			}],
			diags,
		)
	}
}

fn labels(names: &[&str]) -> Vec<Label> {
	names.iter().map(|name| Label { name: name.to_string() }).collect()
}

#[test]
fn one_poisoned_element_of_five_discards_everything() {
	let value = NestedListValue::from_slice_must(&labels(&["a", "b", "reserved", "d", "e"]), ListTypeOptions::default());

	let (decoded, diags) = value.to_vec();
	assert!(decoded.is_empty(), "no partial results allowed, got {}", decoded.len());
	assert!(diags.has_error());
}

#[test]
fn poisoned_singleton_fails_the_reduction_too() {
	let value = NestedListValue::from_value_must(&Label { name: "reserved".to_string() }, ListTypeOptions::default());
	let (decoded, diags) = value.to_option();
	assert!(decoded.is_none());
	assert!(diags.has_error());
}

#[test]
fn encode_failure_aborts_construction_without_a_partial_value() {
	let items = labels(&["a", "", "c"]);
	let (value, diags) = NestedListValue::from_slice(&items, ListTypeOptions::default());
	assert!(diags.has_error());
	assert!(value.is_unknown(), "failed construction must degrade to unknown");
	assert!(value.as_list().elements().is_empty());
}

#[test]
#[should_panic(expected = "unrecoverable diagnostics")]
fn must_constructor_turns_encode_failure_into_a_panic() {
	let _ = NestedListValue::from_slice_must(&labels(&["a", ""]), ListTypeOptions::default());
}

#[test]
fn clean_elements_still_decode_when_built_independently() {
	let value = NestedListValue::from_slice_must(&labels(&["a", "b"]), ListTypeOptions::default());
	let (decoded, diags) = value.to_vec();
	assert!(diags.is_empty());
	assert_eq!(decoded, labels(&["a", "b"]));
}
