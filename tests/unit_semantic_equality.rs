#![allow(missing_docs)]

use attrof::attr::{
	Diagnostics, DynValue, FieldDescriptor, FieldKind, FieldValue, ListTypeOptions, NestedListValue, ObjectDescriptor, ObjectShape,
	require_str,
};

#[derive(Debug, Clone, Default, PartialEq)]
struct Route {
	cidr: String,
}

impl ObjectShape for Route {
	fn descriptor() -> ObjectDescriptor {
		ObjectDescriptor::new("Route", vec![FieldDescriptor::new("cidr", FieldKind::String)])
	}

	fn decode(fields: &[FieldValue]) -> (Option<Self>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let (cidr, d) = require_str(fields, "cidr");
		diags.append(d);
		if diags.has_error() {
			return (None, diags);
		}
		(Some(Self { cidr }), diags)
	}

	fn encode(&self) -> (Vec<FieldValue>, Diagnostics) {
		(
			vec![FieldValue {
				name: "cidr".into(),
				value: DynValue::String(self.cidr.as_str().into()),
			}],
			Diagnostics::new(),
		)
	}
}

fn route(cidr: &str) -> Route {
	Route { cidr: cidr.to_string() }
}

/// Compares routes ignoring case, the way a provider would suppress diffs
/// for case-insensitive remote APIs.
fn case_insensitive(left: &NestedListValue<Route>, right: &NestedListValue<Route>) -> (bool, Diagnostics) {
	let (left, mut diags) = left.to_vec();
	let (right, d) = right.to_vec();
	diags.append(d);
	if diags.has_error() {
		return (false, diags);
	}
	let fold = |items: Vec<Route>| items.into_iter().map(|item| item.cidr.to_lowercase()).collect::<Vec<_>>();
	(fold(left) == fold(right), diags)
}

#[test]
fn unbound_values_always_defer() {
	let left = NestedListValue::from_value_must(&route("10.0.0.0/8"), ListTypeOptions::default());
	let right = left.clone();

	// Identical bytes, structural equality holds.
	assert_eq!(left, right);

	// Yet the semantic verdict is false with no diagnostics: this means
	// "defer to the host default policy", not "not equal".
	let (equal, diags) = left.semantic_equals(&right);
	assert!(!equal);
	assert!(diags.is_empty());
}

#[test]
fn bound_function_decides_the_verdict() {
	let opts = ListTypeOptions::semantic(case_insensitive);
	let lower = NestedListValue::from_value_must(&route("10.0.0.0/8"), opts);
	let upper = NestedListValue::from_value_must(&route("10.0.0.0/8"), opts);
	let other = NestedListValue::from_value_must(&route("192.168.0.0/16"), opts);

	let (equal, diags) = lower.semantic_equals(&upper);
	assert!(equal, "{diags}");
	let (equal, _) = lower.semantic_equals(&other);
	assert!(!equal);
}

#[test]
fn semantic_and_structural_equality_are_independent() {
	fn always_equal(_: &NestedListValue<Route>, _: &NestedListValue<Route>) -> (bool, Diagnostics) {
		(true, Diagnostics::new())
	}

	let opts = ListTypeOptions::semantic(always_equal);
	let left = NestedListValue::from_value_must(&route("10.0.0.0/8"), opts);
	let right = NestedListValue::from_value_must(&route("172.16.0.0/12"), opts);

	// Structurally different, semantically equal.
	assert_ne!(left, right);
	let (equal, _) = left.semantic_equals(&right);
	assert!(equal);
}
