use crate::attr::shape::{decode_one, encode_one, require_i64, require_str};
use crate::attr::{Diagnostics, DynValue, FieldDescriptor, FieldKind, FieldValue, ObjectDescriptor, ObjectShape, ObjectValue};

#[derive(Debug, Clone, Default, PartialEq)]
struct Endpoint {
	host: String,
	port: i64,
}

impl ObjectShape for Endpoint {
	fn descriptor() -> ObjectDescriptor {
		ObjectDescriptor::new(
			"Endpoint",
			vec![
				FieldDescriptor::new("host", FieldKind::String),
				FieldDescriptor::new("port", FieldKind::I64),
			],
		)
	}

	fn decode(fields: &[FieldValue]) -> (Option<Self>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let (host, d) = require_str(fields, "host");
		diags.append(d);
		let (port, d) = require_i64(fields, "port");
		diags.append(d);
		if diags.has_error() {
			return (None, diags);
		}
		(Some(Self { host, port }), diags)
	}

	fn encode(&self) -> (Vec<FieldValue>, Diagnostics) {
		(
			vec![
				FieldValue {
					name: "host".into(),
					value: DynValue::String(self.host.as_str().into()),
				},
				FieldValue {
					name: "port".into(),
					value: DynValue::I64(self.port),
				},
			],
			Diagnostics::new(),
		)
	}
}

fn sample() -> Endpoint {
	Endpoint {
		host: "localhost".to_string(),
		port: 8080,
	}
}

#[test]
fn encode_then_decode_round_trips() {
	let (object, diags) = encode_one(&sample());
	assert!(diags.is_empty(), "encode diagnostics: {diags}");

	let (decoded, diags) = decode_one::<Endpoint>(&object);
	assert!(diags.is_empty(), "decode diagnostics: {diags}");
	assert_eq!(decoded, Some(sample()));
}

#[test]
fn null_element_is_rejected() {
	let (decoded, diags) = decode_one::<Endpoint>(&ObjectValue::null(Endpoint::descriptor()));
	assert!(decoded.is_none());
	assert!(diags.has_error());
}

#[test]
fn unknown_element_is_rejected() {
	let (decoded, diags) = decode_one::<Endpoint>(&ObjectValue::unknown(Endpoint::descriptor()));
	assert!(decoded.is_none());
	assert!(diags.has_error());
}

#[test]
fn foreign_descriptor_is_rejected() {
	let other = ObjectDescriptor::new("Other", vec![FieldDescriptor::new("flag", FieldKind::Bool)]);
	let (decoded, diags) = decode_one::<Endpoint>(&ObjectValue::null(other));
	assert!(decoded.is_none());
	assert!(diags.has_error());
}

#[test]
fn missing_field_reports_name() {
	let (_, diags) = require_str(&[], "host");
	assert!(diags.has_error());
	assert!(diags.entries()[0].detail.contains("host"));
}
