use crate::attr::descriptor::ObjectDescriptor;
use crate::attr::diag::Diagnostics;
use crate::attr::value::{DynValue, FieldValue, ObjectValue};

/// Field-level isomorphism between one Rust struct and one dynamic object.
///
/// Implemented once per element struct as a fixed registration of its
/// exported fields. `descriptor` must be deterministic: every call returns a
/// structurally equal descriptor, since the descriptor is the struct's
/// identity on the dynamic side. The `Default` supertrait supplies the
/// zero-valued decode destinations handed out by the erased factory helpers.
pub trait ObjectShape: Default + Sized + 'static {
	/// Descriptor for this struct's exported field shape.
	fn descriptor() -> ObjectDescriptor;

	/// Decode known object fields, reporting problems as diagnostics.
	///
	/// Fields arrive validated against `descriptor`, in declaration order.
	fn decode(fields: &[FieldValue]) -> (Option<Self>, Diagnostics);

	/// Encode this value into named fields in declaration order.
	fn encode(&self) -> (Vec<FieldValue>, Diagnostics);
}

/// Decode one dynamic object value into a `T`.
///
/// Null and unknown elements are rejected with an error diagnostic: a known
/// list never exposes element content it cannot decode.
pub fn decode_one<T: ObjectShape>(value: &ObjectValue) -> (Option<T>, Diagnostics) {
	let mut diags = Diagnostics::new();
	let expected = T::descriptor();

	if value.descriptor() != &expected {
		diags.add_error(
			"invalid object element",
			format!(
				"descriptor mismatch: want {}, got {}",
				expected.type_name,
				value.descriptor().type_name
			),
		);
		return (None, diags);
	}

	if value.is_null() || value.is_unknown() {
		let state = if value.is_null() { "null" } else { "unknown" };
		diags.add_error(
			"invalid object element",
			format!("cannot decode {state} object into {}", expected.type_name),
		);
		return (None, diags);
	}

	let (decoded, d) = T::decode(value.fields());
	diags.append(d);
	if diags.has_error() {
		return (None, diags);
	}
	(decoded, diags)
}

/// Encode one `T` into a known dynamic object value under `T`'s descriptor.
///
/// On failure the returned value is the unknown marker and the diagnostics
/// carry the errors; callers must discard the value.
pub fn encode_one<T: ObjectShape>(value: &T) -> (ObjectValue, Diagnostics) {
	let mut diags = Diagnostics::new();
	let descriptor = T::descriptor();

	let (fields, d) = value.encode();
	diags.append(d);
	if diags.has_error() {
		return (ObjectValue::unknown(descriptor), diags);
	}

	let (object, d) = ObjectValue::known(descriptor, fields);
	diags.append(d);
	(object, diags)
}

/// Look up a named field slot in decoded object fields.
pub fn field<'a>(fields: &'a [FieldValue], name: &str) -> Option<&'a DynValue> {
	fields.iter().find(|slot| slot.name.as_ref() == name).map(|slot| &slot.value)
}

/// Fetch a required string field, reporting absence or kind mismatch.
pub fn require_str(fields: &[FieldValue], name: &str) -> (String, Diagnostics) {
	let mut diags = Diagnostics::new();
	match field(fields, name) {
		Some(DynValue::String(value)) => (value.to_string(), diags),
		Some(other) => {
			diags.add_error("invalid field value", format!("{name}: want string, got {}", other.kind_name()));
			(String::new(), diags)
		}
		None => {
			diags.add_error("invalid field value", format!("{name}: missing required field"));
			(String::new(), diags)
		}
	}
}

/// Fetch a required signed integer field, reporting absence or kind mismatch.
pub fn require_i64(fields: &[FieldValue], name: &str) -> (i64, Diagnostics) {
	let mut diags = Diagnostics::new();
	match field(fields, name) {
		Some(DynValue::I64(value)) => (*value, diags),
		Some(other) => {
			diags.add_error("invalid field value", format!("{name}: want i64, got {}", other.kind_name()));
			(0, diags)
		}
		None => {
			diags.add_error("invalid field value", format!("{name}: missing required field"));
			(0, diags)
		}
	}
}

/// Fetch a required boolean field, reporting absence or kind mismatch.
pub fn require_bool(fields: &[FieldValue], name: &str) -> (bool, Diagnostics) {
	let mut diags = Diagnostics::new();
	match field(fields, name) {
		Some(DynValue::Bool(value)) => (*value, diags),
		Some(other) => {
			diags.add_error("invalid field value", format!("{name}: want bool, got {}", other.kind_name()));
			(false, diags)
		}
		None => {
			diags.add_error("invalid field value", format!("{name}: missing required field"));
			(false, diags)
		}
	}
}

#[cfg(test)]
mod tests;
