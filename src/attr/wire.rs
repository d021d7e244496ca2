use serde::{Deserialize, Serialize};

use crate::attr::descriptor::{FieldKind, ObjectDescriptor};
use crate::attr::error::{AttrError, Result};
use crate::attr::value::{DynValue, FieldValue, ListValue, ObjectValue};

/// Schema-less transport value produced by the wire layer.
///
/// This is the in-memory form of the opaque transport encoding; JSON bytes
/// are the reference serialization. A raw value carries no descriptor, so
/// decoding into typed dynamic values always happens against a descriptor
/// supplied by the schema side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawValue {
	/// Explicitly absent.
	Null,
	/// Not yet known.
	Unknown,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// 64-bit float scalar.
	F64(f64),
	/// UTF-8 string.
	String(String),
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// Ordered sequence of raw values.
	List(Vec<RawValue>),
	/// Named raw values in wire order.
	Object(Vec<(String, RawValue)>),
}

impl RawValue {
	/// Parse transport JSON bytes into a raw value.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(bytes)?)
	}

	/// Serialize this raw value into transport JSON bytes.
	pub fn to_json_vec(&self) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec(self)?)
	}

	/// Short kind name used in hard errors.
	pub fn kind_name(&self) -> &'static str {
		match self {
			RawValue::Null => "null",
			RawValue::Unknown => "unknown",
			RawValue::Bool(_) => "bool",
			RawValue::I64(_) => "i64",
			RawValue::U64(_) => "u64",
			RawValue::F64(_) => "f64",
			RawValue::String(_) => "string",
			RawValue::Bytes(_) => "bytes",
			RawValue::List(_) => "list",
			RawValue::Object(_) => "object",
		}
	}
}

/// Decode a raw transport value into a typed list of objects.
///
/// Null and unknown raw values map to the corresponding list markers. Known
/// lists are decoded element by element against `elem`; any mismatch is a
/// hard error, since nothing downstream could use a half-decoded list.
pub fn list_from_raw(elem: &ObjectDescriptor, raw: &RawValue) -> Result<ListValue> {
	match raw {
		RawValue::Null => Ok(ListValue::null(elem.clone())),
		RawValue::Unknown => Ok(ListValue::unknown(elem.clone())),
		RawValue::List(items) => {
			let mut elements = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				match item {
					RawValue::Object(_) | RawValue::Null | RawValue::Unknown => {
						elements.push(object_from_raw(elem, item, &format!("element {index}"))?);
					}
					other => {
						return Err(AttrError::WireElementNotObject {
							index,
							got: other.kind_name(),
						});
					}
				}
			}

			let (list, diags) = ListValue::known(elem.clone(), elements);
			if diags.has_error() {
				return Err(AttrError::WireConversion { detail: diags.to_string() });
			}
			Ok(list)
		}
		other => Err(AttrError::WireKindMismatch {
			at: "list".to_string(),
			expected: "list",
			got: other.kind_name(),
		}),
	}
}

/// Decode a raw object against a descriptor, producing fields in
/// declaration order.
pub fn object_from_raw(desc: &ObjectDescriptor, raw: &RawValue, at: &str) -> Result<ObjectValue> {
	let pairs = match raw {
		RawValue::Null => return Ok(ObjectValue::null(desc.clone())),
		RawValue::Unknown => return Ok(ObjectValue::unknown(desc.clone())),
		RawValue::Object(pairs) => pairs,
		other => {
			return Err(AttrError::WireKindMismatch {
				at: at.to_string(),
				expected: "object",
				got: other.kind_name(),
			});
		}
	};

	for (name, _) in pairs {
		if desc.field(name).is_none() {
			return Err(AttrError::WireUnknownField {
				type_name: desc.type_name.to_string(),
				field: name.clone(),
			});
		}
	}

	let mut fields = Vec::with_capacity(desc.fields.len());
	for decl in &desc.fields {
		let value = pairs
			.iter()
			.find(|(name, _)| name.as_str() == decl.name.as_ref())
			.map(|(_, value)| value)
			.ok_or_else(|| AttrError::WireMissingField {
				type_name: desc.type_name.to_string(),
				field: decl.name.to_string(),
			})?;

		let at = format!("{at}.{}", decl.name);
		fields.push(FieldValue {
			name: decl.name.clone(),
			value: dyn_from_raw(&decl.kind, value, &at)?,
		});
	}

	let (object, diags) = ObjectValue::known(desc.clone(), fields);
	if diags.has_error() {
		return Err(AttrError::WireConversion { detail: diags.to_string() });
	}
	Ok(object)
}

fn dyn_from_raw(kind: &FieldKind, raw: &RawValue, at: &str) -> Result<DynValue> {
	match (kind, raw) {
		(_, RawValue::Null) => Ok(DynValue::Null),
		(_, RawValue::Unknown) => Ok(DynValue::Unknown),
		(FieldKind::Bool, RawValue::Bool(value)) => Ok(DynValue::Bool(*value)),
		(FieldKind::I64, RawValue::I64(value)) => Ok(DynValue::I64(*value)),
		(FieldKind::U64, RawValue::U64(value)) => Ok(DynValue::U64(*value)),
		(FieldKind::F64, RawValue::F64(value)) => Ok(DynValue::F64(*value)),
		(FieldKind::String, RawValue::String(value)) => Ok(DynValue::String(value.as_str().into())),
		(FieldKind::Bytes, RawValue::Bytes(value)) => Ok(DynValue::Bytes(value.clone())),
		(FieldKind::List(inner), RawValue::List(items)) => {
			let mut out = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				out.push(dyn_from_raw(inner, item, &format!("{at}[{index}]"))?);
			}
			Ok(DynValue::List(out))
		}
		(FieldKind::Object(desc), RawValue::Object(_)) => Ok(DynValue::Object(object_from_raw(desc, raw, at)?)),
		(kind, other) => Err(AttrError::WireKindMismatch {
			at: at.to_string(),
			expected: kind.name(),
			got: other.kind_name(),
		}),
	}
}
