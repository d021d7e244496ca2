/// Value kind of one schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
	/// Boolean scalar.
	Bool,
	/// Signed integer scalar.
	I64,
	/// Unsigned integer scalar.
	U64,
	/// 64-bit float scalar.
	F64,
	/// UTF-8 string.
	String,
	/// Opaque byte payload.
	Bytes,
	/// Ordered sequence with one element kind.
	List(Box<FieldKind>),
	/// Nested object with its own descriptor.
	Object(ObjectDescriptor),
}

impl FieldKind {
	/// Short kind name used in error messages.
	pub fn name(&self) -> &'static str {
		match self {
			FieldKind::Bool => "bool",
			FieldKind::I64 => "i64",
			FieldKind::U64 => "u64",
			FieldKind::F64 => "f64",
			FieldKind::String => "string",
			FieldKind::Bytes => "bytes",
			FieldKind::List(_) => "list",
			FieldKind::Object(_) => "object",
		}
	}
}

/// One named field declaration in an object descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
	/// Field identifier.
	pub name: Box<str>,
	/// Declared value kind.
	pub kind: FieldKind,
}

impl FieldDescriptor {
	/// Build a declaration from a name and kind.
	pub fn new(name: &str, kind: FieldKind) -> Self {
		Self { name: name.into(), kind }
	}
}

/// Ordered, structurally comparable description of one object shape.
///
/// Derivation from a Rust struct is deterministic, so two descriptors built
/// for the same struct always compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
	/// Nominal type name, used in diagnostics only.
	pub type_name: Box<str>,
	/// Field declarations in wire order.
	pub fields: Vec<FieldDescriptor>,
}

impl ObjectDescriptor {
	/// Build a descriptor from a type name and ordered field declarations.
	pub fn new(type_name: &str, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			type_name: type_name.into(),
			fields,
		}
	}

	/// Look up a field declaration by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}
}

#[cfg(test)]
mod tests {
	use super::{FieldDescriptor, FieldKind, ObjectDescriptor};

	fn sample() -> ObjectDescriptor {
		ObjectDescriptor::new(
			"Endpoint",
			vec![
				FieldDescriptor::new("host", FieldKind::String),
				FieldDescriptor::new("port", FieldKind::I64),
			],
		)
	}

	#[test]
	fn same_shape_compares_equal() {
		assert_eq!(sample(), sample());
	}

	#[test]
	fn field_order_is_part_of_identity() {
		let reordered = ObjectDescriptor::new(
			"Endpoint",
			vec![
				FieldDescriptor::new("port", FieldKind::I64),
				FieldDescriptor::new("host", FieldKind::String),
			],
		);
		assert_ne!(sample(), reordered);
	}

	#[test]
	fn field_lookup_finds_declared_names() {
		let desc = sample();
		assert_eq!(desc.field("port").map(|f| f.kind.name()), Some("i64"));
		assert!(desc.field("missing").is_none());
	}
}
