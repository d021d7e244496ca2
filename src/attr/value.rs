use crate::attr::descriptor::{FieldKind, ObjectDescriptor};
use crate::attr::diag::Diagnostics;

/// Tagged dynamic value exchanged across the schema boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum DynValue {
	/// Explicitly absent.
	Null,
	/// Not yet known, for example still being computed by a remote plan.
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
	String(Box<str>),
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// Ordered sequence of values.
	List(Vec<DynValue>),
	/// Nested object value.
	Object(ObjectValue),
}

impl DynValue {
	/// Short kind name used in error messages.
	pub fn kind_name(&self) -> &'static str {
		match self {
			DynValue::Null => "null",
			DynValue::Unknown => "unknown",
			DynValue::Bool(_) => "bool",
			DynValue::I64(_) => "i64",
			DynValue::U64(_) => "u64",
			DynValue::F64(_) => "f64",
			DynValue::String(_) => "string",
			DynValue::Bytes(_) => "bytes",
			DynValue::List(_) => "list",
			DynValue::Object(_) => "object",
		}
	}

	/// True when this value satisfies the declared kind.
	///
	/// Null and Unknown satisfy every kind; their state is orthogonal to the
	/// declared shape.
	pub fn matches_kind(&self, kind: &FieldKind) -> bool {
		match (self, kind) {
			(DynValue::Null | DynValue::Unknown, _) => true,
			(DynValue::Bool(_), FieldKind::Bool) => true,
			(DynValue::I64(_), FieldKind::I64) => true,
			(DynValue::U64(_), FieldKind::U64) => true,
			(DynValue::F64(_), FieldKind::F64) => true,
			(DynValue::String(_), FieldKind::String) => true,
			(DynValue::Bytes(_), FieldKind::Bytes) => true,
			(DynValue::List(items), FieldKind::List(inner)) => items.iter().all(|item| item.matches_kind(inner)),
			(DynValue::Object(object), FieldKind::Object(desc)) => object.descriptor() == desc,
			_ => false,
		}
	}
}

/// Named field slot inside a known object value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: DynValue,
}

#[derive(Debug, Clone, PartialEq)]
enum ObjectState {
	Null,
	Unknown,
	Known(Vec<FieldValue>),
}

/// Three-state object value carrying its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
	descriptor: ObjectDescriptor,
	state: ObjectState,
}

impl ObjectValue {
	/// Null marker for the given shape.
	pub fn null(descriptor: ObjectDescriptor) -> Self {
		Self {
			descriptor,
			state: ObjectState::Null,
		}
	}

	/// Unknown marker for the given shape.
	pub fn unknown(descriptor: ObjectDescriptor) -> Self {
		Self {
			descriptor,
			state: ObjectState::Unknown,
		}
	}

	/// Known value from named fields, validated against the descriptor.
	///
	/// Fields must appear in declaration order with matching kinds. On any
	/// mismatch the returned value is the unknown marker and the diagnostics
	/// carry one error per problem.
	pub fn known(descriptor: ObjectDescriptor, fields: Vec<FieldValue>) -> (Self, Diagnostics) {
		let mut diags = Diagnostics::new();

		if fields.len() != descriptor.fields.len() {
			diags.add_error(
				"invalid object value",
				format!(
					"{}: field count mismatch: want {}, got {}",
					descriptor.type_name,
					descriptor.fields.len(),
					fields.len()
				),
			);
			return (Self::unknown(descriptor), diags);
		}

		for (decl, field) in descriptor.fields.iter().zip(&fields) {
			if decl.name != field.name {
				diags.add_error(
					"invalid object value",
					format!("{}: field order mismatch: want {}, got {}", descriptor.type_name, decl.name, field.name),
				);
				continue;
			}
			if !field.value.matches_kind(&decl.kind) {
				diags.add_error(
					"invalid object value",
					format!(
						"{}.{}: kind mismatch: want {}, got {}",
						descriptor.type_name,
						decl.name,
						decl.kind.name(),
						field.value.kind_name()
					),
				);
			}
		}

		if diags.has_error() {
			return (Self::unknown(descriptor), diags);
		}

		(
			Self {
				descriptor,
				state: ObjectState::Known(fields),
			},
			diags,
		)
	}

	/// Shape descriptor for this value.
	pub fn descriptor(&self) -> &ObjectDescriptor {
		&self.descriptor
	}

	/// True for the null marker.
	pub fn is_null(&self) -> bool {
		self.state == ObjectState::Null
	}

	/// True for the unknown marker.
	pub fn is_unknown(&self) -> bool {
		self.state == ObjectState::Unknown
	}

	/// Named fields of a known value; empty for null and unknown markers.
	pub fn fields(&self) -> &[FieldValue] {
		match &self.state {
			ObjectState::Known(fields) => fields,
			_ => &[],
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
enum ListState {
	Null,
	Unknown,
	Known(Vec<ObjectValue>),
}

/// Three-state list value whose elements share one object shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
	elem: ObjectDescriptor,
	state: ListState,
}

impl ListValue {
	/// Null marker for a list of the given element shape.
	pub fn null(elem: ObjectDescriptor) -> Self {
		Self {
			elem,
			state: ListState::Null,
		}
	}

	/// Unknown marker for a list of the given element shape.
	pub fn unknown(elem: ObjectDescriptor) -> Self {
		Self {
			elem,
			state: ListState::Unknown,
		}
	}

	/// Known list from ordered elements, each validated against `elem`.
	///
	/// On any element descriptor mismatch the returned value is the unknown
	/// marker and the diagnostics carry one error per offending element.
	pub fn known(elem: ObjectDescriptor, elements: Vec<ObjectValue>) -> (Self, Diagnostics) {
		let mut diags = Diagnostics::new();

		for (index, element) in elements.iter().enumerate() {
			if element.descriptor() != &elem {
				diags.add_error(
					"invalid list element",
					format!(
						"element {index}: descriptor mismatch: want {}, got {}",
						elem.type_name,
						element.descriptor().type_name
					),
				);
			}
		}

		if diags.has_error() {
			return (Self::unknown(elem), diags);
		}

		(
			Self {
				elem,
				state: ListState::Known(elements),
			},
			diags,
		)
	}

	/// Element shape shared by all elements.
	pub fn element_descriptor(&self) -> &ObjectDescriptor {
		&self.elem
	}

	/// True for the null marker.
	pub fn is_null(&self) -> bool {
		self.state == ListState::Null
	}

	/// True for the unknown marker.
	pub fn is_unknown(&self) -> bool {
		self.state == ListState::Unknown
	}

	/// Ordered elements of a known list; empty for null and unknown markers.
	pub fn elements(&self) -> &[ObjectValue] {
		match &self.state {
			ListState::Known(elements) => elements,
			_ => &[],
		}
	}
}
