use std::any::Any;

use crate::attr::diag::Diagnostics;
use crate::attr::error::Result;
use crate::attr::value::ListValue;
use crate::attr::wire::RawValue;

/// Runtime-typed payload with a readable type name for mismatch reports.
///
/// The blanket impl covers every `'static` type, so schema-driven callers
/// can hand element instances and vectors across the erased boundary without
/// naming the element type at compile time.
pub trait AnyAttr: Any {
	/// Upcast for downcasting to the concrete type.
	fn as_any(&self) -> &dyn Any;
	/// Concrete Rust type name, used in type-mismatch diagnostics.
	fn type_name(&self) -> &'static str;
}

impl<V: Any> AnyAttr for V {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<V>()
	}
}

/// Type-erased attribute type contract.
///
/// Schema-driven decode and validation passes hold attribute types behind
/// this trait because they do not know the element type at compile time.
pub trait AttrType: AnyAttr {
	/// True when `other` is the same adapter for the same element type with a
	/// structurally equal element descriptor. Types for different element
	/// structs are never equal, even when their shapes are identical.
	fn equal(&self, other: &dyn AttrType) -> bool;

	/// Convert a raw dynamic list into this type's value.
	///
	/// Failures degrade to the unknown marker with error diagnostics; the
	/// conversion never panics and never yields a partial value.
	fn value_from_list(&self, input: &ListValue) -> (Box<dyn AttrValue>, Diagnostics);

	/// Decode transport data and convert, failing hard on wire errors.
	fn value_from_wire(&self, raw: &RawValue) -> Result<Box<dyn AttrValue>>;

	/// Null marker value carrying this type's semantic-equality binding.
	fn null_value(&self) -> Box<dyn AttrValue>;

	/// Zero-valued element instance used as a generic decode destination.
	fn new_object_instance(&self) -> Box<dyn AnyAttr>;

	/// Element vector of the given length and capacity, zero-valued.
	fn new_object_vec(&self, len: usize, cap: usize) -> Box<dyn AnyAttr>;

	/// Wrap an erased element instance into a singleton value.
	///
	/// A payload of any other runtime type yields a type-mismatch diagnostic
	/// naming the expected and actual types.
	fn value_from_object_instance(&self, instance: &dyn AnyAttr) -> (Option<Box<dyn AttrValue>>, Diagnostics);

	/// Wrap an erased element vector into a value, order-preserving.
	fn value_from_object_vec(&self, vec: &dyn AnyAttr) -> (Option<Box<dyn AttrValue>>, Diagnostics);
}

/// Type-erased attribute value contract.
pub trait AttrValue: AnyAttr {
	/// Structural equality. False for any other runtime type; never
	/// influenced by semantic-equality bindings.
	fn equal(&self, other: &dyn AttrValue) -> bool;

	/// Semantic equality verdict for the host change-detection pass.
	///
	/// `(false, empty)` means "no binding, defer to the host default", not
	/// "not equal". A mismatched runtime type for `other` is an error
	/// diagnostic.
	fn semantic_equals(&self, other: &dyn AttrValue) -> (bool, Diagnostics);

	/// Fresh attribute type describing this value's shape. Only structural
	/// equality with the originating type is preserved.
	fn value_type(&self) -> Box<dyn AttrType>;

	/// Erased single-element reduction; the payload is an `Option` of the
	/// element type, `None` both for empty values and after errors.
	fn to_object_instance(&self) -> (Box<dyn AnyAttr>, Diagnostics);

	/// Erased element extraction; the payload is a `Vec` of the element
	/// type, empty after errors.
	fn to_object_vec(&self) -> (Box<dyn AnyAttr>, Diagnostics);

	/// Underlying dynamic list value.
	fn as_list(&self) -> &ListValue;
}
