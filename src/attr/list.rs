use std::fmt;
use std::marker::PhantomData;

use crate::attr::descriptor::ObjectDescriptor;
use crate::attr::diag::{Diagnostics, must};
use crate::attr::erased::{AnyAttr, AttrType, AttrValue};
use crate::attr::error::{AttrError, Result};
use crate::attr::shape::{ObjectShape, decode_one, encode_one};
use crate::attr::value::ListValue;
use crate::attr::wire::{RawValue, list_from_raw};

/// Caller-supplied deep comparison between two list values of the same shape.
///
/// Returns whether the values are "equal enough" to suppress spurious change
/// detection, plus any diagnostics raised while comparing.
pub type SemanticEquals<T> = fn(&NestedListValue<T>, &NestedListValue<T>) -> (bool, Diagnostics);

/// Construction-time options for nested list types and values.
pub struct ListTypeOptions<T: ObjectShape> {
	/// Optional semantic-equality override; absent means the host framework's
	/// default policy applies.
	pub semantic_equals: Option<SemanticEquals<T>>,
}

impl<T: ObjectShape> ListTypeOptions<T> {
	/// Options carrying a semantic-equality override.
	pub fn semantic(f: SemanticEquals<T>) -> Self {
		Self { semantic_equals: Some(f) }
	}
}

impl<T: ObjectShape> Default for ListTypeOptions<T> {
	fn default() -> Self {
		Self { semantic_equals: None }
	}
}

impl<T: ObjectShape> Clone for ListTypeOptions<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: ObjectShape> Copy for ListTypeOptions<T> {}

/// Attribute type describing "a list of objects shaped like `T`".
///
/// Constructed once per schema attribute and immutable afterwards. The
/// element descriptor is always derived from `T`, so two instances for the
/// same `T` describe structurally equal element types.
pub struct NestedListType<T: ObjectShape> {
	elem: ObjectDescriptor,
	semantic_equals: Option<SemanticEquals<T>>,
}

impl<T: ObjectShape> NestedListType<T> {
	/// Type with no semantic-equality binding.
	pub fn new() -> Self {
		Self::with_options(ListTypeOptions::default())
	}

	/// Type with explicit construction options.
	pub fn with_options(opts: ListTypeOptions<T>) -> Self {
		Self {
			elem: T::descriptor(),
			semantic_equals: opts.semantic_equals,
		}
	}

	/// Element shape this type describes.
	pub fn element_descriptor(&self) -> &ObjectDescriptor {
		&self.elem
	}

	/// Convert a raw dynamic list into a typed value.
	///
	/// Null and unknown inputs map to the corresponding markers. Known input
	/// elements are rewrapped under `T`'s descriptor; any rewrap failure is
	/// reported as diagnostics and degrades to the unknown marker. Never a
	/// panic, never a partially-constructed value.
	pub fn value_from_list(&self, input: &ListValue) -> (NestedListValue<T>, Diagnostics) {
		let mut diags = Diagnostics::new();

		if input.is_null() {
			return (NestedListValue::null(), diags);
		}
		if input.is_unknown() {
			return (NestedListValue::unknown(), diags);
		}

		let (list, d) = ListValue::known(T::descriptor(), input.elements().to_vec());
		diags.append(d);
		if diags.has_error() {
			return (NestedListValue::unknown(), diags);
		}

		(
			NestedListValue {
				list,
				semantic_equals: self.semantic_equals,
				marker: PhantomData,
			},
			diags,
		)
	}

	/// Decode transport data and convert into a typed value.
	///
	/// Wire failures are hard errors; error diagnostics from the conversion
	/// step are wrapped into a hard error as well, since no diagnostics
	/// context exists at this layer.
	pub fn value_from_wire(&self, raw: &RawValue) -> Result<NestedListValue<T>> {
		let list = list_from_raw(&self.elem, raw)?;
		let (value, diags) = self.value_from_list(&list);
		if diags.has_error() {
			return Err(AttrError::WireConversion { detail: diags.to_string() });
		}
		Ok(value)
	}

	/// Null marker carrying this type's semantic-equality binding.
	pub fn null_value(&self) -> NestedListValue<T> {
		NestedListValue::null_with(self.options())
	}

	fn options(&self) -> ListTypeOptions<T> {
		ListTypeOptions {
			semantic_equals: self.semantic_equals,
		}
	}
}

impl<T: ObjectShape> Default for NestedListType<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ObjectShape> Clone for NestedListType<T> {
	fn clone(&self) -> Self {
		Self {
			elem: self.elem.clone(),
			semantic_equals: self.semantic_equals,
		}
	}
}

impl<T: ObjectShape> PartialEq for NestedListType<T> {
	fn eq(&self, other: &Self) -> bool {
		self.elem == other.elem
	}
}

impl<T: ObjectShape> fmt::Debug for NestedListType<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NestedListType")
			.field("elem", &self.elem)
			.field("semantic_equals", &self.semantic_equals.is_some())
			.finish()
	}
}

impl<T: ObjectShape> AttrType for NestedListType<T> {
	fn equal(&self, other: &dyn AttrType) -> bool {
		match other.as_any().downcast_ref::<Self>() {
			Some(other) => self.elem == other.elem,
			None => false,
		}
	}

	fn value_from_list(&self, input: &ListValue) -> (Box<dyn AttrValue>, Diagnostics) {
		let (value, diags) = NestedListType::value_from_list(self, input);
		(Box::new(value), diags)
	}

	fn value_from_wire(&self, raw: &RawValue) -> Result<Box<dyn AttrValue>> {
		let value = NestedListType::value_from_wire(self, raw)?;
		Ok(Box::new(value) as Box<dyn AttrValue>)
	}

	fn null_value(&self) -> Box<dyn AttrValue> {
		Box::new(NestedListType::null_value(self))
	}

	fn new_object_instance(&self) -> Box<dyn AnyAttr> {
		Box::new(T::default())
	}

	fn new_object_vec(&self, len: usize, cap: usize) -> Box<dyn AnyAttr> {
		let mut vec: Vec<T> = Vec::with_capacity(cap.max(len));
		vec.resize_with(len, T::default);
		Box::new(vec)
	}

	fn value_from_object_instance(&self, instance: &dyn AnyAttr) -> (Option<Box<dyn AttrValue>>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let Some(value) = instance.as_any().downcast_ref::<T>() else {
			diags.add_error(
				"invalid object instance",
				format!(
					"incorrect type: want {}, got {}",
					std::any::type_name::<T>(),
					instance.type_name()
				),
			);
			return (None, diags);
		};

		let (wrapped, d) = NestedListValue::from_value(value, self.options());
		diags.append(d);
		if diags.has_error() {
			return (None, diags);
		}
		(Some(Box::new(wrapped)), diags)
	}

	fn value_from_object_vec(&self, vec: &dyn AnyAttr) -> (Option<Box<dyn AttrValue>>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let Some(values) = vec.as_any().downcast_ref::<Vec<T>>() else {
			diags.add_error(
				"invalid object vector",
				format!(
					"incorrect type: want {}, got {}",
					std::any::type_name::<Vec<T>>(),
					vec.type_name()
				),
			);
			return (None, diags);
		};

		let (wrapped, d) = NestedListValue::from_slice(values, self.options());
		diags.append(d);
		if diags.has_error() {
			return (None, diags);
		}
		(Some(Box::new(wrapped)), diags)
	}
}

/// List value whose elements decode into `T`.
///
/// Immutable once constructed; a new value replaces, never mutates, an old
/// one.
pub struct NestedListValue<T: ObjectShape> {
	list: ListValue,
	semantic_equals: Option<SemanticEquals<T>>,
	marker: PhantomData<T>,
}

enum SemanticVerdict {
	Equal,
	NotEqual,
	Defer,
}

impl<T: ObjectShape> NestedListValue<T> {
	/// Null marker with no semantic-equality binding.
	pub fn null() -> Self {
		Self::null_with(ListTypeOptions::default())
	}

	/// Null marker with explicit construction options.
	pub fn null_with(opts: ListTypeOptions<T>) -> Self {
		Self {
			list: ListValue::null(T::descriptor()),
			semantic_equals: opts.semantic_equals,
			marker: PhantomData,
		}
	}

	/// Unknown marker.
	pub fn unknown() -> Self {
		Self {
			list: ListValue::unknown(T::descriptor()),
			semantic_equals: None,
			marker: PhantomData,
		}
	}

	/// Singleton list wrapping one element value.
	///
	/// This is the "optional nested object emulated via a list" idiom paired
	/// with [`NestedListValue::to_option`].
	pub fn from_value(value: &T, opts: ListTypeOptions<T>) -> (Self, Diagnostics) {
		Self::from_slice(std::slice::from_ref(value), opts)
	}

	/// Singleton list, panicking on error diagnostics.
	pub fn from_value_must(value: &T, opts: ListTypeOptions<T>) -> Self {
		must(Self::from_value(value, opts))
	}

	/// Order-preserving list from borrowed element values.
	///
	/// Every element is encoded independently; encode failures across all
	/// elements are accumulated, and any error aborts with the unknown
	/// marker instead of a partial value.
	pub fn from_slice(values: &[T], opts: ListTypeOptions<T>) -> (Self, Diagnostics) {
		let mut diags = Diagnostics::new();
		let mut elements = Vec::with_capacity(values.len());

		for value in values {
			let (object, d) = encode_one(value);
			diags.append(d);
			elements.push(object);
		}
		if diags.has_error() {
			return (Self::unknown(), diags);
		}

		let (list, d) = ListValue::known(T::descriptor(), elements);
		diags.append(d);
		if diags.has_error() {
			return (Self::unknown(), diags);
		}

		(
			Self {
				list,
				semantic_equals: opts.semantic_equals,
				marker: PhantomData,
			},
			diags,
		)
	}

	/// Order-preserving list from borrowed values, panicking on error
	/// diagnostics.
	pub fn from_slice_must(values: &[T], opts: ListTypeOptions<T>) -> Self {
		must(Self::from_slice(values, opts))
	}

	/// Order-preserving list from owned element values.
	pub fn from_iter<I: IntoIterator<Item = T>>(values: I, opts: ListTypeOptions<T>) -> (Self, Diagnostics) {
		let values: Vec<T> = values.into_iter().collect();
		Self::from_slice(&values, opts)
	}

	/// Order-preserving list from owned values, panicking on error
	/// diagnostics.
	pub fn from_iter_must<I: IntoIterator<Item = T>>(values: I, opts: ListTypeOptions<T>) -> Self {
		must(Self::from_iter(values, opts))
	}

	/// True for the null marker.
	pub fn is_null(&self) -> bool {
		self.list.is_null()
	}

	/// True for the unknown marker.
	pub fn is_unknown(&self) -> bool {
		self.list.is_unknown()
	}

	/// Underlying dynamic list value.
	pub fn as_list(&self) -> &ListValue {
		&self.list
	}

	/// Fresh attribute type describing this value's shape.
	///
	/// The semantic-equality binding is not preserved; only structural
	/// equality with the originating type is.
	pub fn value_type(&self) -> NestedListType<T> {
		NestedListType::new()
	}

	/// Single-element reduction.
	///
	/// Zero elements (including null and unknown markers) yield `None`
	/// without error; one element decodes into `Some`; two or more are a
	/// cardinality error. The zero/many asymmetry is deliberate: a list
	/// attribute emulating an optional nested object treats emptiness as
	/// absence.
	pub fn to_option(&self) -> (Option<T>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let elements = self.list.elements();

		match elements.len() {
			0 => (None, diags),
			1 => {
				let (decoded, d) = decode_one(&elements[0]);
				diags.append(d);
				if diags.has_error() {
					return (None, diags);
				}
				(decoded, diags)
			}
			n => {
				diags.add_error("invalid list cardinality", format!("too many elements: want 1, got {n}"));
				(None, diags)
			}
		}
	}

	/// Ordered extraction of every element.
	///
	/// Null and unknown markers yield an empty vector without error. Decode
	/// failures across all elements are accumulated, and any error discards
	/// partial results.
	pub fn to_vec(&self) -> (Vec<T>, Diagnostics) {
		let mut diags = Diagnostics::new();
		let elements = self.list.elements();
		let mut out = Vec::with_capacity(elements.len());

		for element in elements {
			let (decoded, d) = decode_one(element);
			diags.append(d);
			if let Some(decoded) = decoded {
				out.push(decoded);
			}
		}

		if diags.has_error() {
			return (Vec::new(), diags);
		}
		(out, diags)
	}

	/// Typed semantic-equality check, flattened to the host boolean contract.
	///
	/// `(false, empty)` with no binding means "defer to the host default".
	pub fn semantic_equals(&self, other: &NestedListValue<T>) -> (bool, Diagnostics) {
		let (verdict, diags) = self.semantic_verdict(other);
		(matches!(verdict, SemanticVerdict::Equal), diags)
	}

	fn semantic_verdict(&self, other: &NestedListValue<T>) -> (SemanticVerdict, Diagnostics) {
		match self.semantic_equals {
			None => (SemanticVerdict::Defer, Diagnostics::new()),
			Some(compare) => {
				let (equal, diags) = compare(self, other);
				let verdict = if equal { SemanticVerdict::Equal } else { SemanticVerdict::NotEqual };
				(verdict, diags)
			}
		}
	}
}

impl<T: ObjectShape> Clone for NestedListValue<T> {
	fn clone(&self) -> Self {
		Self {
			list: self.list.clone(),
			semantic_equals: self.semantic_equals,
			marker: PhantomData,
		}
	}
}

impl<T: ObjectShape> PartialEq for NestedListValue<T> {
	fn eq(&self, other: &Self) -> bool {
		self.list == other.list
	}
}

impl<T: ObjectShape> fmt::Debug for NestedListValue<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NestedListValue")
			.field("list", &self.list)
			.field("semantic_equals", &self.semantic_equals.is_some())
			.finish()
	}
}

impl<T: ObjectShape> AttrValue for NestedListValue<T> {
	fn equal(&self, other: &dyn AttrValue) -> bool {
		match other.as_any().downcast_ref::<Self>() {
			Some(other) => self.list == other.list,
			None => false,
		}
	}

	fn semantic_equals(&self, other: &dyn AttrValue) -> (bool, Diagnostics) {
		let mut diags = Diagnostics::new();

		// No binding: defer before inspecting `other` at all.
		if self.semantic_equals.is_none() {
			return (false, diags);
		}

		let Some(other) = other.as_any().downcast_ref::<Self>() else {
			diags.add_error(
				"semantic equality",
				format!(
					"incorrect type: want {}, got {}",
					std::any::type_name::<Self>(),
					other.type_name()
				),
			);
			return (false, diags);
		};

		NestedListValue::semantic_equals(self, other)
	}

	fn value_type(&self) -> Box<dyn AttrType> {
		Box::new(NestedListValue::value_type(self))
	}

	fn to_object_instance(&self) -> (Box<dyn AnyAttr>, Diagnostics) {
		let (decoded, diags) = self.to_option();
		(Box::new(decoded), diags)
	}

	fn to_object_vec(&self) -> (Box<dyn AnyAttr>, Diagnostics) {
		let (decoded, diags) = self.to_vec();
		(Box::new(decoded), diags)
	}

	fn as_list(&self) -> &ListValue {
		&self.list
	}
}
