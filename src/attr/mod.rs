mod descriptor;
mod diag;
mod erased;
mod error;
mod list;
mod shape;
mod value;
mod wire;

/// Schema descriptors for object-shaped values.
pub use descriptor::{FieldDescriptor, FieldKind, ObjectDescriptor};
/// Diagnostics collection and the panic-on-error unwrap helper.
pub use diag::{Diagnostic, Diagnostics, Severity, must};
/// Type-erased contracts used by schema-driven framework passes.
pub use erased::{AnyAttr, AttrType, AttrValue};
/// Hard error and result aliases.
pub use error::{AttrError, Result};
/// Nested-list adapter type, value, and construction options.
pub use list::{ListTypeOptions, NestedListType, NestedListValue, SemanticEquals};
/// Single-object adapter boundary and field access helpers.
pub use shape::{ObjectShape, decode_one, encode_one, field, require_bool, require_i64, require_str};
/// Dynamic tagged value model.
pub use value::{DynValue, FieldValue, ListValue, ObjectValue};
/// Wire transport values and decoding entry points.
pub use wire::{RawValue, list_from_raw, object_from_raw};
