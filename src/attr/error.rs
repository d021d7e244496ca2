use thiserror::Error;

/// Crate-local result type for wire-layer operations.
pub type Result<T> = std::result::Result<T, AttrError>;

/// Hard errors produced while decoding transport data into dynamic values.
///
/// These occur before any diagnostics-collection context exists, so they are
/// returned as errors instead of being accumulated.
#[derive(Debug, Error)]
pub enum AttrError {
	/// Transport bytes were not a valid raw value encoding.
	#[error("wire json: {0}")]
	WireJson(#[from] serde_json::Error),
	/// Raw value kind did not match the expected descriptor kind.
	#[error("wire kind mismatch at {at}: want {expected}, got {got}")]
	WireKindMismatch {
		/// Dotted location of the offending value.
		at: String,
		/// Kind the descriptor declares.
		expected: &'static str,
		/// Kind found on the wire.
		got: &'static str,
	},
	/// Raw object carried a field the descriptor does not declare.
	#[error("wire unknown field {field} on {type_name}")]
	WireUnknownField {
		/// Object type being decoded.
		type_name: String,
		/// Undeclared field name.
		field: String,
	},
	/// Raw object was missing a declared field.
	#[error("wire missing field {field} on {type_name}")]
	WireMissingField {
		/// Object type being decoded.
		type_name: String,
		/// Missing field name.
		field: String,
	},
	/// List element was not an object-shaped raw value.
	#[error("wire element {index} is not an object: got {got}")]
	WireElementNotObject {
		/// Zero-based element position.
		index: usize,
		/// Kind found on the wire.
		got: &'static str,
	},
	/// Conversion after a successful wire decode reported error diagnostics.
	#[error("wire conversion failed: {detail}")]
	WireConversion {
		/// Rendered diagnostics from the failed conversion.
		detail: String,
	},
}
