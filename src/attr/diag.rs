use std::fmt;

use serde::Serialize;

/// Severity level of one diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	/// The accompanying result is unusable.
	Error,
	/// The result is usable but something is off.
	Warning,
}

/// One reported problem with a short summary and supporting detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	/// Entry severity.
	pub severity: Severity,
	/// Short problem category.
	pub summary: Box<str>,
	/// Context for this specific occurrence.
	pub detail: Box<str>,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let level = match self.severity {
			Severity::Error => "error",
			Severity::Warning => "warning",
		};
		write!(f, "{level}: {}: {}", self.summary, self.detail)
	}
}

/// Accumulating collection of warnings and errors returned alongside results.
///
/// Recoverable conditions land here instead of aborting, so one pass can
/// surface several problems. Any error-level entry marks the accompanying
/// result as unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
	/// Empty collection.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Append an error entry.
	pub fn add_error(&mut self, summary: &str, detail: impl Into<String>) {
		self.0.push(Diagnostic {
			severity: Severity::Error,
			summary: summary.into(),
			detail: detail.into().into_boxed_str(),
		});
	}

	/// Append a warning entry.
	pub fn add_warning(&mut self, summary: &str, detail: impl Into<String>) {
		self.0.push(Diagnostic {
			severity: Severity::Warning,
			summary: summary.into(),
			detail: detail.into().into_boxed_str(),
		});
	}

	/// Move all entries from `other` into this collection.
	pub fn append(&mut self, mut other: Diagnostics) {
		self.0.append(&mut other.0);
	}

	/// True when at least one error-level entry is present.
	pub fn has_error(&self) -> bool {
		self.0.iter().any(|entry| entry.severity == Severity::Error)
	}

	/// True when no entries of any severity are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// All accumulated entries in insertion order.
	pub fn entries(&self) -> &[Diagnostic] {
		&self.0
	}
}

impl fmt::Display for Diagnostics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, entry) in self.0.iter().enumerate() {
			if idx > 0 {
				write!(f, "; ")?;
			}
			write!(f, "{entry}")?;
		}
		Ok(())
	}
}

/// Unwrap a fallible `(value, diagnostics)` pair, panicking on error entries.
///
/// Reserved for construction sites proven failure-free, such as fixed
/// schemas. Paths that process external input must inspect the diagnostics
/// instead.
pub fn must<V>(out: (V, Diagnostics)) -> V {
	let (value, diags) = out;
	if diags.has_error() {
		panic!("unrecoverable diagnostics: {diags}");
	}
	value
}

#[cfg(test)]
mod tests {
	use super::{Diagnostics, must};

	#[test]
	fn warnings_do_not_mark_errors() {
		let mut diags = Diagnostics::new();
		diags.add_warning("odd input", "value looks suspicious");
		assert!(!diags.has_error());
		assert!(!diags.is_empty());
	}

	#[test]
	fn append_carries_errors_across() {
		let mut inner = Diagnostics::new();
		inner.add_error("bad field", "expected string");

		let mut outer = Diagnostics::new();
		outer.add_warning("odd input", "first pass");
		outer.append(inner);

		assert!(outer.has_error());
		assert_eq!(outer.entries().len(), 2);
	}

	#[test]
	fn must_passes_clean_values_through() {
		let value = must((7, Diagnostics::new()));
		assert_eq!(value, 7);
	}

	#[test]
	#[should_panic(expected = "unrecoverable diagnostics")]
	fn must_panics_on_error_entries() {
		let mut diags = Diagnostics::new();
		diags.add_error("bad field", "expected string");
		let _ = must(((), diags));
	}
}
