//! The in-memory record representation.

use serde_json::{Map, Value};

/// One record of a table: an ordered mapping from column name to scalar value.
///
/// Values are JSON scalars (string, number, boolean, null). Key order is
/// significant (the codec derives the column order of an export from the key
/// order of the first record), which is why `serde_json` is built with its
/// `preserve_order` feature.
pub type Record = Map<String, Value>;
