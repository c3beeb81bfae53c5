//! Property list payload decoding.

use crate::error::DecodeError;
use plist::{Dictionary, Value};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

const BINARY_MAGIC: &[u8] = b"bplist";

/// Which record in the payload names the script, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchQuery {
    /// Key holding the record's kind.
    pub type_name_field: String,
    /// Kind of record that carries a script.
    pub type_name_value: String,
    /// Key holding the declared script path.
    pub path_field: String,
    /// The declared path must end with this.
    pub required_suffix: String,
}

impl Default for PatchQuery {
    fn default() -> Self {
        Self {
            type_name_field: "type-name".to_string(),
            type_name_value: "Patch Script".to_string(),
            path_field: "file-path".to_string(),
            required_suffix: ".js".to_string(),
        }
    }
}

/// A decoded clipboard payload.
///
/// Wraps the generic property list tree. Accessors return `None` on a type
/// mismatch instead of failing, since the payload format is owned by another
/// application and may change shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    root: Value,
}

impl DecodedRecord {
    /// Parse a binary property list. XML property lists are accepted too.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }

        let root = if bytes.starts_with(BINARY_MAGIC) {
            Value::from_reader(Cursor::new(bytes))?
        } else if bytes.trim_ascii_start().starts_with(b"<") {
            Value::from_reader_xml(bytes)?
        } else {
            return Err(DecodeError::UnknownFormat);
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Dictionaries in the top-level array, in encoded order.
    ///
    /// Non-dictionary entries are skipped. A root that is not an array has
    /// no records.
    pub fn records(&self) -> impl Iterator<Item = &Dictionary> {
        self.root
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_dictionary)
    }

    /// Declared path of the first record matching `query`.
    ///
    /// `None` means the payload decoded fine but describes something other
    /// than a script patch.
    pub fn extract_path(&self, query: &PatchQuery) -> Option<String> {
        self.records().find_map(|record| {
            let type_name = record.get(&query.type_name_field)?.as_string()?;
            if type_name != query.type_name_value {
                return None;
            }

            let path = record.get(&query.path_field)?.as_string()?;
            path.ends_with(&query.required_suffix).then(|| path.to_string())
        })
    }
}
