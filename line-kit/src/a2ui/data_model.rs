//! A2UI Data Model
//!
//! The DataModel is the bound-value store of a surface, addressed with
//! JSON Pointer paths.

use serde_json::{Map, Value};

use super::message::DataEntry;

/// A data store whose values are accessible via JSON Pointer paths.
///
/// # Path Format
///
/// Paths follow JSON Pointer (RFC 6901) format:
/// - `""` or `/` - root
/// - `/foo` - property "foo"
/// - `/foo/bar` - nested property
/// - `/items/0` - array element at index 0
/// - `/a~1b` - property "a/b" (`~1` is `/`, `~0` is `~`)
///
/// Lookups never fail loudly: an invalid pointer, a missing key, an
/// out-of-range index or a step into a scalar all come back as `None`.
///
/// # Example
///
/// ```rust,ignore
/// let model = DataModel::with_data(json!({"user": {"name": "Alice"}}));
///
/// let name = model.get_string("/user/name"); // Some("Alice")
/// let none = model.get("user/name");         // None, not a pointer
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    /// The root data value
    data: Value,

    /// Bumped by every applied update
    version: u64,
}

impl Default for DataModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DataModel {
    /// Create a new empty data model
    pub fn new() -> Self {
        DataModel {
            data: Value::Object(Map::new()),
            version: 0,
        }
    }

    /// Create a data model with initial data
    pub fn with_data(data: Value) -> Self {
        DataModel { data, version: 0 }
    }

    /// Get the current version number
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get a value at the given path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = parse_pointer(path)?;

        let mut current = &self.data;
        for segment in &segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(arr) => {
                    let index: usize = segment.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value at the given path
    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get the entire data as a Value
    pub fn as_value(&self) -> &Value {
        &self.data
    }

    /// Replace the entire data model
    pub fn replace(&mut self, data: Value) {
        self.data = data;
        self.version += 1;
    }

    /// Apply the contents of a `dataModelUpdate`.
    ///
    /// Without a path (absent, empty or `/`) the whole model is replaced by
    /// the object built from `contents`. With a path, the object at that
    /// path is created if missing and each entry is set on it. Returns
    /// `false` when the update was dropped because the path is not a
    /// pointer or runs into something that is not an object.
    pub fn apply_update(&mut self, path: Option<&str>, contents: &[DataEntry]) -> bool {
        let path = path.unwrap_or_default();
        if path.is_empty() || path == "/" {
            self.replace(Value::Object(DataEntry::build_object(contents)));
            return true;
        }

        let Some(target) = self.object_at_mut(path) else {
            ::log::warn!("[A2UI] Dropping data model update: {path} is not an object");
            return false;
        };
        for entry in contents {
            target.insert(entry.key.clone(), entry.decode());
        }
        self.version += 1;
        true
    }

    /// Walk to the object at `path`, creating missing objects on the way.
    ///
    /// Nothing is created unless the whole walk succeeds: a missing key
    /// only ever leads to freshly created (and therefore object) nodes.
    fn object_at_mut(&mut self, path: &str) -> Option<&mut Map<String, Value>> {
        if !path.starts_with('/') {
            return None;
        }

        let mut current = match &mut self.data {
            Value::Object(map) => map,
            _ => return None,
        };
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let next = current
                .entry(unescape_segment(segment))
                .or_insert_with(|| Value::Object(Map::new()));
            current = match next {
                Value::Object(map) => map,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Split a JSON Pointer into unescaped segments.
///
/// `""` and `/` address the whole document. Anything else must start with
/// `/`; otherwise the pointer is invalid and `None` is returned.
pub fn parse_pointer(path: &str) -> Option<Vec<String>> {
    if path.is_empty() || path == "/" {
        return Some(vec![]);
    }
    let rest = path.strip_prefix('/')?;
    Some(rest.split('/').map(unescape_segment).collect())
}

/// Unescape one pointer segment: `~1` becomes `/`, then `~0` becomes `~`.
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
