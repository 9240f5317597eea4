use super::decoder::weak_decode;
use super::error::DecodeError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Builds the input object of a nested type from the shared root map.
pub type Projector = fn(&Map<String, Value>) -> Option<Value>;

/// Where one field of a [`PathDecode`] type reads its data from.
#[derive(Clone, Copy)]
pub enum FieldPath {
    /// `field` takes the value at the dotted `path` of the root.
    Leaf {
        field: &'static str,
        path: &'static str,
    },
    /// `field` is a struct whose own paths resolve against the same root.
    Nested {
        field: &'static str,
        project: Projector,
    },
    /// `field` is a list built from the array of maps at `path`, each
    /// element projected on its own.
    Slice {
        field: &'static str,
        path: &'static str,
        project: Projector,
    },
}

impl FieldPath {
    pub fn leaf(field: &'static str, path: &'static str) -> Self {
        FieldPath::Leaf { field, path }
    }

    pub fn nested<T: PathDecode>(field: &'static str) -> Self {
        FieldPath::Nested {
            field,
            project: project::<T>,
        }
    }

    pub fn slice<T: PathDecode>(field: &'static str, path: &'static str) -> Self {
        FieldPath::Slice {
            field,
            path,
            project: project::<T>,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            FieldPath::Leaf { field, .. }
            | FieldPath::Nested { field, .. }
            | FieldPath::Slice { field, .. } => field,
        }
    }
}

/// A type decoded from a map by dotted paths instead of matching keys.
///
/// ```
/// use cvkit::mapkit::{decode_path, FieldPath, PathDecode};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: i64,
///     city: String,
/// }
///
/// impl PathDecode for User {
///     fn field_paths() -> Vec<FieldPath> {
///         vec![
///             FieldPath::leaf("id", "user.id"),
///             FieldPath::leaf("city", "user.address.city"),
///         ]
///     }
/// }
///
/// let root = serde_json::json!({"user": {"id": "7", "address": {"city": "Hangzhou"}}});
/// let user: User = decode_path(root.as_object().unwrap()).unwrap();
/// assert_eq!(user.id, 7);
/// assert_eq!(user.city, "Hangzhou");
/// ```
pub trait PathDecode: DeserializeOwned {
    fn field_paths() -> Vec<FieldPath>;
}

/// Walk `dotted` through nested objects. Numeric segments index arrays.
/// A null at the end counts as absent.
pub fn find_data<'a>(root: &'a Map<String, Value>, dotted: &str) -> Option<&'a Value> {
    let mut segments = dotted.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// The object `T` would be decoded from, or `None` when no path resolved.
pub fn project<T: PathDecode>(root: &Map<String, Value>) -> Option<Value> {
    let mut projected = Map::new();
    for field_path in T::field_paths() {
        let value = match field_path {
            FieldPath::Leaf { path, .. } => find_data(root, path).cloned(),
            FieldPath::Nested { project, .. } => project(root),
            FieldPath::Slice { path, project, .. } => match find_data(root, path) {
                Some(Value::Array(items)) => Some(Value::Array(
                    items
                        .iter()
                        .filter_map(|item| item.as_object().and_then(project))
                        .collect(),
                )),
                _ => None,
            },
        };
        if let Some(value) = value {
            projected.insert(field_path.field().to_string(), value);
        }
    }
    (!projected.is_empty()).then_some(Value::Object(projected))
}

pub fn decode_path<T: PathDecode>(root: &Map<String, Value>) -> Result<T, DecodeError> {
    let projected = project::<T>(root).unwrap_or_else(|| Value::Object(Map::new()));
    weak_decode(&projected)
}

/// Decode each map, collecting the errors of every element that failed.
pub fn decode_slice_path<T: PathDecode>(roots: &[Map<String, Value>]) -> Result<Vec<T>, DecodeError> {
    let mut decoded = Vec::with_capacity(roots.len());
    let mut errors = Vec::new();
    for (index, root) in roots.iter().enumerate() {
        match decode_path::<T>(root) {
            Ok(item) => decoded.push(item),
            Err(e) => errors.extend(e.errors.into_iter().map(|msg| format!("[{}] {}", index, msg))),
        }
    }
    if errors.is_empty() {
        Ok(decoded)
    } else {
        Err(DecodeError::new(errors))
    }
}
