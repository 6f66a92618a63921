//! Projection of M8 entities onto ordered key/value objects
//!
//! Renderers and the JSON import/export in the tools consume entities through this
//! contract instead of through the binary layout. Keys keep their insertion order, so an
//! exported object reads in the same order as the device screens.

use crate::version::{Version, VersionError};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

/// An ordered key/value object
pub type Object = Map<String, Value>;

/// Anything that can be converted to and from an [`Object`]
///
/// The law every implementation upholds is that `from_object(to_object(x)) == x`.
pub trait Projection: Sized {
    /// The keys [`Projection::to_object()`] produces for this value
    ///
    /// This can depend on the value itself. Some instrument kinds, for example, leave out
    /// the parameter groups they don't use.
    fn object_properties(&self) -> Vec<&'static str>;

    /// Project the value onto an object
    fn to_object(&self) -> Object;

    /// Reconstruct a value from its object projection
    ///
    /// The version is needed because the shape of some entities depends on it.
    fn from_object(object: &Object, version: Version) -> Result<Self, FromObjectError>;
}

/// Serialize a value that is known to become a JSON object
///
/// Anything that doesn't (which none of the types in this crate do) projects as empty.
pub(crate) fn serialize_object<T>(value: &T) -> Object
where
    T: Serialize,
{
    match serde_json::to_value(value) {
        Ok(Value::Object(object)) => object,
        _ => Object::new(),
    }
}

/// Serialize a value that is nested inside an object
pub(crate) fn to_value<T>(value: &T) -> Value
where
    T: Serialize,
{
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Look up and deserialize a required key
pub(crate) fn field<T>(object: &Object, key: &'static str) -> Result<T, FromObjectError>
where
    T: DeserializeOwned,
{
    let value = object.get(key).ok_or(FromObjectError::MissingKey(key))?;
    Ok(T::deserialize(value)?)
}

/// Look up and deserialize a key that may be left out
pub(crate) fn optional_field<T>(
    object: &Object,
    key: &'static str,
) -> Result<Option<T>, FromObjectError>
where
    T: DeserializeOwned,
{
    match object.get(key) {
        Some(value) => Ok(Some(T::deserialize(value)?)),
        None => Ok(None),
    }
}

/// Look up a list that must have an exact length
pub(crate) fn list_field<T>(
    object: &Object,
    key: &'static str,
    expected: usize,
) -> Result<Vec<T>, FromObjectError>
where
    T: DeserializeOwned,
{
    let list: Vec<T> = field(object, key)?;
    check_length(key, expected, list.len())?;
    Ok(list)
}

pub(crate) fn check_length(
    key: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), FromObjectError> {
    if expected == found {
        Ok(())
    } else {
        Err(FromObjectError::WrongLength {
            key,
            expected,
            found,
        })
    }
}

/// Implement [`Projection`] for types whose serde representation is their projection
macro_rules! serde_projection {
    ($type:ty, [$($key:literal),* $(,)?]) => {
        impl $crate::object::Projection for $type {
            fn object_properties(&self) -> Vec<&'static str> {
                vec![$($key),*]
            }

            fn to_object(&self) -> $crate::object::Object {
                $crate::object::serialize_object(self)
            }

            fn from_object(
                object: &$crate::object::Object,
                _version: $crate::version::Version,
            ) -> Result<Self, $crate::object::FromObjectError> {
                Ok(<$type as serde::Deserialize>::deserialize(
                    &serde_json::Value::Object(object.clone()),
                )?)
            }
        }
    };
}

pub(crate) use serde_projection;

/// Errors that might be returned from [`Projection::from_object()`]
#[derive(Debug, Error)]
pub enum FromObjectError {
    /// A required key is missing from the object
    #[error("The object has no \"{0}\" key")]
    MissingKey(&'static str),

    /// A value could not be converted to the type it should have
    #[error("A value in the object has the wrong shape")]
    Json(#[from] serde_json::Error),

    /// A list has the wrong number of entries
    #[error("\"{key}\" should have {expected} entries, but has {found}")]
    WrongLength {
        key: &'static str,
        expected: usize,
        found: usize,
    },

    /// The file metadata holds an invalid version
    #[error("The file metadata holds an invalid version")]
    Version(#[from] VersionError),

    /// A kind string (of a file or instrument) is not recognized
    #[error("\"{0}\" is not a known kind")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(object) => object,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn fields() {
        let object = object(json!({ "a": 1, "list": [1, 2, 3] }));

        assert_eq!(field::<u8>(&object, "a").unwrap(), 1);
        assert_eq!(optional_field::<u8>(&object, "b").unwrap(), None);
        assert!(matches!(
            field::<u8>(&object, "b"),
            Err(FromObjectError::MissingKey("b"))
        ));
        assert!(matches!(
            field::<String>(&object, "a"),
            Err(FromObjectError::Json(_))
        ));

        assert_eq!(list_field::<u8>(&object, "list", 3).unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            list_field::<u8>(&object, "list", 4),
            Err(FromObjectError::WrongLength {
                key: "list",
                expected: 4,
                found: 3
            })
        ));
    }
}
