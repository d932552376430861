use thiserror::Error;

/// Errors reported by [`OrderedMap`](crate::OrderedMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The key passed to [`remove`](crate::OrderedMap::remove) is not in the map.
    /// The map is left untouched.
    #[error("key not found")]
    KeyNotFound,

    /// [`minimum`](crate::OrderedMap::minimum) or
    /// [`maximum`](crate::OrderedMap::maximum) was called on an empty map.
    #[error("map is empty")]
    EmptyTree,
}

/// Result type for fallible map operations.
pub type MapResult<T> = Result<T, MapError>;
