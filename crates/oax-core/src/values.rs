use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;

/// Read access to user-entered values keyed by `UserInput` key.
///
/// Discovery reads previously entered values through it and synthesis reads
/// the values to put into a request. Neither ever writes.
pub trait InputValues {
    fn value(&self, key: &str) -> Option<&str>;

    /// The value for `key` unless it is missing or empty.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.value(key).filter(|v| !v.is_empty())
    }
}

impl<S: BuildHasher> InputValues for HashMap<String, String, S> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> InputValues for IndexMap<String, String, S> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// No values at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValues;

impl InputValues for NoValues {
    fn value(&self, _key: &str) -> Option<&str> {
        None
    }
}
