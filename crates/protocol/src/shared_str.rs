use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable, reference-counted string for item labels and asset
/// references.
///
/// Snapshots and render commands are rebuilt every frame and each one
/// carries the item's label and asset, so cloning has to be a refcount bump
/// rather than a fresh allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharedStr(Arc<str>);

impl SharedStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character, uppercased. Used by renderers that draw a letter
    /// in place of an icon image.
    pub fn initial(&self) -> Option<char> {
        self.0.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

impl Default for SharedStr {
    fn default() -> Self {
        SharedStr::from("")
    }
}

impl PartialEq<str> for SharedStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SharedStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::ops::Deref for SharedStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SharedStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedStr {
    #[inline]
    fn from(s: &str) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<String> for SharedStr {
    #[inline]
    fn from(s: String) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl std::fmt::Display for SharedStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled so the `rc` serde feature stays off.
impl Serialize for SharedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SharedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SharedStr::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_point_at_the_same_label() {
        let a = SharedStr::from("Finder");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_eq!(a, "Finder");
    }

    #[test]
    fn initial_is_uppercased() {
        assert_eq!(SharedStr::from("notes").initial(), Some('N'));
        assert_eq!(SharedStr::from("").initial(), None);
    }

    #[test]
    fn deserializes_owned_strings() {
        // Escaped input cannot be borrowed as &str.
        let s: SharedStr =
            serde_json::from_str(r#""Final \"Cut\" Pro""#).unwrap_or_else(|_| SharedStr::from(""));
        assert_eq!(s, r#"Final "Cut" Pro"#);
        let json = serde_json::to_string(&s).unwrap_or_default();
        assert_eq!(json, r#""Final \"Cut\" Pro""#);
    }
}
