use serde::{Serialize, Serializer};

/// Presence wrapper for one field of a partial update.
///
/// A PUT body can carry three intents for a nullable column: leave it alone
/// (field omitted from the body), set it to a value, or clear it (explicit
/// JSON `null`). A plain `Option` can only encode two of them, so patches
/// carry this instead.
///
/// `Unchanged` fields must be skipped at the struct level with
/// `#[serde(skip_serializing_if = "Field::is_unchanged")]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    #[default]
    Unchanged,
    Set(T),
    Clear,
}

impl<T> Field<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Field::Unchanged)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Unreachable when the struct-level skip attribute is in place.
            Field::Unchanged => serializer.serialize_none(),
            Field::Set(value) => value.serialize(serializer),
            Field::Clear => serializer.serialize_none(),
        }
    }
}
