//! Identifier management using string interning for efficient storage and comparison
//!
//! Model elements are addressed by qualified paths such as `Light::Switch::Power`.
//! The [`Id`] type interns those paths once and compares them as symbols.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
///
/// Guarded by a `Mutex`; each operation holds the lock only for the
/// duration of a single intern or resolve.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Interned identifier for a model element.
///
/// Equal paths intern to the same symbol, so `Id` is `Copy` and cheap to
/// compare or hash. Nested element paths are built with [`Id::create_nested`].
///
/// # Examples
///
/// ```
/// use gantry_core::identifier::Id;
///
/// let package = Id::new("Light");
/// let part = package.create_nested(Id::new("Switch"));
/// assert_eq!(part, "Light::Switch");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name or path segment.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Creates a child path by joining `self` and `child_id` with `::`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_core::identifier::Id;
    ///
    /// let owner = Id::new("Vehicle");
    /// let port = owner.create_nested(Id::new("FuelPort"));
    /// assert_eq!(port, "Vehicle::FuelPort");
    /// ```
    pub fn create_nested(&self, child_id: Id) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let parent = interner
            .resolve(self.0)
            .expect("Interned symbols always resolve");
        let child = interner
            .resolve(child_id.0)
            .expect("Interned symbols always resolve");
        let path = format!("{parent}::{child}");
        Self(interner.get_or_intern(&path))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let text = interner
            .resolve(self.0)
            .expect("Interned symbols always resolve");
        f.write_str(text)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "Light::Switch"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let text = interner
            .resolve(self.0)
            .expect("Interned symbols always resolve");
        text == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_equal_names() {
        let first = Id::new("Switch");
        let second = Id::new("Switch");
        let other = Id::new("Bulb");

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(first, "Switch");
    }

    #[test]
    fn test_nested_paths_join_with_double_colon() {
        let parent = Id::new("Light");
        let switch = parent.create_nested(Id::new("Switch"));
        let bulb = parent.create_nested(Id::new("Bulb"));

        assert_ne!(switch, bulb);
        assert_eq!(switch, "Light::Switch");
        assert_eq!(bulb, "Light::Bulb");
    }

    #[test]
    fn test_nesting_composes() {
        let root = Id::new("Light");
        let middle = root.create_nested(Id::new("Switch"));
        let leaf = middle.create_nested(Id::new("Power"));

        assert_eq!(leaf, "Light::Switch::Power");
    }

    #[test]
    fn test_display_resolves_the_path() {
        let id = Id::new("FuelTank");
        assert_eq!(id.to_string(), "FuelTank");
    }

    #[test]
    fn test_anonymous_segment_paths() {
        // Synthesized names for anonymous elements are ordinary segments.
        let parent = Id::new("Rig");
        let anon = parent.create_nested(Id::new("part#1"));
        assert_eq!(anon, "Rig::part#1");
    }

    #[test]
    fn test_ids_work_as_map_keys() {
        use std::collections::HashMap;

        let engine = Id::new("Engine");
        let engine_again = Id::new("Engine");
        let gearbox = Id::new("Gearbox");

        let mut parts = HashMap::new();
        parts.insert(engine, 4);
        parts.insert(gearbox, 6);

        assert_eq!(parts.get(&engine_again), Some(&4));
        assert_eq!(parts.len(), 2);
    }
}
