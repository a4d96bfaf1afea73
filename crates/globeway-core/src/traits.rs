// crates/globeway-core/src/traits.rs
use crate::text::fold_key;

/// Name-based matching helpers for any entity that has a display name.
///
/// Provides default implementations for:
/// - exact match on folded form (case- and accent-insensitive)
/// - substring match on folded form
/// - prefix match on folded form
///
/// Alternative names (official, native) take part in exact matching only;
/// substring and prefix matching look at the display name, which is what
/// a user sees in a suggestion list.
///
/// # Examples
/// ```rust
/// use globeway_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Curaçao").is_named("curacao"));
/// assert!(Place("Brazil").name_contains("RAZ"));
/// assert!(Place("Brazil").name_starts_with("braz"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Other names the entity is known by.
    fn alt_names(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Returns `true` if `q` equals the display name or one of the
    /// alternative names after normalization with [`fold_key`].
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        let q = fold_key(q);
        fold_key(self.name_str()) == q || self.alt_names().iter().any(|n| fold_key(n) == q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }

    #[inline]
    fn name_starts_with(&self, q: &str) -> bool {
        fold_key(self.name_str()).starts_with(&fold_key(q))
    }
}
