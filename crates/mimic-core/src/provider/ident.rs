//! Canonical provider identifier derivation.
//!
//! Operation names are mapped onto locator identifiers by a pure, total
//! string transformation: uppercase the first character of the operation
//! name and prefix it with the fixed namespace path. `"randomName"` becomes
//! `"mimic::provider::RandomName"`. The scheme is a naming convention, not a
//! computation; it only needs to stay collision-free for the operation sets
//! providers actually expose (names differing solely in the case of their
//! first character would collide).

/// Namespace path prefixed to every derived provider identifier.
pub const PROVIDER_NAMESPACE: &str = "mimic::provider";

/// Derive the canonical locator identifier for an operation name.
///
/// Total over all inputs: the empty operation name derives the bare
/// namespace prefix, which no factory registers under, so resolution fails
/// through the normal not-found path rather than a special case.
///
/// The first character is uppercased with its full Unicode mapping; the
/// remainder of the name is left untouched.
pub fn provider_ident(operation: &str) -> String {
    let mut chars = operation.chars();
    match chars.next() {
        Some(first) => format!(
            "{}::{}{}",
            PROVIDER_NAMESPACE,
            first.to_uppercase(),
            chars.as_str()
        ),
        None => format!("{}::", PROVIDER_NAMESPACE),
    }
}
