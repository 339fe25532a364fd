//! The specificity partial order over event kinds.
//!
//! Handler selection and ambiguity detection both run off a three-way
//! comparison, not a boolean: `Incomparable` is what raises ambiguity when
//! two valid candidates survive elimination.

use relais_core::EventKind;

/// The result of comparing two candidate event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    /// The left kind is strictly narrower: it wins over the right.
    MoreSpecific,
    /// The left kind is strictly broader: it loses to the right.
    LessSpecific,
    /// Neither kind is strictly narrower (equal or unrelated).
    Incomparable,
}

/// Compare `a` against `b` in the event-family tree.
///
/// A kind is more specific when it sits strictly below the other; equal
/// kinds are incomparable (two candidates on the same kind are a genuine
/// ambiguity, not a preference).
pub fn compare(a: &EventKind, b: &EventKind) -> Specificity {
    let a_below_b = b.is_supertype_of(a);
    let b_below_a = a.is_supertype_of(b);
    match (a_below_b, b_below_a) {
        (true, false) => Specificity::MoreSpecific,
        (false, true) => Specificity::LessSpecific,
        _ => Specificity::Incomparable,
    }
}
