//! Pluggable randomness.
//!
//! Models draw randomness through [`RandomSource`] rather than calling into
//! a global RNG, so a whole run can be reseeded or replaced with a
//! deterministic stand-in ([`NullRandomSource`], or a test's own fixed
//! sequence) without touching model code. The core itself does not
//! implement a generator, a seeding policy, or a catalogue of named
//! distributions; it only defines the seam a model draws through.

/// A source of named-distribution samples.
///
/// `distribution` names a member of whatever catalogue the host installs
/// (e.g. `"uniform"`, `"exponential"`, `"normal"`); `params` carries that
/// distribution's parameters positionally. The core does not interpret
/// either argument; it is purely a pass-through contract between a model
/// and whatever generator the host wires up.
pub trait RandomSource {
    fn sample(&self, distribution: &str, params: &[f64]) -> f64;
}

/// Always returns zero, regardless of `distribution` or `params`. Useful
/// where a model needs a `RandomSource` to satisfy a constructor but the
/// test in question wants fully deterministic behaviour.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRandomSource;

impl RandomSource for NullRandomSource {
    fn sample(&self, _distribution: &str, _params: &[f64]) -> f64 {
        0.0
    }
}
