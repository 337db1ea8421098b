use std::fmt;

/// An immutable, human-readable identifier in reverse-DNS form (for example
/// `org.example.Foo`), identifying either a concrete class or an interface
/// contract.
///
/// Equality and hashing are over the full string; a `Uid` carries no
/// pointer identity beyond that. Every `Uid` used in this workspace is a
/// compile-time constant, and the type-to-`Uid` mapping is a compile-time
/// fact, looked up at registration time, not assigned dynamically.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid(&'static str);

impl Uid {
    /// Declares a new UID from a `'static` string literal.
    pub const fn new(id: &'static str) -> Self {
        Uid(id)
    }

    /// Returns the underlying reverse-DNS string.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid({:?})", self.0)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&'static str> for Uid {
    fn from(value: &'static str) -> Self {
        Uid::new(value)
    }
}

impl PartialEq<str> for Uid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// The private UID used by an aggregated inner object to expose its own
/// root identity to its outer, bypassing the normal aggregation-forwarding
/// rule. Never resolvable through a public `query`.
pub const INNER_ROOT_UID: Uid = Uid::new("simnet.component.InnerRoot");

/// The UID every object answers to reflexively: querying for it always
/// succeeds and returns the object's own (possibly aggregated) identity.
pub const ROOT_UID: Uid = Uid::new("simnet.component.Root");
