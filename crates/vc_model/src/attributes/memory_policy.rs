use core::fmt;

/// The ownership policy of a property value.
///
/// Always [`Assign`](MemoryPolicy::Assign) for read-only properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MemoryPolicy {
    /// The value is stored as is.
    #[default]
    Assign,
    /// The value is shared.
    Retain,
    /// The value is copied on assignment.
    Copy,
    /// The value is a weak reference.
    Weak,
}

impl MemoryPolicy {
    /// Returns the lower-case name of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            MemoryPolicy::Assign => "assign",
            MemoryPolicy::Retain => "retain",
            MemoryPolicy::Copy => "copy",
            MemoryPolicy::Weak => "weak",
        }
    }
}

impl fmt::Display for MemoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
