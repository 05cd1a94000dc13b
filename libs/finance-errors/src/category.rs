//! Error categories and their specificity order.

use std::fmt;

/// Kind of failure, used to pick a problem handler.
///
/// Categories form a tree rooted at [`ErrorCategory::Unclassified`]: every
/// category except the root has exactly one broader parent. An error of a
/// specific category is also a member of each broader one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    /// A required parameter was absent.
    MissingRequiredInput,
    /// A parameter was present but malformed or out of range.
    InvalidInput,
    /// The operation conflicts with the current state of a resource.
    InvalidState,
    /// The addressed resource does not exist.
    NotFound,
    /// Anything else. Never echoed to clients.
    Unclassified,
}

impl ErrorCategory {
    pub const ALL: [Self; 5] = [
        Self::MissingRequiredInput,
        Self::InvalidInput,
        Self::InvalidState,
        Self::NotFound,
        Self::Unclassified,
    ];

    /// The next broader category, or `None` for the root.
    #[must_use]
    pub const fn broader(self) -> Option<Self> {
        match self {
            Self::MissingRequiredInput => Some(Self::InvalidInput),
            Self::InvalidInput | Self::InvalidState | Self::NotFound => Some(Self::Unclassified),
            Self::Unclassified => None,
        }
    }

    /// This category followed by every broader one, most specific first.
    pub fn lineage(self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self), |c| c.broader())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredInput => "missing_required_input",
            Self::InvalidInput => "invalid_input",
            Self::InvalidState => "invalid_state",
            Self::NotFound => "not_found",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
