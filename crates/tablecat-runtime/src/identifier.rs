//! Identifier case policy.

use crate::connection::{CatalogConnection, DriverError};
use std::borrow::Cow;

/// How identifiers must be spelled for one connection.
///
/// Detected once per connection and applied to every identifier used in a
/// catalog query or generated statement on that connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierCase {
    /// The backend folds unquoted identifiers to upper case.
    Upper,
    /// Identifiers pass through unchanged.
    Preserve,
}

impl IdentifierCase {
    pub async fn detect(connection: &mut dyn CatalogConnection) -> Result<Self, DriverError> {
        Ok(Self::from_stores_upper_case(
            connection.stores_upper_case_identifiers().await?,
        ))
    }

    pub fn from_stores_upper_case(upper: bool) -> Self {
        if upper { Self::Upper } else { Self::Preserve }
    }

    /// Spell `identifier` under this policy.
    ///
    /// Upper-casing uses Unicode case mapping, which does not depend on the
    /// process locale.
    pub fn apply<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        match self {
            Self::Upper => Cow::Owned(identifier.to_uppercase()),
            Self::Preserve => Cow::Borrowed(identifier),
        }
    }
}
