use serde::{Deserialize, Serialize};

use crate::PackageId;

/// How a caller refers to a package when booking it.
///
/// Catalog pages link by name while API clients usually send the id; both
/// are normalized to a [`PackageId`] before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageRef {
    /// Lookup by primary key.
    Id(PackageId),
    /// Lookup by exact package name. When names repeat, the lowest id wins.
    Name(String),
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageRef::Id(id) => write!(f, "package #{id}"),
            PackageRef::Name(name) => write!(f, "package '{name}'"),
        }
    }
}

impl From<PackageId> for PackageRef {
    fn from(id: PackageId) -> Self {
        PackageRef::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_by_id() {
        assert_eq!(PackageRef::Id(PackageId::new(7)).to_string(), "package #7");
    }

    #[test]
    fn display_by_name() {
        assert_eq!(
            PackageRef::Name("Bali Escape".to_string()).to_string(),
            "package 'Bali Escape'"
        );
    }
}
