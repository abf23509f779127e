use common::PackageId;
use serde_json::Value;
use store::PackageRef;

use crate::customer::{ContactInput, CustomerDetails};
use crate::error::ValidationError;

/// Number of travelers on a booking; always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TravelerCount(i32);

impl TravelerCount {
    /// Creates a count, raising anything below 1 to 1.
    pub fn new(count: i32) -> Self {
        Self(count.max(1))
    }

    /// Coerces a loosely-typed request value.
    ///
    /// Absent, null, non-numeric and non-positive values become 1. Numeric
    /// strings are parsed, fractions truncate toward zero, and values beyond
    /// `i32::MAX` saturate.
    pub fn from_input(value: Option<&Value>) -> Self {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(truncate))
            }
            _ => None,
        };

        match parsed {
            Some(n) if n >= 1 => Self(i32::try_from(n).unwrap_or(i32::MAX)),
            _ => Self(1),
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl Default for TravelerCount {
    fn default() -> Self {
        Self(1)
    }
}

fn truncate(value: f64) -> Option<i64> {
    // `as` saturates for finite values outside the i64 range.
    value.is_finite().then(|| value.trunc() as i64)
}

/// Resolves the package reference of a booking request.
///
/// `id` may be a JSON number or a string: numeric strings are ids, any other
/// non-blank string is taken as a package name. `name` is consulted only when
/// `id` is absent or blank. Returns `Ok(None)` when neither is given.
pub fn package_ref_from_input(
    id: Option<&Value>,
    name: Option<&str>,
) -> Result<Option<PackageRef>, ValidationError> {
    let from_id = match id {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => {
            let id = n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or(ValidationError::InvalidField("package id"))?;
            Some(PackageRef::Id(PackageId::new(id)))
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if let Ok(id) = s.parse::<i32>() {
                Some(PackageRef::Id(PackageId::new(id)))
            } else {
                Some(PackageRef::Name(s.to_string()))
            }
        }
        Some(_) => return Err(ValidationError::InvalidField("package id")),
    };

    let from_name = name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| PackageRef::Name(s.to_string()));

    Ok(from_id.or(from_name))
}

/// Command to book a package for a new customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceBooking {
    pub customer: CustomerDetails,
    pub traveler_count: TravelerCount,
    pub package: PackageRef,
}

impl PlaceBooking {
    /// Validates a booking request. Nothing has been read or written when
    /// this fails.
    pub fn new(
        contact: ContactInput,
        traveler_count: TravelerCount,
        package: Option<PackageRef>,
    ) -> Result<Self, ValidationError> {
        let customer = CustomerDetails::from_input(contact)?;
        let package = package.ok_or(ValidationError::MissingField("package"))?;

        Ok(Self {
            customer,
            traveler_count,
            package,
        })
    }
}
