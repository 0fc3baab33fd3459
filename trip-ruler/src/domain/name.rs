//! Location name type.

use std::fmt;

/// Error returned when parsing an invalid location name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location name: {reason}")]
pub struct InvalidLocationName {
    reason: &'static str,
}

/// A location name as written in a trip log.
///
/// Names are runs of ASCII letters and digits joined by single underscores.
/// Underscores stand in for spaces, since the log ignores whitespace.
///
/// # Examples
///
/// ```
/// use trip_ruler::domain::LocationName;
///
/// let office = LocationName::parse("Head_Office").unwrap();
/// assert_eq!(office.as_str(), "Head_Office");
/// assert_eq!(office.display_name(), "Head Office");
///
/// assert!(LocationName::parse("_Office").is_err());
/// assert!(LocationName::parse("Head__Office").is_err());
/// assert!(LocationName::parse("Head-Office").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationName(String);

impl LocationName {
    /// Parse a location name from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationName> {
        let bytes = s.as_bytes();

        let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
            return Err(InvalidLocationName {
                reason: "must not be empty",
            });
        };

        if first == b'_' || last == b'_' {
            return Err(InvalidLocationName {
                reason: "must not start or end with an underscore",
            });
        }

        let mut previous_underscore = false;
        for &b in bytes {
            match b {
                b'_' if previous_underscore => {
                    return Err(InvalidLocationName {
                        reason: "must not contain consecutive underscores",
                    });
                }
                b'_' => previous_underscore = true,
                b if b.is_ascii_alphanumeric() => previous_underscore = false,
                _ => {
                    return Err(InvalidLocationName {
                        reason: "must contain only ASCII letters, digits and underscores",
                    });
                }
            }
        }

        Ok(LocationName(s.to_string()))
    }

    /// Returns the name exactly as written in the log.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with underscores rendered as spaces.
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Debug for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationName({})", self.0)
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Underscore-joined alphanumeric words always parse and round-trip
        #[test]
        fn words_joined_by_underscores(s in "[A-Za-z0-9]{1,8}(_[A-Za-z0-9]{1,8}){0,3}") {
            let name = LocationName::parse(&s).unwrap();
            prop_assert_eq!(name.as_str(), s.as_str());
            prop_assert!(!name.display_name().contains('_'));
        }

        /// Any punctuation other than underscore is rejected
        #[test]
        fn punctuation_rejected(s in "[A-Za-z]{1,4}[-=>#/.][A-Za-z]{1,4}") {
            prop_assert!(LocationName::parse(&s).is_err());
        }
    }
}
