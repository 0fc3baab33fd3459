//! Trip log line classification.
//!
//! Every line is classified on its whitespace-free form, checking the kinds
//! in a fixed order: date, home assignment, trip, comment or blank. The
//! first kind that matches wins; anything else is invalid.

use crate::domain::{DateLine, LocationName};

/// Prefix of a home assignment once whitespace is removed.
const HOME_PREFIX: &str = "home=";

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// `D`, `D/M` or `D/M/Y`
    Date(DateLine),

    /// `home = <name>`
    Home(LocationName),

    /// `<name>? -> <name>?` (or `>`). Elided sides are `None`.
    Trip {
        departure: Option<LocationName>,
        arrival: Option<LocationName>,
    },

    /// Blank line or `#` comment
    Skip,

    /// Nothing recognisable
    Invalid,
}

impl LogLine {
    /// Classify a raw log line.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_ruler::triplog::LogLine;
    ///
    /// assert!(matches!(LogLine::classify("1/1/2020"), LogLine::Date(_)));
    /// assert!(matches!(LogLine::classify("home = Home"), LogLine::Home(_)));
    /// assert!(matches!(LogLine::classify("Home -> Work"), LogLine::Trip { .. }));
    /// assert_eq!(LogLine::classify("# note"), LogLine::Skip);
    /// assert_eq!(LogLine::classify("Home, then Work"), LogLine::Invalid);
    /// ```
    pub fn classify(raw: &str) -> LogLine {
        let line = strip_whitespace(raw);

        if let Some(date) = DateLine::parse(&line) {
            return LogLine::Date(date);
        }

        if let Some(home) = parse_home(&line) {
            return LogLine::Home(home);
        }

        if let Some((departure, arrival)) = parse_trip(&line) {
            return LogLine::Trip { departure, arrival };
        }

        if line.is_empty() || line.starts_with('#') {
            return LogLine::Skip;
        }

        LogLine::Invalid
    }
}

/// Remove every whitespace character.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_home(line: &str) -> Option<LocationName> {
    let name = line.strip_prefix(HOME_PREFIX)?;
    LocationName::parse(name).ok()
}

fn parse_trip(line: &str) -> Option<(Option<LocationName>, Option<LocationName>)> {
    let (left, right) = line
        .split_once("->")
        .or_else(|| line.split_once('>'))?;

    Some((optional_name(left)?, optional_name(right)?))
}

/// `Some(None)` for an elided side, `None` if the side is not a valid name.
fn optional_name(side: &str) -> Option<Option<LocationName>> {
    if side.is_empty() {
        return Some(None);
    }
    LocationName::parse(side).ok().map(Some)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn name_string() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9]{0,7}(_[A-Za-z0-9]{1,6}){0,2}"
    }

    proptest! {
        /// Any two names around a separator form a trip line
        #[test]
        fn names_around_separator(a in name_string(), b in name_string(), arrow in prop::bool::ANY) {
            let sep = if arrow { " -> " } else { " > " };
            let line = format!("{a}{sep}{b}");
            prop_assert_eq!(
                LogLine::classify(&line),
                LogLine::Trip {
                    departure: Some(LocationName::parse(&a).unwrap()),
                    arrival: Some(LocationName::parse(&b).unwrap()),
                }
            );
        }

        /// Well-formed full dates always classify as dates with their tokens
        #[test]
        fn full_dates(d in "[1-9]|[0-3][0-9]", m in "[1-9]|[01][0-9]", y in "[0-9]{2}|[0-9]{4}") {
            let line = format!("{d}/{m}/{y}");
            match LogLine::classify(&line) {
                LogLine::Date(date) => {
                    prop_assert_eq!(date.day, d);
                    prop_assert_eq!(date.month, Some(m));
                    prop_assert_eq!(date.year, Some(y));
                }
                other => prop_assert!(false, "classified as {:?}", other),
            }
        }

        /// Comments are skipped whatever they contain
        #[test]
        fn comments_skipped(text in "[ -~]{0,40}") {
            prop_assert_eq!(LogLine::classify(&format!("#{text}")), LogLine::Skip);
        }

        /// Whitespace placement never changes the classification
        #[test]
        fn whitespace_insensitive(a in name_string(), b in name_string(), pad in "[ \t]{0,3}") {
            let tight = format!("{a}->{b}");
            let loose = format!("{pad}{a}{pad}->{pad}{b}{pad}");
            prop_assert_eq!(LogLine::classify(&tight), LogLine::classify(&loose));
        }
    }
}
