//! Trip log dates.
//!
//! Dates are kept as the raw tokens written in the log. A log may write the
//! full `D/M/Y` form, or only a day when the month and year carry over from
//! an earlier line.

use std::fmt;

/// Error returned when a date line has a month but no year.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a date with a month must also have a year")]
pub struct MonthWithoutYear;

/// Components read from a date line (`D`, `D/M` or `D/M/Y`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLine {
    pub day: String,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl DateLine {
    /// Parse a whitespace-free line as a date.
    ///
    /// Returns `None` when the text is not shaped like a date. A two-digit day
    /// must start with 0-3, a two-digit month with 0-1, and a year has two or
    /// four digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_ruler::domain::DateLine;
    ///
    /// let date = DateLine::parse("31/12/2020").unwrap();
    /// assert_eq!(date.day, "31");
    /// assert_eq!(date.year.as_deref(), Some("2020"));
    ///
    /// assert!(DateLine::parse("7").is_some());
    /// assert!(DateLine::parse("45/1/2020").is_none());
    /// assert!(DateLine::parse("1/1/202").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('/');

        let day = parts.next().filter(|d| is_day(d))?;

        let month = match parts.next() {
            Some(m) if is_month(m) => Some(m.to_string()),
            Some(_) => return None,
            None => None,
        };

        let year = match parts.next() {
            Some(y) if is_year(y) => Some(y.to_string()),
            Some(_) => return None,
            None => None,
        };

        if parts.next().is_some() {
            return None;
        }

        Some(DateLine {
            day: day.to_string(),
            month,
            year,
        })
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_day(s: &str) -> bool {
    all_digits(s)
        && match s.len() {
            1 => true,
            2 => matches!(s.as_bytes()[0], b'0'..=b'3'),
            _ => false,
        }
}

fn is_month(s: &str) -> bool {
    all_digits(s)
        && match s.len() {
            1 => true,
            2 => matches!(s.as_bytes()[0], b'0'..=b'1'),
            _ => false,
        }
}

fn is_year(s: &str) -> bool {
    all_digits(s) && (s.len() == 2 || s.len() == 4)
}

/// The date currently in effect while reading a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDate {
    day: Option<String>,
    month: Option<String>,
    year: Option<String>,
}

impl CalendarDate {
    /// Create a fully specified date.
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: Some(day.into()),
            month: Some(month.into()),
            year: Some(year.into()),
        }
    }

    /// Apply a date line.
    ///
    /// A bare day replaces only the day. `D/M` without a year is rejected and
    /// leaves the date untouched.
    pub fn apply(&mut self, line: &DateLine) -> Result<(), MonthWithoutYear> {
        match (&line.month, &line.year) {
            (Some(_), None) => return Err(MonthWithoutYear),
            (Some(month), Some(year)) => {
                self.month = Some(month.clone());
                self.year = Some(year.clone());
            }
            _ => {}
        }
        self.day = Some(line.day.clone());
        Ok(())
    }

    /// The date as `D/M/Y`, if complete.
    pub fn formatted(&self) -> Option<String> {
        match (&self.day, &self.month, &self.year) {
            (Some(d), Some(m), Some(y)) => Some(format!("{d}/{m}/{y}")),
            _ => None,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |p: &Option<String>| p.clone().unwrap_or_else(|| "?".to_string());
        write!(
            f,
            "{}/{}/{}",
            part(&self.day),
            part(&self.month),
            part(&self.year)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> DateLine {
        DateLine::parse(s).unwrap()
    }

    #[test]
    fn parse_component_counts() {
        assert_eq!(
            line("3"),
            DateLine {
                day: "3".into(),
                month: None,
                year: None
            }
        );
        assert_eq!(line("03/04").month.as_deref(), Some("04"));
        assert_eq!(line("03/04").year, None);
        assert_eq!(line("3/4/21").year.as_deref(), Some("21"));
    }

    #[test]
    fn reject_out_of_shape_components() {
        assert!(DateLine::parse("").is_none());
        assert!(DateLine::parse("/1/2020").is_none());
        assert!(DateLine::parse("40/1/2020").is_none());
        assert!(DateLine::parse("1/20/2020").is_none());
        assert!(DateLine::parse("1/1/2").is_none());
        assert!(DateLine::parse("1/1/20201").is_none());
        assert!(DateLine::parse("1/1/2020/1").is_none());
        assert!(DateLine::parse("1/1/").is_none());
        assert!(DateLine::parse("a/1/2020").is_none());
    }

    #[test]
    fn full_date_completes() {
        let mut date = CalendarDate::default();
        assert_eq!(date.formatted(), None);
        date.apply(&line("1/2/2020")).unwrap();
        assert_eq!(date.formatted().as_deref(), Some("1/2/2020"));
    }

    #[test]
    fn bare_day_keeps_month_and_year() {
        let mut date = CalendarDate::new("1", "2", "2020");
        date.apply(&line("15")).unwrap();
        assert_eq!(date.formatted().as_deref(), Some("15/2/2020"));
    }

    #[test]
    fn bare_day_alone_is_incomplete() {
        let mut date = CalendarDate::default();
        date.apply(&line("15")).unwrap();
        assert_eq!(date.formatted(), None);
        assert_eq!(date.to_string(), "15/?/?");
    }

    #[test]
    fn month_without_year_is_rejected_without_change() {
        let mut date = CalendarDate::new("1", "2", "2020");
        assert_eq!(date.apply(&line("5/6")), Err(MonthWithoutYear));
        assert_eq!(date, CalendarDate::new("1", "2", "2020"));
    }
}
