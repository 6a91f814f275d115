use crate::domain::CalendarDay;
use crate::error::{CalverError, Result};
use chrono::{DateTime, Utc};
use std::fmt;

/// Calendar version fields: `YEAR.MONTH.DAY.ORDER`
///
/// `year_offset` is relative to the baseline year and never negative.
/// `order` is the zero-based same-day ordinal, most recent commit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct VersionFields {
    pub year_offset: u32,
    pub month: u32,
    pub day: u32,
    pub order: u32,
}

impl VersionFields {
    /// Create a new set of fields
    pub fn new(year_offset: u32, month: u32, day: u32, order: u32) -> Self {
        VersionFields {
            year_offset,
            month,
            day,
            order,
        }
    }

    /// The all-zero version reported for a repository without commits
    pub fn zero() -> Self {
        VersionFields::default()
    }

    /// Fields for a commit made at `time`
    ///
    /// The year offset is clamped to zero when `time` falls before the
    /// baseline year.
    pub fn at(time: DateTime<Utc>, baseline: i32, order: u32) -> Self {
        let day = CalendarDay::of(time);
        let year_offset = i64::from(day.year()) - i64::from(baseline);

        VersionFields {
            year_offset: year_offset.clamp(0, i64::from(u32::MAX)) as u32,
            month: day.month(),
            day: day.day(),
            order,
        }
    }

    /// Render with a prefix and separator
    ///
    /// With `short` set, a trailing zero ordinal is dropped together with
    /// its separator. A non-zero ordinal is always kept.
    ///
    /// # Example
    /// ```
    /// # use git_calver::domain::VersionFields;
    /// let fields = VersionFields::new(0, 3, 10, 0);
    /// assert_eq!(fields.format("v", ".", false), "v0.3.10.0");
    /// assert_eq!(fields.format("v", ".", true), "v0.3.10");
    /// assert_eq!(fields.format("", "-", false), "0-3-10-0");
    /// ```
    pub fn format(&self, prefix: &str, separator: &str, short: bool) -> String {
        let mut parts = vec![
            self.year_offset.to_string(),
            self.month.to_string(),
            self.day.to_string(),
        ];
        if !(short && self.order == 0) {
            parts.push(self.order.to_string());
        }

        format!("{}{}", prefix, parts.join(separator))
    }

    /// Parse a rendered version back into fields
    ///
    /// The prefix is stripped when present. Three fields are accepted as a
    /// short form with an implicit zero ordinal.
    pub fn parse(input: &str, prefix: &str, separator: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(CalverError::inverse("separator must not be empty"));
        }

        let body = input.strip_prefix(prefix).unwrap_or(input);
        let mut parts: Vec<&str> = body.split(separator).collect();
        match parts.len() {
            3 => parts.push("0"),
            4 => {}
            n => {
                return Err(CalverError::inverse(format!(
                    "'{}' has {} fields, expected 3 or 4",
                    input, n
                )))
            }
        }

        let mut values = [0u32; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            let not_a_number =
                || CalverError::inverse(format!("'{}' is not a number in '{}'", part, input));

            // only plain digits, as the formatter writes them
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(not_a_number());
            }
            *value = part.parse::<u32>().map_err(|_| not_a_number())?;
        }

        let [year_offset, month, day, order] = values;
        Ok(VersionFields::new(year_offset, month, day, order))
    }
}

impl fmt::Display for VersionFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.year_offset, self.month, self.day, self.order
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fields_at_commit_time() {
        let time = Utc.with_ymd_and_hms(2021, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(VersionFields::at(time, 2021, 0), VersionFields::new(0, 3, 10, 0));
        assert_eq!(VersionFields::at(time, 2018, 2), VersionFields::new(3, 3, 10, 2));
    }

    #[test]
    fn test_year_offset_is_clamped() {
        let time = Utc.with_ymd_and_hms(2021, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(VersionFields::at(time, 2030, 0).year_offset, 0);
    }

    #[test]
    fn test_zero_renders_all_fields() {
        assert_eq!(VersionFields::zero().format("v", ".", false), "v0.0.0.0");
        assert_eq!(VersionFields::zero().format("v", ".", true), "v0.0.0");
    }

    #[test]
    fn test_short_only_trims_zero_ordinal() {
        let fields = VersionFields::new(1, 12, 31, 10);
        assert_eq!(fields.format("v", ".", true), "v1.12.31.10");

        let fields = VersionFields::new(1, 12, 31, 0);
        assert_eq!(fields.format("v", "_", true), "v1_12_31");
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionFields::new(2, 7, 4, 1).to_string(), "2.7.4.1");
    }

    #[test]
    fn test_parse_full_and_short_forms() {
        assert_eq!(
            VersionFields::parse("v0.3.10.2", "v", ".").unwrap(),
            VersionFields::new(0, 3, 10, 2)
        );
        assert_eq!(
            VersionFields::parse("v0.3.10", "v", ".").unwrap(),
            VersionFields::new(0, 3, 10, 0)
        );
    }

    #[test]
    fn test_parse_custom_prefix_and_separator() {
        assert_eq!(
            VersionFields::parse("release-1/2/3/4", "release-", "/").unwrap(),
            VersionFields::new(1, 2, 3, 4)
        );
        assert_eq!(
            VersionFields::parse("1.2.3.4", "v", ".").unwrap(),
            VersionFields::new(1, 2, 3, 4)
        );
    }

    #[test]
    fn test_parse_rejects_signed_and_padded_fields() {
        for input in ["v0.+3.10.0", "v+0.3.10.0", "v0.3. 10.0", "v0.3.10.0 "] {
            assert!(
                matches!(
                    VersionFields::parse(input, "v", "."),
                    Err(CalverError::InvalidInverseVersion(_))
                ),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["vx.1.1.0", "v0.1", "v0.1.1.1.1", "v0.-1.1.0", "v0.1.1.", ""] {
            assert!(
                matches!(
                    VersionFields::parse(input, "v", "."),
                    Err(CalverError::InvalidInverseVersion(_))
                ),
                "'{}' should be rejected",
                input
            );
        }
        assert!(VersionFields::parse("v0.1.1.0", "v", "").is_err());
    }
}
