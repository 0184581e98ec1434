//! Selection of transactions by the calendar month they were sold in.
//!
//! Month names are matched against the month component of a sale date only,
//! so a month predicate selects sales from that month in every year.

use time::{Month, OffsetDateTime, UtcOffset};

use crate::{Error, timezone::get_local_offset};

/// The English month names in calendar order, lowercase.
const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// A rule that selects transactions sold in a particular calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthPredicate {
    /// Matches sales whose date falls in this month, in any year.
    Month(Month),
    /// The requested month name was not recognised, matches no sales.
    Unrecognized,
}

impl MonthPredicate {
    /// Parse a full English month name, ignoring case and surrounding whitespace.
    ///
    /// Abbreviations and anything else that is not a month name produce
    /// [MonthPredicate::Unrecognized] rather than an error.
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();

        MONTH_NAMES
            .iter()
            .find(|(month_name, _)| *month_name == name)
            .map(|&(_, month)| MonthPredicate::Month(month))
            .unwrap_or(MonthPredicate::Unrecognized)
    }

    /// Build the predicate for a request, defaulting to the current month.
    ///
    /// A missing or blank `month` selects the month that it currently is in
    /// `local_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the month has to be defaulted
    /// and `local_timezone` is not a valid, canonical timezone name.
    pub fn from_request(month: Option<&str>, local_timezone: &str) -> Result<Self, Error> {
        match month {
            Some(name) if !name.trim().is_empty() => Ok(Self::parse(name)),
            _ => current_month(local_timezone).map(MonthPredicate::Month),
        }
    }

    /// Whether a sale on `date_of_sale` falls within the selected month.
    pub fn matches(&self, date_of_sale: OffsetDateTime) -> bool {
        match self {
            MonthPredicate::Month(month) => month_of_sale(date_of_sale) == *month,
            MonthPredicate::Unrecognized => false,
        }
    }
}

/// The calendar month a sale belongs to.
///
/// Sale dates are compared in UTC so that every store agrees on the month of
/// a sale regardless of the offset it was recorded with.
pub fn month_of_sale(date_of_sale: OffsetDateTime) -> Month {
    date_of_sale.to_offset(UtcOffset::UTC).month()
}

fn current_month(local_timezone: &str) -> Result<Month, Error> {
    let offset = get_local_offset(local_timezone).ok_or_else(|| {
        tracing::error!("invalid timezone {local_timezone}");
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).month())
}

#[cfg(test)]
mod tests {
    use time::{Month, OffsetDateTime, macros::datetime};

    use crate::Error;

    use super::{MonthPredicate, month_of_sale};

    #[test]
    fn parses_month_names_case_insensitively() {
        assert_eq!(
            MonthPredicate::parse("March"),
            MonthPredicate::Month(Month::March)
        );
        assert_eq!(
            MonthPredicate::parse("mArCh"),
            MonthPredicate::Month(Month::March)
        );
        assert_eq!(
            MonthPredicate::parse("  december "),
            MonthPredicate::Month(Month::December)
        );
    }

    #[test]
    fn unknown_names_are_unrecognized() {
        for name in ["Marchx", "Mar", "Jan", "13", "Smarch"] {
            assert_eq!(
                MonthPredicate::parse(name),
                MonthPredicate::Unrecognized,
                "{name} should not be recognised as a month"
            );
        }
    }

    #[test]
    fn matches_month_in_any_year() {
        let march = MonthPredicate::parse("march");

        assert!(march.matches(datetime!(2021-03-01 00:00 UTC)));
        assert!(march.matches(datetime!(1999-03-31 23:59 UTC)));
        assert!(!march.matches(datetime!(2021-04-01 00:00 UTC)));
    }

    #[test]
    fn unrecognized_matches_nothing() {
        let predicate = MonthPredicate::Unrecognized;

        assert!(!predicate.matches(datetime!(2021-03-01 00:00 UTC)));
        assert!(!predicate.matches(datetime!(2022-11-15 12:00 UTC)));
    }

    #[test]
    fn month_of_sale_is_taken_in_utc() {
        // 1 April 02:00 in Auckland is still 31 March in UTC.
        let date = datetime!(2022-04-01 02:00 +13:00);

        assert_eq!(month_of_sale(date), Month::March);
    }

    #[test]
    fn missing_month_defaults_to_current_month() {
        let want = MonthPredicate::Month(OffsetDateTime::now_utc().month());

        let got = MonthPredicate::from_request(None, "Etc/UTC").unwrap();
        let got_blank = MonthPredicate::from_request(Some("  "), "Etc/UTC").unwrap();

        assert_eq!(want, got);
        assert_eq!(want, got_blank);
    }

    #[test]
    fn given_month_ignores_timezone() {
        let got = MonthPredicate::from_request(Some("July"), "Not/AZone").unwrap();

        assert_eq!(got, MonthPredicate::Month(Month::July));
    }

    #[test]
    fn default_month_fails_on_invalid_timezone() {
        let got = MonthPredicate::from_request(None, "Not/AZone");

        assert_eq!(got, Err(Error::InvalidTimezoneError("Not/AZone".to_owned())));
    }
}
