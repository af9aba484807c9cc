use chrono::{Datelike, Duration, Local, NaiveDate};
use std::fmt;

/// What the feed shows: the stories of one day or the stories of one profile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedQuery {
    ByDate(NaiveDate),
    ByProfile(String),
}

impl FeedQuery {
    /// Key used by the backends: `DD.MM.YY` for dates, the id for profiles
    pub fn key(&self) -> String {
        match self {
            FeedQuery::ByDate(date) => date_key(*date),
            FeedQuery::ByProfile(profile_id) => profile_id.clone(),
        }
    }

    pub fn profile(&self) -> Option<&str> {
        match self {
            FeedQuery::ByProfile(profile_id) => Some(profile_id),
            FeedQuery::ByDate(_) => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            FeedQuery::ByDate(date) => Some(*date),
            FeedQuery::ByProfile(_) => None,
        }
    }
}

impl fmt::Display for FeedQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeedQuery::ByDate(date) => write!(f, "date {}", date_key(*date)),
            FeedQuery::ByProfile(profile_id) => write!(f, "profile {}", profile_id),
        }
    }
}

/// Formats a date as the `DD.MM.YY` bucket key
pub fn date_key(date: NaiveDate) -> String {
    format!(
        "{:02}.{:02}.{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// The day a fresh gallery opens on
pub fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(date), "05.03.24");
        let date = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();
        assert_eq!(date_key(date), "31.12.00");
    }

    #[test]
    fn test_query_equality() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(FeedQuery::ByDate(date), FeedQuery::ByDate(date));
        assert_ne!(
            FeedQuery::ByProfile("acme".into()),
            FeedQuery::ByProfile("other".into())
        );
        // same key text, different discriminant
        assert_ne!(
            FeedQuery::ByDate(date),
            FeedQuery::ByProfile("05.03.24".into())
        );
    }

    #[test]
    fn test_yesterday_is_before_today() {
        assert!(yesterday() < Local::now().date_naive());
    }
}
