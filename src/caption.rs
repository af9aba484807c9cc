//! Captions shown under each thumbnail

use crate::models::MediaItem;
use chrono::DateTime;
use regex_lite::Regex;
use std::sync::LazyLock;

static STORY_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2}) at (\d{2})\.(\d{2})\.\d{2} [AP]M")
        .expect("story timestamp pattern is valid")
});

/// `"2024-03-05 at 10.15.30 PM"` becomes `"05/03 - 10:15"`.
/// Names without such a timestamp give an empty string.
pub fn format_timestamp(name: &str) -> String {
    match STORY_TIMESTAMP.captures(name) {
        Some(caps) => format!("{}/{} - {}:{}", &caps[3], &caps[2], &caps[4], &caps[5]),
        None => String::new(),
    }
}

/// Two-line label of an item: who posted it and when.
///
/// With a profile selected the profile id heads the label, otherwise the
/// item's owner prefixed with `@`. Empty when no time can be derived.
pub fn item_label(item: &MediaItem, selected_profile: Option<&str>) -> String {
    let stamp = format_timestamp(&item.timestamp_or_filename);
    if !stamp.is_empty() {
        return match selected_profile {
            Some(profile) => format!("{}\n{}", profile, stamp),
            None if !item.owner_label.is_empty() => format!("@{}\n{}", item.owner_label, stamp),
            None => String::new(),
        };
    }

    // cursor API items carry an RFC 3339 timestamp instead of a story name
    match DateTime::parse_from_rfc3339(&item.timestamp_or_filename) {
        Ok(time) => format!("@{}\n{}", item.owner_label, time.format("%H:%M:%S")),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-03-05 at 10.15.30 PM"), "05/03 - 10:15");
        assert_eq!(
            format_timestamp("stories/acme/2024-12-31 at 01.02.03 AM.mp4"),
            "31/12 - 01:02"
        );
    }

    #[test]
    fn test_format_timestamp_without_match_is_empty() {
        assert_eq!(format_timestamp("IMG_0001.jpg"), "");
        assert_eq!(format_timestamp("2024-03-05 at 10.15 PM"), "");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn test_label_for_selected_profile() {
        let item = MediaItem::from_key("stories/acme/2024-03-05 at 10.15.30 PM.jpg", "acme");
        assert_eq!(item_label(&item, Some("acme")), "acme\n05/03 - 10:15");
    }

    #[test]
    fn test_label_for_date_feed_uses_owner() {
        let item = MediaItem::from_key("stories/globex/2024-03-05 at 10.15.30 PM.jpg", "globex");
        assert_eq!(item_label(&item, None), "@globex\n05/03 - 10:15");

        let anonymous = MediaItem::from_key("2024-03-05 at 10.15.30 PM.jpg", "");
        assert_eq!(item_label(&anonymous, None), "");
    }

    #[test]
    fn test_label_for_api_item() {
        let item = MediaItem {
            id: "m1".into(),
            url: "s/acme/1.jpg".into(),
            kind: MediaKind::Photo,
            timestamp_or_filename: "2024-03-05T22:15:30+00:00".into(),
            owner_label: "acme".into(),
        };
        assert_eq!(item_label(&item, None), "@acme\n22:15:30");
    }

    #[test]
    fn test_label_without_time_is_empty() {
        let item = MediaItem::from_key("stories/acme/IMG_0001.jpg", "acme");
        assert_eq!(item_label(&item, None), "");
    }
}
