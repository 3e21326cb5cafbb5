//! Section lookup for navigation highlighting and page titles.
//!
//! A "section" is a path segment of the current request, e.g. `orders`
//! in `/admin/orders/42`. Segments are indexed from zero after the
//! leading slash.

use crate::locale::{ucfirst, Translator, SECTIONS_NAMESPACE};

/// Split a URL path into its non-empty segments.
///
/// Query strings and fragments are dropped.
#[must_use]
pub fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Section name at `segment`, or the one just before it when `segment` is
/// past the end of the path.
#[must_use]
pub fn app_section_name<'a>(segments: &[&'a str], segment: usize) -> Option<&'a str> {
    segments
        .get(segment)
        .or_else(|| segment.checked_sub(1).and_then(|prev| segments.get(prev)))
        .copied()
}

/// Check if the section at `segment` contains any of the given names.
///
/// Empty names never match.
#[must_use]
pub fn is_section_active(list: &[&str], segments: &[&str], segment: usize) -> bool {
    let Some(section) = app_section_name(segments, segment) else {
        return false;
    };
    list.iter()
        .any(|name| !name.is_empty() && section.contains(name))
}

/// Human-readable title for the section at `segment`.
///
/// Uses the `kanbanlogiq.<section>` translation, falling back to the key
/// itself, with the first character upper-cased. Returns an empty string
/// when there is no section.
#[must_use]
pub fn user_readable_section_name(
    segments: &[&str],
    segment: usize,
    translator: &impl Translator,
) -> String {
    let Some(section) = app_section_name(segments, segment) else {
        return String::new();
    };
    let title = translator
        .translate(SECTIONS_NAMESPACE, section)
        .map_or_else(|| format!("{SECTIONS_NAMESPACE}.{section}"), str::to_string);
    ucfirst(&title)
}

/// `"selected"` if the two values match case-insensitively, otherwise `""`.
///
/// Meant to be dropped straight into an `<option>` tag.
#[must_use]
pub fn is_selected_option(val: &str, check: &str) -> &'static str {
    if val.to_lowercase() == check.to_lowercase() {
        "selected"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Catalog, Language};

    #[test]
    fn test_path_segments() {
        assert_eq!(path_segments("/admin/orders/42"), vec!["admin", "orders", "42"]);
        assert_eq!(path_segments("admin//orders/"), vec!["admin", "orders"]);
        assert_eq!(path_segments("/admin/orders?page=2#top"), vec!["admin", "orders"]);
        assert!(path_segments("/").is_empty());
    }

    #[test]
    fn test_app_section_name_in_range() {
        let segments = ["admin", "orders", "42"];
        assert_eq!(app_section_name(&segments, 0), Some("admin"));
        assert_eq!(app_section_name(&segments, 1), Some("orders"));
    }

    #[test]
    fn test_app_section_name_falls_back_to_previous() {
        let segments = ["admin", "orders"];
        assert_eq!(app_section_name(&segments, 2), Some("orders"));
        assert_eq!(app_section_name(&segments, 5), None);
    }

    #[test]
    fn test_app_section_name_empty_path() {
        assert_eq!(app_section_name(&[], 0), None);
    }

    #[test]
    fn test_is_section_active() {
        let segments = ["admin", "orders", "42"];
        assert!(is_section_active(&["orders"], &segments, 1));
        assert!(is_section_active(&["users", "order"], &segments, 1));
        assert!(!is_section_active(&["users"], &segments, 1));
        assert!(!is_section_active(&[""], &segments, 1));
        assert!(!is_section_active(&["orders"], &[], 0));
    }

    #[test]
    fn test_user_readable_section_name_translated() {
        let catalog = Catalog::builtin(Language::Italian);
        let segments = path_segments("/admin/orders");
        assert_eq!(user_readable_section_name(&segments, 1, &catalog), "Ordini");
    }

    #[test]
    fn test_user_readable_section_name_missing_translation() {
        let catalog = Catalog::new();
        let segments = ["reports"];
        assert_eq!(
            user_readable_section_name(&segments, 0, &catalog),
            "Kanbanlogiq.reports"
        );
    }

    #[test]
    fn test_user_readable_section_name_no_section() {
        let catalog = Catalog::builtin(Language::English);
        assert_eq!(user_readable_section_name(&[], 0, &catalog), "");
    }

    #[test]
    fn test_is_selected_option() {
        assert_eq!(is_selected_option("Grande", "grande"), "selected");
        assert_eq!(is_selected_option("PICCOLA", "piccola"), "selected");
        assert_eq!(is_selected_option("Grande", "Piccola"), "");
    }
}
