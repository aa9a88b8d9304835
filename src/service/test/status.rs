use crate::service::status::{annotate_status, strip_status};

/// An empty or missing status becomes just the owner marker.
#[test]
fn marker_on_empty_status() {
    assert_eq!(annotate_status(None, "alice").as_deref(), Some("(👑alice)"));
    assert_eq!(
        annotate_status(Some(""), "alice").as_deref(),
        Some("(👑alice)")
    );
}

/// A member-set status keeps its text, the marker is appended.
#[test]
fn marker_appended_to_existing_status() {
    assert_eq!(
        annotate_status(Some("movie night"), "alice").as_deref(),
        Some("movie night (👑alice)")
    );
}

/// An ownership transfer replaces the previous owner's marker in place.
#[test]
fn marker_replaced_on_transfer() {
    assert_eq!(
        annotate_status(Some("movie night (👑alice)"), "bob").as_deref(),
        Some("movie night (👑bob)")
    );
}

/// No edit is issued when the status already shows the current owner.
#[test]
fn unchanged_when_marker_is_current() {
    assert_eq!(annotate_status(Some("movie night (👑alice)"), "alice"), None);
    assert_eq!(annotate_status(Some("(👑alice)"), "alice"), None);
}

/// Stripping removes the marker and trims leftover whitespace.
#[test]
fn strip_removes_marker() {
    assert_eq!(
        strip_status(Some("movie night (👑alice)")).as_deref(),
        Some("movie night")
    );
    assert_eq!(strip_status(Some("(👑alice)")).as_deref(), Some(""));
}

/// Nothing to strip means no edit.
#[test]
fn strip_is_noop_without_marker() {
    assert_eq!(strip_status(Some("movie night")), None);
    assert_eq!(strip_status(None), None);
}

/// A closing parenthesis inside the owner name does not truncate the marker:
/// replace and strip cover the whole of it.
#[test]
fn parenthesis_in_owner_name() {
    assert_eq!(
        annotate_status(Some("chilling (👑a)b)"), "carol").as_deref(),
        Some("chilling (👑carol)")
    );
    assert_eq!(
        strip_status(Some("chilling (👑a)b)")).as_deref(),
        Some("chilling")
    );
    assert_eq!(annotate_status(Some("chilling (👑a)b)"), "a)b"), None);
}

/// Parentheses before the marker do not break the marker boundary search.
#[test]
fn parenthesis_in_surrounding_text() {
    assert_eq!(
        annotate_status(Some("game (ranked)"), "alice").as_deref(),
        Some("game (ranked) (👑alice)")
    );
    assert_eq!(
        strip_status(Some("game (ranked) (👑alice)")).as_deref(),
        Some("game (ranked)")
    );
}
