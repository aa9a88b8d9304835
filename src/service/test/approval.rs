use serenity::all::UserId;
use test_utils::serenity::message::create_embed_message;

use crate::bot::ui;
use crate::service::approval::{card_is_done, parse_mention, requester_from_card};

#[test]
fn parses_plain_and_nickname_mentions() {
    assert_eq!(parse_mention("<@123>"), Some(UserId::new(123)));
    assert_eq!(parse_mention("<@!123>"), Some(UserId::new(123)));
    assert_eq!(
        parse_mention("➡️ <@456> is requesting to join"),
        Some(UserId::new(456))
    );
}

#[test]
fn rejects_malformed_mentions() {
    assert_eq!(parse_mention("no mention here"), None);
    assert_eq!(parse_mention("<@abc>"), None);
    assert_eq!(parse_mention("<@0>"), None);
    assert_eq!(parse_mention("<@123"), None);
}

/// A request card is identified by its footer marker and yields the
/// requester from the embedded mention.
#[test]
fn extracts_requester_from_card() {
    let message = create_embed_message(
        1,
        true,
        None,
        Some("➡️ <@456> is requesting to join"),
        Some(ui::REQUEST_CARD_FOOTER),
    );

    assert_eq!(requester_from_card(&message).unwrap(), UserId::new(456));
}

/// An approved card reads as done, a fresh one does not. The waiting-room
/// leave fired by moving an approved member in must keep their card, so the
/// card is edited to done before the move and this check guards the delete.
#[test]
fn approved_card_is_done_and_pending_card_is_not() {
    let done = create_embed_message(
        1,
        true,
        None,
        Some("✅️ <@456> is requesting to join (approved)"),
        Some(ui::REQUEST_CARD_FOOTER),
    );
    let pending = create_embed_message(
        1,
        true,
        None,
        Some("➡️ <@456> is requesting to join"),
        Some(ui::REQUEST_CARD_FOOTER),
    );

    assert!(card_is_done(&done));
    assert!(!card_is_done(&pending));
}

/// Messages without the footer marker are not cards, whatever their text.
#[test]
fn rejects_message_without_card_footer() {
    let message = create_embed_message(1, true, None, Some("➡️ <@456> is requesting"), None);

    assert!(requester_from_card(&message).is_err());
}
