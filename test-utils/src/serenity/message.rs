//! Test factory for creating Serenity Message objects.

use serenity::all::Message;

/// Creates a test Serenity Message carrying a single embed.
///
/// The message is created by deserializing JSON with the provided values, the
/// same shape Discord's API returns. Embed title, description, and footer are
/// each optional.
///
/// # Arguments
/// - `author_id` - Discord user id of the message author
/// - `author_is_bot` - Whether the author is a bot account
/// - `title` - Optional embed title
/// - `description` - Optional embed description
/// - `footer` - Optional embed footer text
///
/// # Returns
/// - `Message` - A valid Serenity Message struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid
///   test data)
pub fn create_embed_message(
    author_id: u64,
    author_is_bot: bool,
    title: Option<&str>,
    description: Option<&str>,
    footer: Option<&str>,
) -> Message {
    let mut embed = serde_json::json!({ "type": "rich" });
    if let Some(title) = title {
        embed["title"] = serde_json::json!(title);
    }
    if let Some(description) = description {
        embed["description"] = serde_json::json!(description);
    }
    if let Some(footer) = footer {
        embed["footer"] = serde_json::json!({ "text": footer });
    }

    serde_json::from_value(serde_json::json!({
        "id": "200000000000000001",
        "channel_id": "200000000000000002",
        "author": {
            "id": author_id.to_string(),
            "username": "test-user",
            "discriminator": null,
            "global_name": null,
            "avatar": null,
            "bot": author_is_bot,
        },
        "content": "",
        "timestamp": "2026-01-01T00:00:00Z",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "mention_channels": [],
        "attachments": [],
        "embeds": [embed],
        "pinned": false,
        "type": 0,
    }))
    .expect("valid message JSON")
}
