//! Voice-channel status annotation.
//!
//! Managed channels carry a `(👑name)` marker in their voice status so the
//! current owner is visible from the channel list. The marker is appended to
//! whatever status the members set, replaced when ownership changes, and
//! stripped when the session ends. Composition is pure; applying goes through
//! a single channel edit.

use serenity::all::{Context, EditChannel, GuildChannel};

use crate::error::AppError;

const MARKER_OPEN: &str = "(👑";
const MARKER_CLOSE: char = ')';

/// Returns the status string carrying the owner marker, or `None` when the
/// current status already shows this owner and no edit is needed.
pub fn annotate_status(current: Option<&str>, owner_name: &str) -> Option<String> {
    let marker = format!("{MARKER_OPEN}{owner_name}{MARKER_CLOSE}");
    match current {
        None | Some("") => Some(marker),
        Some(status) => match find_marker(status) {
            Some((start, end)) => {
                if &status[start..end] == marker {
                    None
                } else {
                    Some(format!(
                        "{}{marker}{}",
                        &status[..start],
                        &status[end..]
                    ))
                }
            }
            None => Some(format!("{status} {marker}")),
        },
    }
}

/// Returns the status string with the owner marker removed, or `None` when
/// there is no marker to strip.
pub fn strip_status(current: Option<&str>) -> Option<String> {
    let status = current?;
    let (start, end) = find_marker(status)?;
    Some(
        format!("{}{}", &status[..start], &status[end..])
            .trim()
            .to_string(),
    )
}

/// Applies the owner marker to a channel's voice status.
pub async fn apply_owner_marker(
    ctx: &Context,
    channel: &GuildChannel,
    owner_name: &str,
) -> Result<(), AppError> {
    if let Some(status) = annotate_status(channel.status.as_deref(), owner_name) {
        channel
            .id
            .edit(&ctx.http, EditChannel::new().status(status))
            .await?;
    }
    Ok(())
}

/// Removes the owner marker from a channel's voice status.
pub async fn clear_owner_marker(ctx: &Context, channel: &GuildChannel) -> Result<(), AppError> {
    if let Some(status) = strip_status(channel.status.as_deref()) {
        channel
            .id
            .edit(&ctx.http, EditChannel::new().status(status))
            .await?;
    }
    Ok(())
}

/// Byte range of the owner marker within a status string, if present.
/// Owner names may contain `)`, so the marker extends to the last close
/// after the marker open.
fn find_marker(status: &str) -> Option<(usize, usize)> {
    let start = status.rfind(MARKER_OPEN)?;
    let close = status[start..].rfind(MARKER_CLOSE)?;
    Some((start, start + close + MARKER_CLOSE.len_utf8()))
}
