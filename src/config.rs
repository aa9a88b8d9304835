//! Application configuration.
//!
//! Static settings come from `config.toml` (managed channel list, exempt
//! read-aloud bots, control panel location, embed color) and secrets come from
//! the environment (`DISCORD_BOT_TOKEN`, `DATABASE_URL`), loaded via dotenvy.
//! Validation is strict: a missing or malformed field aborts startup rather
//! than degrading silently.

use std::path::Path;

use serde::Deserialize;
use serenity::all::{ChannelId, UserId};

use crate::error::{config::ConfigError, AppError};

/// One managed voice channel, eligible for automatic owner/permission
/// lifecycle management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    /// Discord channel id of the managed voice channel.
    pub channel_id: u64,
    /// User limit restored when the channel resets to defaults. 0 means
    /// unlimited.
    pub user_limit: u32,
}

/// Validated application configuration.
pub struct Config {
    /// Embed accent color.
    pub bot_color: u32,
    /// Channel that hosts the long-lived control panel message.
    pub control_panel_channel_id: u64,
    /// Pre-existing control panel message to edit. When `None` the panel is
    /// posted once at startup and the id is logged so it can be configured.
    pub control_panel_message_id: Option<u64>,
    /// Managed voice channels.
    pub custom_vc_list: Vec<ChannelEntry>,
    /// Read-aloud companion bots exempt from ownership and member counting.
    pub read_bot_ids: Vec<u64>,

    pub discord_bot_token: String,
    pub database_url: String,
}

/// Raw shape of `config.toml` before validation. Snowflakes are strings in
/// the file, matching how Discord serializes them.
#[derive(Debug, Deserialize)]
struct RawConfig {
    bot_color: String,
    control_panel_channel_id: String,
    #[serde(default)]
    control_panel_message_id: String,
    custom_vc_list: Vec<RawChannelEntry>,
    #[serde(default)]
    read_bot_list: Vec<RawReadBot>,
}

#[derive(Debug, Deserialize)]
struct RawChannelEntry {
    channel_id: String,
    #[serde(default)]
    user_limit: u32,
}

#[derive(Debug, Deserialize)]
struct RawReadBot {
    bot_id: String,
}

impl Config {
    /// Loads and validates configuration from `config.toml` and the
    /// environment.
    ///
    /// # Arguments
    /// - `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// - `Ok(Config)` - Fully validated configuration
    /// - `Err(AppError)` - Any missing or malformed field (fatal; the caller
    ///   aborts startup)
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(ConfigError::Parse)?;

        let bot_color = parse_color(&raw.bot_color)?;
        let control_panel_channel_id =
            parse_snowflake("control_panel_channel_id", &raw.control_panel_channel_id)?;
        // Empty string is allowed: the panel gets posted on the first startup
        // and the id is then written into the config by the operator.
        let control_panel_message_id = if raw.control_panel_message_id.is_empty() {
            None
        } else {
            Some(parse_snowflake(
                "control_panel_message_id",
                &raw.control_panel_message_id,
            )?)
        };

        if raw.custom_vc_list.is_empty() {
            return Err(ConfigError::InvalidField {
                field: "custom_vc_list",
                reason: "at least one managed channel is required".to_string(),
            }
            .into());
        }
        let custom_vc_list = raw
            .custom_vc_list
            .iter()
            .map(|entry| {
                Ok(ChannelEntry {
                    channel_id: parse_snowflake("custom_vc_list.channel_id", &entry.channel_id)?,
                    user_limit: entry.user_limit,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let read_bot_ids = raw
            .read_bot_list
            .iter()
            .map(|bot| parse_snowflake("read_bot_list.bot_id", &bot.bot_id))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            bot_color,
            control_panel_channel_id,
            control_panel_message_id,
            custom_vc_list,
            read_bot_ids,
            discord_bot_token: require_env("DISCORD_BOT_TOKEN")?,
            database_url: require_env("DATABASE_URL")?,
        })
    }

    /// Looks up the managed-channel entry for a voice channel, if any.
    pub fn channel_entry(&self, channel_id: ChannelId) -> Option<&ChannelEntry> {
        self.custom_vc_list
            .iter()
            .find(|entry| entry.channel_id == channel_id.get())
    }

    /// Whether a voice channel is under automatic management.
    pub fn is_managed(&self, channel_id: ChannelId) -> bool {
        self.channel_entry(channel_id).is_some()
    }

    /// Whether a user is one of the configured exempt read-aloud bots.
    pub fn is_read_bot(&self, user_id: UserId) -> bool {
        self.read_bot_ids.contains(&user_id.get())
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_snowflake(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| ConfigError::InvalidField {
            field,
            reason: format!("expected a Discord snowflake, got {value:?}"),
        })
}

/// Parses a `#RRGGBB` color string into its numeric value.
fn parse_color(value: &str) -> Result<u32, ConfigError> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidField {
            field: "bot_color",
            reason: format!("expected #RRGGBB, got {value:?}"),
        });
    }
    u32::from_str_radix(digits, 16).map_err(|e| ConfigError::InvalidField {
        field: "bot_color",
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_color_with_and_without_hash() {
        assert_eq!(parse_color("#FF0000").unwrap(), 0xFF0000);
        assert_eq!(parse_color("00ff7f").unwrap(), 0x00FF7F);
    }

    #[test]
    fn rejects_malformed_color() {
        assert!(parse_color("#FF00").is_err());
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn rejects_zero_and_non_numeric_snowflakes() {
        assert!(parse_snowflake("control_panel_channel_id", "0").is_err());
        assert!(parse_snowflake("control_panel_channel_id", "abc").is_err());
        assert_eq!(
            parse_snowflake("control_panel_channel_id", "123456789012345678").unwrap(),
            123456789012345678
        );
    }
}
