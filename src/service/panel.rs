//! The control panel message.
//!
//! One long-lived message in a configured text channel lists every managed
//! channel with its current owner and carries the operation components. The
//! message is edited in place on every ownership change; when no message id
//! is configured yet, the panel is posted once at startup and its id is
//! logged for the operator to pin into the config.

use std::sync::Mutex;

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, Context, CreateMessage, EditMessage, MessageId};

use crate::bot::ui;
use crate::config::Config;
use crate::data::room::RoomRepository;
use crate::error::AppError;

pub struct PanelService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> PanelService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// One line per managed channel showing its current owner.
    pub async fn render_lines(&self) -> Result<String, AppError> {
        let channel_ids: Vec<u64> = self
            .config
            .custom_vc_list
            .iter()
            .map(|entry| entry.channel_id)
            .collect();
        let rooms = RoomRepository::new(self.db)
            .find_by_channel_ids(&channel_ids)
            .await?;

        let lines = self
            .config
            .custom_vc_list
            .iter()
            .map(|entry| {
                let owner = rooms
                    .iter()
                    .find(|room| room.channel_id == entry.channel_id)
                    .and_then(|room| room.owner_id);
                match owner {
                    Some(owner_id) => format!("<#{}> — owner: <@{owner_id}>", entry.channel_id),
                    None => format!("<#{}> — free", entry.channel_id),
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(lines)
    }

    /// Renders the panel and writes it to Discord, editing the configured
    /// message when one exists and posting a fresh one otherwise.
    ///
    /// # Arguments
    /// - `posted` - In-memory slot remembering a panel posted this process
    ///   lifetime, so restarts without a configured id do not spam the
    ///   channel within one run
    pub async fn publish(
        &self,
        ctx: &Context,
        posted: &Mutex<Option<MessageId>>,
    ) -> Result<(), AppError> {
        let lines = self.render_lines().await?;
        let embed = ui::panel_embed(self.config.bot_color, lines);
        let channel_id = ChannelId::new(self.config.control_panel_channel_id);

        let target = self
            .config
            .control_panel_message_id
            .map(MessageId::new)
            .or_else(|| *posted.lock().expect("panel slot poisoned"));

        match target {
            Some(message_id) => {
                channel_id
                    .edit_message(
                        &ctx.http,
                        message_id,
                        EditMessage::new()
                            .embed(embed)
                            .components(ui::panel_components()),
                    )
                    .await?;
            }
            None => {
                let message = channel_id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new()
                            .embed(embed)
                            .components(ui::panel_components()),
                    )
                    .await?;
                *posted.lock().expect("panel slot poisoned") = Some(message.id);
                tracing::info!(
                    "Control panel posted; set control_panel_message_id = \"{}\" in config.toml",
                    message.id
                );
            }
        }
        Ok(())
    }
}
