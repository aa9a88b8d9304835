//! Component and modal interaction handler.
//!
//! Interactions are parsed into [`Command`] values first, then dispatched
//! exhaustively. Authorization happens per command against the stored
//! session owner of the channel the acting user is connected to (or, for
//! request-card buttons, of the channel holding the card). Errors the acting
//! user caused come back as an ephemeral reply; infrastructure errors are
//! logged and dropped.

use serenity::all::{
    ChannelId, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditMember, GuildChannel, Interaction,
    ModalInteraction, UserId,
};

use crate::bot::command::{self, Command};
use crate::bot::{ui, Handler};
use crate::data::room::RoomRepository;
use crate::error::AppError;
use crate::service::access;
use crate::service::approval::{self, ApprovalService};
use crate::service::block_list::{BlockListService, BlockOutcome};
use crate::service::panel::PanelService;
use crate::service::permission::MemberChange;
use crate::service::reconciler::{self, OwnerChange, ReconcileRequest, Reconciler};
use crate::service::status;

/// Routes an interaction to the component or modal dispatcher.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Component(component) => handle_component(handler, &ctx, component).await,
        Interaction::Modal(modal) => handle_modal(handler, &ctx, modal).await,
        _ => {}
    }
}

async fn handle_component(handler: &Handler, ctx: &Context, interaction: ComponentInteraction) {
    let Some(cmd) = command::parse_component(&interaction) else {
        return;
    };
    tracing::debug!("Component interaction {cmd:?} from {}", interaction.user.id);

    if let Err(error) = run_component(handler, ctx, &interaction, cmd).await {
        match error.user_message() {
            Some(message) => {
                if let Err(respond_error) = ephemeral(ctx, &interaction, message).await {
                    tracing::error!("Failed to send error reply: {respond_error:?}");
                }
            }
            None => tracing::error!("Component interaction failed: {error:?}"),
        }
    }
}

async fn handle_modal(handler: &Handler, ctx: &Context, interaction: ModalInteraction) {
    let Some(cmd) = command::parse_modal(&interaction) else {
        return;
    };
    tracing::debug!("Modal submit {cmd:?} from {}", interaction.user.id);

    if let Err(error) = run_modal(handler, ctx, &interaction, cmd).await {
        match error.user_message() {
            Some(message) => {
                if let Err(respond_error) = ephemeral_modal(ctx, &interaction, message).await {
                    tracing::error!("Failed to send error reply: {respond_error:?}");
                }
            }
            None => tracing::error!("Modal interaction failed: {error:?}"),
        }
    }
}

async fn run_component(
    handler: &Handler,
    ctx: &Context,
    interaction: &ComponentInteraction,
    cmd: Command,
) -> Result<(), AppError> {
    let guild_id = interaction.guild_id.ok_or_else(|| {
        AppError::BadRequest("This only works inside a server.".to_string())
    })?;
    let user_id = interaction.user.id;
    let db = &handler.db;
    let config = &handler.config;

    match cmd {
        Command::OpenUserLimitModal => {
            access::connected_editable_channel(ctx, db, config, guild_id, user_id, false).await?;
            interaction
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Modal(ui::user_limit_modal()),
                )
                .await?;
        }
        Command::OpenBitrateModal => {
            access::connected_editable_channel(ctx, db, config, guild_id, user_id, false).await?;
            interaction
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Modal(ui::bitrate_modal()),
                )
                .await?;
        }
        Command::TransferOwnership(target) => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, true)
                    .await?;
            if config.is_read_bot(target) {
                return Err(AppError::BadRequest(
                    "A read-aloud bot cannot own a channel.".to_string(),
                ));
            }
            if access::connected_channel(ctx, guild_id, target) != Some(channel.id) {
                return Err(AppError::BadRequest(
                    "The new owner must be connected to the channel.".to_string(),
                ));
            }

            Reconciler::new(db, config)
                .update_channel(
                    ctx,
                    &channel,
                    ReconcileRequest::owner(OwnerChange::Assign(target)),
                )
                .await?;
            channel
                .id
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embed(ui::transfer_embed(config.bot_color, target)),
                )
                .await?;
            let member = guild_id.member(ctx, target).await?;
            status::apply_owner_marker(ctx, &channel, member.display_name()).await?;
            PanelService::new(db, config)
                .publish(ctx, &handler.panel_message)
                .await?;
            ephemeral(ctx, interaction, "Ownership transferred.").await?;
        }
        Command::BlockUsers(targets) => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let outcome = BlockListService::new(db)
                .block_users(ctx, guild_id, user_id, &targets)
                .await?;
            Reconciler::new(db, config)
                .update_channel(ctx, &channel, ReconcileRequest::refresh())
                .await?;
            ephemeral(ctx, interaction, &block_summary(&outcome)).await?;
        }
        Command::UnblockUsers(targets) => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            BlockListService::new(db)
                .unblock_users(user_id, &targets)
                .await?;
            Reconciler::new(db, config)
                .update_channel(ctx, &channel, ReconcileRequest::refresh())
                .await?;
            ephemeral(
                ctx,
                interaction,
                &format!("Unblocked {} user(s).", targets.len()),
            )
            .await?;
        }
        Command::ShowBlockList => {
            let description = BlockListService::new(db).render_block_list(user_id).await?;
            let embed = ui::block_list_embed(
                config.bot_color,
                &interaction.user.name,
                interaction.user.avatar_url(),
                description,
            );
            interaction
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .embed(embed)
                            .ephemeral(true),
                    ),
                )
                .await?;
        }
        Command::ToggleApproval => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let stored = RoomRepository::new(db)
                .find_by_channel_id(channel.id.get())
                .await?;
            let enabled = !stored.is_some_and(|room| room.approval);
            // Members already inside keep their seat when the gate goes up.
            let grants: Vec<MemberChange> = channel
                .members(&ctx.cache)
                .map_err(Box::new)?
                .iter()
                .map(|member| MemberChange::approve(member.user.id, true))
                .collect();
            Reconciler::new(db, config)
                .update_channel(
                    ctx,
                    &channel,
                    ReconcileRequest {
                        members: grants,
                        ..ReconcileRequest::approval(enabled)
                    },
                )
                .await?;
            interaction
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .embed(ui::toggle_approval_embed(config.bot_color, enabled))
                            .ephemeral(true),
                    ),
                )
                .await?;
        }
        Command::ApproveRequest => {
            let channel =
                owned_card_channel(handler, ctx, user_id, interaction.channel_id).await?;
            let requester = approval::requester_from_card(&interaction.message)?;
            let service = ApprovalService::new(db, config);
            let room = RoomRepository::new(db)
                .find_by_channel_id(channel.id.get())
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("This channel has no active session.".to_string())
                })?;
            if !service.is_waiting(ctx, guild_id, &room, requester) {
                return Err(AppError::BadRequest(
                    "That member is no longer in the waiting room.".to_string(),
                ));
            }

            Reconciler::new(db, config)
                .update_channel(
                    ctx,
                    &channel,
                    ReconcileRequest::members(vec![MemberChange::approve(requester, true)]),
                )
                .await?;
            // The move fires a waiting-room leave event whose handler deletes
            // pending cards; the card must already read as approved by then.
            service.mark_card_done(ctx, &interaction.message).await?;
            service
                .move_into_channel(ctx, guild_id, requester, channel.id)
                .await?;
            interaction
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
        }
        Command::RejectRequest { block } => {
            let channel =
                owned_card_channel(handler, ctx, user_id, interaction.channel_id).await?;
            let requester = approval::requester_from_card(&interaction.message)?;

            if block {
                BlockListService::new(db)
                    .block_users(ctx, guild_id, user_id, &[requester])
                    .await?;
            }
            // Revoking the grant and refreshing also folds a fresh block-list
            // read into the overwrites.
            Reconciler::new(db, config)
                .update_channel(
                    ctx,
                    &channel,
                    ReconcileRequest::members(vec![MemberChange::approve(requester, false)]),
                )
                .await?;

            let room = RoomRepository::new(db)
                .find_by_channel_id(channel.id.get())
                .await?;
            let wait_channel = room.and_then(|room| room.wait_channel_id).map(ChannelId::new);
            let connected = access::connected_channel(ctx, guild_id, requester);
            if connected == Some(channel.id) || (connected.is_some() && connected == wait_channel) {
                guild_id
                    .edit_member(&ctx.http, requester, EditMember::new().disconnect_member())
                    .await?;
            }

            interaction.message.delete(&ctx.http).await?;
            interaction
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
        }
        Command::SelectTargets(users) => {
            handler
                .selections
                .insert(interaction.message.id, user_id, users);
            interaction
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
        }
        Command::KickSelected => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let targets = take_targets(handler, interaction, user_id)?;
            let mut kicked = 0;
            for target in targets {
                if access::connected_channel(ctx, guild_id, target) == Some(channel.id) {
                    guild_id
                        .edit_member(&ctx.http, target, EditMember::new().disconnect_member())
                        .await?;
                    kicked += 1;
                }
            }
            ephemeral(ctx, interaction, &format!("Kicked {kicked} member(s).")).await?;
        }
        Command::MuteSelected => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let targets = take_targets(handler, interaction, user_id)?;
            let changes: Vec<MemberChange> = targets
                .iter()
                .map(|target| MemberChange::mute(*target, true))
                .collect();
            Reconciler::new(db, config)
                .update_channel(ctx, &channel, ReconcileRequest::members(changes))
                .await?;
            ephemeral(
                ctx,
                interaction,
                &format!("Muted {} member(s).", targets.len()),
            )
            .await?;
        }
        Command::UnmuteSelected => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let targets = take_targets(handler, interaction, user_id)?;
            let changes: Vec<MemberChange> = targets
                .iter()
                .map(|target| MemberChange::mute(*target, false))
                .collect();
            Reconciler::new(db, config)
                .update_channel(ctx, &channel, ReconcileRequest::members(changes))
                .await?;
            ephemeral(
                ctx,
                interaction,
                &format!("Unmuted {} member(s).", targets.len()),
            )
            .await?;
        }
        Command::UserLimitSubmit(_) | Command::BitrateSubmit(_) => {
            // Modal payloads never arrive as component interactions.
        }
    }
    Ok(())
}

async fn run_modal(
    handler: &Handler,
    ctx: &Context,
    interaction: &ModalInteraction,
    cmd: Command,
) -> Result<(), AppError> {
    let guild_id = interaction.guild_id.ok_or_else(|| {
        AppError::BadRequest("This only works inside a server.".to_string())
    })?;
    let user_id = interaction.user.id;
    let db = &handler.db;
    let config = &handler.config;

    match cmd {
        Command::UserLimitSubmit(value) => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let user_limit = reconciler::parse_user_limit(&value)?;
            reconciler::set_user_limit(ctx, channel.id, user_limit).await?;
            ephemeral_modal(
                ctx,
                interaction,
                &format!("User limit set to {}.", ui::user_limit_text(Some(user_limit))),
            )
            .await?;
        }
        Command::BitrateSubmit(value) => {
            let channel =
                access::connected_editable_channel(ctx, db, config, guild_id, user_id, false)
                    .await?;
            let bitrate = reconciler::parse_bitrate(&value)?;
            reconciler::set_bitrate(ctx, channel.id, bitrate).await?;
            ephemeral_modal(
                ctx,
                interaction,
                &format!("Bitrate set to {}kbps.", bitrate / 1000),
            )
            .await?;
        }
        _ => {}
    }
    Ok(())
}

/// Resolves the managed channel a request-card button belongs to, requiring
/// the acting user to be its stored session owner.
async fn owned_card_channel(
    handler: &Handler,
    ctx: &Context,
    user_id: UserId,
    channel_id: ChannelId,
) -> Result<GuildChannel, AppError> {
    if !handler.config.is_managed(channel_id) {
        return Err(AppError::BadRequest(
            "This card does not belong to a custom VC.".to_string(),
        ));
    }
    let room = RoomRepository::new(&handler.db)
        .find_by_channel_id(channel_id.get())
        .await?
        .ok_or_else(|| AppError::NotFound("This channel has no active session.".to_string()))?;
    if room.owner_id != Some(user_id.get()) {
        return Err(AppError::Unauthorized(
            "Only the channel owner can handle join requests.".to_string(),
        ));
    }
    channel_id
        .to_channel(ctx)
        .await?
        .guild()
        .ok_or_else(|| AppError::NotFound("The channel no longer exists.".to_string()))
}

fn take_targets(
    handler: &Handler,
    interaction: &ComponentInteraction,
    user_id: UserId,
) -> Result<Vec<UserId>, AppError> {
    let targets = handler
        .selections
        .take(interaction.message.id, user_id)
        .ok_or_else(|| {
            AppError::BadRequest("Select members with the picker above first.".to_string())
        })?;
    // The owner never moderates themselves.
    Ok(targets.into_iter().filter(|id| *id != user_id).collect())
}

fn block_summary(outcome: &BlockOutcome) -> String {
    let mentions = |ids: &[UserId]| {
        ids.iter()
            .map(|id| format!("<@{id}>"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mut lines = Vec::new();
    if !outcome.blocked.is_empty() {
        lines.push(format!("Blocked: {}", mentions(&outcome.blocked)));
    }
    if !outcome.already_blocked.is_empty() {
        lines.push(format!(
            "Already blocked: {}",
            mentions(&outcome.already_blocked)
        ));
    }
    if !outcome.privileged.is_empty() {
        lines.push(format!(
            "Cannot block (moderators): {}",
            mentions(&outcome.privileged)
        ));
    }
    if lines.is_empty() {
        lines.push("No one was blocked.".to_string());
    }
    lines.join("\n")
}

async fn ephemeral(
    ctx: &Context,
    interaction: &ComponentInteraction,
    content: &str,
) -> Result<(), AppError> {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

async fn ephemeral_modal(
    ctx: &Context,
    interaction: &ModalInteraction,
    content: &str,
) -> Result<(), AppError> {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}
