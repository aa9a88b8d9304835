//! Embeds, message components, and modals.
//!
//! All display construction lives here; the services hand over ids and facts
//! and get serenity builders back. Embed titles and the request-card footer
//! double as identity markers: session notices are later recognized in the
//! channel history by these strings, not by stored message ids.

use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateEmbedFooter, CreateInputText, CreateModal, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, InputTextStyle, UserId,
};

/// Component and modal custom ids. Parsed back in [`crate::bot::command`].
pub mod custom_id {
    pub const OPERATION_MENU: &str = "operation_menu";
    pub const OPERATION_USER_LIMIT: &str = "user_limit";
    pub const OPERATION_BITRATE: &str = "bitrate";
    pub const USER_LIMIT_MODAL: &str = "user_limit_modal";
    pub const USER_LIMIT_INPUT: &str = "user_limit_input";
    pub const BITRATE_MODAL: &str = "bitrate_modal";
    pub const BITRATE_INPUT: &str = "bitrate_input";
    pub const TRANSFER_OWNERSHIP: &str = "transfer_ownership";
    pub const BLOCK_USERS: &str = "block_users";
    pub const UNBLOCK_USERS: &str = "unblock_users";
    pub const SHOW_BLOCK_LIST: &str = "show_block_list";
    pub const TOGGLE_APPROVAL: &str = "toggle_approval";
    pub const REQUEST_APPROVE: &str = "request_approve";
    pub const REQUEST_REJECT: &str = "request_reject";
    pub const REQUEST_BLOCK: &str = "request_block";
    pub const SELECT_TARGETS: &str = "select_targets";
    pub const KICK_SELECTED: &str = "kick_selected";
    pub const MUTE_SELECTED: &str = "mute_selected";
    pub const UNMUTE_SELECTED: &str = "unmute_selected";
}

pub const WELCOME_TITLE: &str = "Custom VC session started";
pub const DISBAND_TITLE: &str = "Custom VC disbanded";
pub const NO_OWNER_TITLE: &str = "This custom VC has no owner";
pub const BOT_REMAIN_TITLE: &str = "Only the read-aloud bot is left";
pub const TRANSFER_TITLE: &str = "Ownership transferred";
pub const APPROVAL_TOGGLE_TITLE: &str = "Approval mode updated";
pub const BLOCK_LIST_TITLE: &str = "Blocked users";
pub const PANEL_TITLE: &str = "Custom VC control panel";

/// Footer marker identifying join-request cards in the channel history.
pub const REQUEST_CARD_FOOTER: &str =
    "(Tips) You can still kick an approved user with the Reject button.";

/// Name given to waiting-room channels.
pub const WAIT_CHANNEL_NAME: &str = "↓ Waiting Room";

/// Whether a message embed is one of our own session notices, judged by its
/// title or footer marker. Used by the disband cleanup heuristic.
pub fn is_session_notice(title: Option<&str>, footer: Option<&str>) -> bool {
    matches!(
        title,
        Some(WELCOME_TITLE)
            | Some(DISBAND_TITLE)
            | Some(NO_OWNER_TITLE)
            | Some(BOT_REMAIN_TITLE)
            | Some(TRANSFER_TITLE)
    ) || footer == Some(REQUEST_CARD_FOOTER)
}

/// Human-readable user limit.
pub fn user_limit_text(user_limit: Option<u32>) -> String {
    match user_limit {
        None | Some(0) => "unlimited".to_string(),
        Some(n) => format!("{n} users"),
    }
}

/// Welcome/settings notice posted when a session starts.
pub fn welcome_embed(color: u32, user_limit: Option<u32>, bitrate: Option<u32>) -> CreateEmbed {
    let bitrate_kbps = bitrate.unwrap_or(64_000) / 1000;
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(WELCOME_TITLE)
        .description(
            "You own this channel now. Use the control panel to change its settings, \
             or the picker below to moderate members.",
        )
        .field(
            "Current settings",
            format!(
                "User limit: {}\nBitrate: {bitrate_kbps}kbps",
                user_limit_text(user_limit)
            ),
            false,
        )
}

/// Notice posted when the last member leaves and the channel resets.
pub fn disband_embed(color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(DISBAND_TITLE)
        .description("Everyone left, so this channel can be used by anyone again.")
}

/// Notice posted when the owner leaves but other members remain.
pub fn no_owner_embed(color: u32, left_owner: UserId) -> CreateEmbed {
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(NO_OWNER_TITLE)
        .description(format!(
            "<@{left_owner}> left the channel. Permissions were reset; \
             pick a new owner with the transfer menu on the control panel."
        ))
}

/// Notice posted when only exempt read-aloud bots are left in the channel.
pub fn bot_remain_embed(color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(BOT_REMAIN_TITLE)
        .description("Disconnecting the read-aloud bot and resetting the channel.")
}

/// Notice posted in the channel after an ownership transfer.
pub fn transfer_embed(color: u32, new_owner: UserId) -> CreateEmbed {
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(TRANSFER_TITLE)
        .description(format!("<@{new_owner}> now owns this channel."))
}

/// Ephemeral reply confirming an approval-mode toggle.
pub fn toggle_approval_embed(color: u32, enabled: bool) -> CreateEmbed {
    let description = if enabled {
        "Approval mode is ON.\nJoining the \"↓ Waiting Room\" channel now sends a join request."
    } else {
        "Approval mode is OFF."
    };
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(APPROVAL_TOGGLE_TITLE)
        .description(description)
}

/// Ephemeral block-list listing for one owner.
pub fn block_list_embed(
    color: u32,
    owner_name: &str,
    owner_avatar_url: Option<String>,
    description: String,
) -> CreateEmbed {
    let mut author = CreateEmbedAuthor::new(owner_name);
    if let Some(url) = owner_avatar_url {
        author = author.icon_url(url);
    }
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(BLOCK_LIST_TITLE)
        .description(description)
        .author(author)
}

/// Join-request card posted in the managed channel while a member waits.
pub fn request_card_embed(color: u32, requester: UserId, done: bool) -> CreateEmbed {
    let (arrow, suffix) = if done {
        ("✅️", " (approved)")
    } else {
        ("➡️", "")
    };
    CreateEmbed::new()
        .colour(Colour::new(color))
        .description(format!(
            "{arrow} <@{requester}> is requesting to join{suffix}"
        ))
        .footer(CreateEmbedFooter::new(REQUEST_CARD_FOOTER))
}

/// Approve / reject / reject-and-block buttons on a join-request card.
pub fn request_card_buttons() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::REQUEST_APPROVE)
            .label("Approve")
            .style(ButtonStyle::Success),
        CreateButton::new(custom_id::REQUEST_REJECT)
            .label("Reject")
            .style(ButtonStyle::Primary),
        CreateButton::new(custom_id::REQUEST_BLOCK)
            .label("Block")
            .style(ButtonStyle::Secondary),
    ])
}

/// Control panel embed listing managed channels and their owners.
pub fn panel_embed(color: u32, lines: String) -> CreateEmbed {
    CreateEmbed::new()
        .colour(Colour::new(color))
        .title(PANEL_TITLE)
        .description(format!(
            "Join a custom VC and manage it from here.\n\n{lines}"
        ))
}

/// The five component rows of the control panel message.
pub fn panel_components() -> Vec<CreateActionRow> {
    vec![
        CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                custom_id::OPERATION_MENU,
                CreateSelectMenuKind::String {
                    options: vec![
                        CreateSelectMenuOption::new("User limit", custom_id::OPERATION_USER_LIMIT)
                            .description("Change the user limit (0-99)"),
                        CreateSelectMenuOption::new("Bitrate", custom_id::OPERATION_BITRATE)
                            .description("Change the bitrate (8-384 kbps)"),
                    ],
                },
            )
            .placeholder("Channel settings")
            .min_values(1)
            .max_values(1),
        ),
        CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                custom_id::TRANSFER_OWNERSHIP,
                CreateSelectMenuKind::User {
                    default_users: None,
                },
            )
            .placeholder("Transfer ownership to...")
            .min_values(1)
            .max_values(1),
        ),
        CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                custom_id::BLOCK_USERS,
                CreateSelectMenuKind::User {
                    default_users: None,
                },
            )
            .placeholder("Block users...")
            .min_values(1)
            .max_values(10),
        ),
        CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                custom_id::UNBLOCK_USERS,
                CreateSelectMenuKind::User {
                    default_users: None,
                },
            )
            .placeholder("Unblock users...")
            .min_values(1)
            .max_values(10),
        ),
        CreateActionRow::Buttons(vec![
            CreateButton::new(custom_id::SHOW_BLOCK_LIST)
                .label("Show block list")
                .style(ButtonStyle::Success),
            CreateButton::new(custom_id::TOGGLE_APPROVAL)
                .label("Toggle approval mode")
                .style(ButtonStyle::Primary),
        ]),
    ]
}

/// Moderation components attached to the welcome message: a target picker
/// whose selection is held in the selection store, consumed by the buttons.
pub fn welcome_components() -> Vec<CreateActionRow> {
    vec![
        CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                custom_id::SELECT_TARGETS,
                CreateSelectMenuKind::User {
                    default_users: None,
                },
            )
            .placeholder("Select members to moderate...")
            .min_values(1)
            .max_values(10),
        ),
        CreateActionRow::Buttons(vec![
            CreateButton::new(custom_id::KICK_SELECTED)
                .label("Kick")
                .style(ButtonStyle::Danger),
            CreateButton::new(custom_id::MUTE_SELECTED)
                .label("Mute")
                .style(ButtonStyle::Secondary),
            CreateButton::new(custom_id::UNMUTE_SELECTED)
                .label("Unmute")
                .style(ButtonStyle::Secondary),
        ]),
    ]
}

/// Modal asking for the new user limit.
pub fn user_limit_modal() -> CreateModal {
    CreateModal::new(custom_id::USER_LIMIT_MODAL, "Change user limit").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(
                InputTextStyle::Short,
                "New user limit",
                custom_id::USER_LIMIT_INPUT,
            )
            .placeholder("0-99 (0 means unlimited)")
            .min_length(1)
            .max_length(2)
            .required(true),
        ),
    ])
}

/// Modal asking for the new bitrate.
pub fn bitrate_modal() -> CreateModal {
    CreateModal::new(custom_id::BITRATE_MODAL, "Change bitrate").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(
                InputTextStyle::Short,
                "New bitrate in kbps",
                custom_id::BITRATE_INPUT,
            )
            .placeholder("8-384 (64 or higher recommended)")
            .min_length(1)
            .max_length(3)
            .required(true),
        ),
    ])
}
