//! Typed commands parsed from component and modal interactions.
//!
//! Custom ids arrive as strings; everything downstream works on this closed
//! enum instead. Unknown ids parse to `None` and are ignored, so a stale
//! panel message from an older build cannot reach the dispatcher with
//! unexpected input.

use serenity::all::{
    ActionRowComponent, ComponentInteraction, ComponentInteractionDataKind, ModalInteraction,
    UserId,
};

use crate::bot::ui::custom_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenUserLimitModal,
    OpenBitrateModal,
    UserLimitSubmit(String),
    BitrateSubmit(String),
    TransferOwnership(UserId),
    BlockUsers(Vec<UserId>),
    UnblockUsers(Vec<UserId>),
    ShowBlockList,
    ToggleApproval,
    ApproveRequest,
    RejectRequest { block: bool },
    SelectTargets(Vec<UserId>),
    KickSelected,
    MuteSelected,
    UnmuteSelected,
}

/// Parses a component interaction into a command, or `None` when the id or
/// payload shape is not one of ours.
pub fn parse_component(interaction: &ComponentInteraction) -> Option<Command> {
    let data = &interaction.data;
    match (data.custom_id.as_str(), &data.kind) {
        (custom_id::OPERATION_MENU, ComponentInteractionDataKind::StringSelect { values }) => {
            match values.first()?.as_str() {
                custom_id::OPERATION_USER_LIMIT => Some(Command::OpenUserLimitModal),
                custom_id::OPERATION_BITRATE => Some(Command::OpenBitrateModal),
                _ => None,
            }
        }
        (custom_id::TRANSFER_OWNERSHIP, ComponentInteractionDataKind::UserSelect { values }) => {
            values.first().copied().map(Command::TransferOwnership)
        }
        (custom_id::BLOCK_USERS, ComponentInteractionDataKind::UserSelect { values }) => {
            Some(Command::BlockUsers(values.clone()))
        }
        (custom_id::UNBLOCK_USERS, ComponentInteractionDataKind::UserSelect { values }) => {
            Some(Command::UnblockUsers(values.clone()))
        }
        (custom_id::SELECT_TARGETS, ComponentInteractionDataKind::UserSelect { values }) => {
            Some(Command::SelectTargets(values.clone()))
        }
        (custom_id::SHOW_BLOCK_LIST, ComponentInteractionDataKind::Button) => {
            Some(Command::ShowBlockList)
        }
        (custom_id::TOGGLE_APPROVAL, ComponentInteractionDataKind::Button) => {
            Some(Command::ToggleApproval)
        }
        (custom_id::REQUEST_APPROVE, ComponentInteractionDataKind::Button) => {
            Some(Command::ApproveRequest)
        }
        (custom_id::REQUEST_REJECT, ComponentInteractionDataKind::Button) => {
            Some(Command::RejectRequest { block: false })
        }
        (custom_id::REQUEST_BLOCK, ComponentInteractionDataKind::Button) => {
            Some(Command::RejectRequest { block: true })
        }
        (custom_id::KICK_SELECTED, ComponentInteractionDataKind::Button) => {
            Some(Command::KickSelected)
        }
        (custom_id::MUTE_SELECTED, ComponentInteractionDataKind::Button) => {
            Some(Command::MuteSelected)
        }
        (custom_id::UNMUTE_SELECTED, ComponentInteractionDataKind::Button) => {
            Some(Command::UnmuteSelected)
        }
        _ => None,
    }
}

/// Parses a modal submission into a command.
pub fn parse_modal(interaction: &ModalInteraction) -> Option<Command> {
    match interaction.data.custom_id.as_str() {
        custom_id::USER_LIMIT_MODAL => Some(Command::UserLimitSubmit(input_value(
            interaction,
            custom_id::USER_LIMIT_INPUT,
        )?)),
        custom_id::BITRATE_MODAL => Some(Command::BitrateSubmit(input_value(
            interaction,
            custom_id::BITRATE_INPUT,
        )?)),
        _ => None,
    }
}

fn input_value(interaction: &ModalInteraction, input_id: &str) -> Option<String> {
    interaction
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == input_id => {
                input.value.clone()
            }
            _ => None,
        })
}
