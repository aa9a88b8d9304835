use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId};

use crate::service::permission::*;

mod compute_overwrites;
mod member_flags;

const EVERYONE: RoleId = RoleId::new(500);

fn base_facts() -> ChannelFacts {
    ChannelFacts {
        everyone_role: EVERYONE,
        owner: None,
        approval: false,
        blocked: Vec::new(),
        approved: Vec::new(),
        muted: Vec::new(),
        inherited: Vec::new(),
    }
}

fn entry_for(
    overwrites: &[PermissionOverwrite],
    kind: PermissionOverwriteType,
) -> Option<&PermissionOverwrite> {
    overwrites.iter().find(|overwrite| overwrite.kind == kind)
}
