//! Pure permission-overwrite computation.
//!
//! Everything in this module is a pure function from channel facts to the
//! complete overwrite set (or to derived lists such as "blocked members that
//! are still connected"). The remote API is never touched here; the
//! [`Reconciler`](crate::service::reconciler::Reconciler) gathers the facts,
//! calls into this module, and applies the result in a single channel edit.
//! Reconciliation is therefore convergent: the full set is recomputed from
//! scratch each time and the last writer wins.

use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId};

/// Permissions granted to the session owner. `PRIORITY_SPEAKER` doubles as
/// the visible ownership marker on the channel; the stored `Room.owner_id`
/// fact is the source of truth and this grant is derived from it.
pub const OWNER_ALLOW: Permissions = Permissions::from_bits_truncate(
    Permissions::VIEW_CHANNEL.bits()
        | Permissions::CONNECT.bits()
        | Permissions::PRIORITY_SPEAKER.bits(),
);

/// Permissions denied to blocked users: they cannot see the channel or
/// connect, even if a stale approval grant is still on the snapshot.
pub const BLOCKED_DENY: Permissions = Permissions::from_bits_truncate(
    Permissions::VIEW_CHANNEL.bits() | Permissions::CONNECT.bits(),
);

/// Permission granted to users approved while approval mode is on.
pub const APPROVED_ALLOW: Permissions = Permissions::CONNECT;

/// Permission denied to muted users.
pub const MUTED_DENY: Permissions = Permissions::SPEAK;

/// Denied to `@everyone` on the managed channel while approval mode is on.
pub const APPROVAL_EVERYONE_DENY: Permissions = Permissions::CONNECT;

/// Denied to `@everyone` on the waiting-room channel: members can join and
/// wait, but not speak or chat there.
pub const WAIT_EVERYONE_DENY: Permissions =
    Permissions::from_bits_truncate(Permissions::SPEAK.bits() | Permissions::SEND_MESSAGES.bits());

/// Complete set of facts a managed channel's overwrites are derived from.
#[derive(Debug, Clone)]
pub struct ChannelFacts {
    /// The guild's `@everyone` role (its id equals the guild id).
    pub everyone_role: RoleId,
    /// Current session owner, if any.
    pub owner: Option<UserId>,
    /// Whether approval-gated entry is on.
    pub approval: bool,
    /// Users blocked by the owner.
    pub blocked: Vec<UserId>,
    /// Users holding an explicit connect grant (approved while approval mode
    /// is on; persists across reconciliations until revoked).
    pub approved: Vec<UserId>,
    /// Users muted by the owner.
    pub muted: Vec<UserId>,
    /// Overwrites inherited from the parent category, already filtered to
    /// subjects relevant to the bot itself.
    pub inherited: Vec<PermissionOverwrite>,
}

/// Per-member grants carried over from an existing overwrite snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFlags {
    pub approved: Vec<UserId>,
    pub muted: Vec<UserId>,
}

/// A requested change to one member's session grants. `None` leaves the
/// corresponding flag as it currently stands.
#[derive(Debug, Clone, Copy)]
pub struct MemberChange {
    pub user_id: UserId,
    pub approve: Option<bool>,
    pub mute: Option<bool>,
}

impl MemberChange {
    pub fn approve(user_id: UserId, approve: bool) -> Self {
        Self {
            user_id,
            approve: Some(approve),
            mute: None,
        }
    }

    pub fn mute(user_id: UserId, mute: bool) -> Self {
        Self {
            user_id,
            approve: None,
            mute: Some(mute),
        }
    }
}

/// Computes the complete overwrite set for a managed channel.
///
/// Composition order: inherited category overwrites, the `@everyone`
/// connect-deny (approval mode only), approved and muted member grants, the
/// owner grant, and finally the blocked-user denies. Entries for the same
/// subject are merged rather than duplicated, and a deny always beats a
/// conflicting allow for the same subject, so a blocked user who was
/// previously approved ends up hidden rather than connectable.
///
/// The result is deterministic for given facts; applying it twice in a row
/// yields the same set (see the idempotence tests).
pub fn compute_overwrites(facts: &ChannelFacts) -> Vec<PermissionOverwrite> {
    let mut merged: Vec<PermissionOverwrite> = Vec::new();

    for inherited in &facts.inherited {
        merge(&mut merged, inherited.kind, inherited.allow, inherited.deny);
    }

    if facts.approval {
        merge(
            &mut merged,
            PermissionOverwriteType::Role(facts.everyone_role),
            Permissions::empty(),
            APPROVAL_EVERYONE_DENY,
        );
    }

    for user_id in &facts.approved {
        merge(
            &mut merged,
            PermissionOverwriteType::Member(*user_id),
            APPROVED_ALLOW,
            Permissions::empty(),
        );
    }

    for user_id in &facts.muted {
        merge(
            &mut merged,
            PermissionOverwriteType::Member(*user_id),
            Permissions::empty(),
            MUTED_DENY,
        );
    }

    if let Some(owner) = facts.owner {
        merge(
            &mut merged,
            PermissionOverwriteType::Member(owner),
            OWNER_ALLOW,
            Permissions::empty(),
        );
    }

    for user_id in &facts.blocked {
        // The owner cannot appear in their own block-list; skip defensively
        // so the single-owner grant never carries a view deny.
        if facts.owner == Some(*user_id) {
            continue;
        }
        merge(
            &mut merged,
            PermissionOverwriteType::Member(*user_id),
            Permissions::empty(),
            BLOCKED_DENY,
        );
    }

    // Deny wins over allow for the same subject.
    for overwrite in &mut merged {
        overwrite.allow &= !overwrite.deny;
    }

    merged.retain(|o| !o.allow.is_empty() || !o.deny.is_empty());
    merged.sort_by_key(|o| subject_key(&o.kind));
    merged
}

/// Extracts the member grants worth preserving from an existing overwrite
/// snapshot: explicit connect allows (approvals) and speak denies (mutes).
///
/// Everything else about the snapshot is recomputed from facts, so a stale
/// owner grant or blocked-user deny never leaks through a transfer.
pub fn collect_member_flags(existing: &[PermissionOverwrite]) -> MemberFlags {
    let mut flags = MemberFlags::default();
    for overwrite in existing {
        let PermissionOverwriteType::Member(user_id) = overwrite.kind else {
            continue;
        };
        // The owner entry carries PRIORITY_SPEAKER; its connect allow is
        // derived from the stored owner fact, not an approval.
        if overwrite.allow.contains(Permissions::PRIORITY_SPEAKER) {
            continue;
        }
        if overwrite.allow.contains(Permissions::CONNECT) {
            flags.approved.push(user_id);
        }
        if overwrite.deny.contains(Permissions::SPEAK) {
            flags.muted.push(user_id);
        }
    }
    flags
}

/// Folds requested member changes into the preserved grants.
pub fn apply_member_changes(flags: &mut MemberFlags, changes: &[MemberChange]) {
    for change in changes {
        match change.approve {
            Some(true) => {
                if !flags.approved.contains(&change.user_id) {
                    flags.approved.push(change.user_id);
                }
            }
            Some(false) => flags.approved.retain(|id| *id != change.user_id),
            None => {}
        }
        match change.mute {
            Some(true) => {
                if !flags.muted.contains(&change.user_id) {
                    flags.muted.push(change.user_id);
                }
            }
            Some(false) => flags.muted.retain(|id| *id != change.user_id),
            None => {}
        }
    }
}

/// Restricts a parent category's overwrites to subjects that cover the bot
/// itself, so the bot keeps access to the channel it just configured without
/// inheriting unrelated grants.
pub fn filter_inherited(
    category_overwrites: &[PermissionOverwrite],
    bot_user: UserId,
    bot_roles: &[RoleId],
) -> Vec<PermissionOverwrite> {
    category_overwrites
        .iter()
        .filter(|overwrite| match overwrite.kind {
            PermissionOverwriteType::Member(user_id) => user_id == bot_user,
            PermissionOverwriteType::Role(role_id) => bot_roles.contains(&role_id),
            _ => false,
        })
        .cloned()
        .collect()
}

/// Blocked users that are currently connected and must be voice-kicked once
/// the overwrite write has landed.
pub fn blocked_and_connected(blocked: &[UserId], connected: &[UserId]) -> Vec<UserId> {
    connected
        .iter()
        .filter(|user_id| blocked.contains(user_id))
        .copied()
        .collect()
}

/// Overwrite entries denying channel visibility to each blocked user, used
/// when composing the waiting-room channel's permissions.
pub fn blocked_overwrites(blocked: &[UserId]) -> Vec<PermissionOverwrite> {
    blocked
        .iter()
        .map(|user_id| PermissionOverwrite {
            allow: Permissions::empty(),
            deny: BLOCKED_DENY,
            kind: PermissionOverwriteType::Member(*user_id),
        })
        .collect()
}

fn merge(
    merged: &mut Vec<PermissionOverwrite>,
    kind: PermissionOverwriteType,
    allow: Permissions,
    deny: Permissions,
) {
    if let Some(existing) = merged.iter_mut().find(|o| o.kind == kind) {
        existing.allow |= allow;
        existing.deny |= deny;
    } else {
        merged.push(PermissionOverwrite { allow, deny, kind });
    }
}

fn subject_key(kind: &PermissionOverwriteType) -> (u8, u64) {
    match kind {
        PermissionOverwriteType::Role(role_id) => (0, role_id.get()),
        PermissionOverwriteType::Member(user_id) => (1, user_id.get()),
        _ => (2, 0),
    }
}
