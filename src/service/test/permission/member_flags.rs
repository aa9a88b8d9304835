use super::*;

/// Connect allows and speak denies on member entries survive a snapshot;
/// role entries and everything else are ignored.
#[test]
fn collects_grants_from_snapshot() {
    let approved = UserId::new(1);
    let muted = UserId::new(2);
    let snapshot = vec![
        PermissionOverwrite {
            allow: APPROVED_ALLOW,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(approved),
        },
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: MUTED_DENY,
            kind: PermissionOverwriteType::Member(muted),
        },
        PermissionOverwrite {
            allow: Permissions::CONNECT,
            deny: Permissions::SPEAK,
            kind: PermissionOverwriteType::Role(EVERYONE),
        },
    ];

    let flags = collect_member_flags(&snapshot);

    assert_eq!(flags.approved, vec![approved]);
    assert_eq!(flags.muted, vec![muted]);
}

/// Grants survive a full recompute: flags collected from a computed set
/// match the facts it was computed from.
#[test]
fn grants_survive_recompute() {
    let approved = UserId::new(3);
    let muted = UserId::new(4);
    let mut facts = base_facts();
    facts.approved = vec![approved];
    facts.muted = vec![muted];

    let overwrites = compute_overwrites(&facts);
    let flags = collect_member_flags(&overwrites);

    assert_eq!(flags.approved, vec![approved]);
    assert_eq!(flags.muted, vec![muted]);
}

/// Changes fold into the preserved grants without duplicating entries.
#[test]
fn apply_changes_adds_and_removes() {
    let user = UserId::new(1);
    let mut flags = MemberFlags::default();

    apply_member_changes(&mut flags, &[MemberChange::approve(user, true)]);
    apply_member_changes(&mut flags, &[MemberChange::approve(user, true)]);
    assert_eq!(flags.approved, vec![user]);

    apply_member_changes(&mut flags, &[MemberChange::approve(user, false)]);
    assert!(flags.approved.is_empty());

    apply_member_changes(&mut flags, &[MemberChange::mute(user, true)]);
    assert_eq!(flags.muted, vec![user]);
    apply_member_changes(&mut flags, &[MemberChange::mute(user, false)]);
    assert!(flags.muted.is_empty());
}

/// Category inheritance keeps only entries that cover the bot itself.
#[test]
fn filter_inherited_keeps_bot_subjects() {
    let bot_user = UserId::new(10);
    let bot_role = RoleId::new(20);
    let category = vec![
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_user),
        },
        PermissionOverwrite {
            allow: Permissions::CONNECT,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(bot_role),
        },
        PermissionOverwrite {
            allow: Permissions::CONNECT,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(UserId::new(99)),
        },
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::CONNECT,
            kind: PermissionOverwriteType::Role(RoleId::new(99)),
        },
    ];

    let inherited = filter_inherited(&category, bot_user, &[bot_role]);

    assert_eq!(inherited.len(), 2);
    assert!(entry_for(&inherited, PermissionOverwriteType::Member(bot_user)).is_some());
    assert!(entry_for(&inherited, PermissionOverwriteType::Role(bot_role)).is_some());
}

/// The owner entry's connect allow belongs to the derived owner grant, not
/// to an approval: after the owner is cleared with approval mode on, the
/// ex-owner must not keep a gate pass.
#[test]
fn owner_grant_is_not_collected_as_approval() {
    let owner = UserId::new(42);
    let mut facts = base_facts();
    facts.owner = Some(owner);
    facts.approval = true;

    let snapshot = compute_overwrites(&facts);
    let flags = collect_member_flags(&snapshot);
    assert!(flags.approved.is_empty());

    facts.owner = None;
    facts.approved = flags.approved;
    facts.muted = flags.muted;
    let recomputed = compute_overwrites(&facts);
    assert!(entry_for(&recomputed, PermissionOverwriteType::Member(owner)).is_none());
}

/// Only blocked users that are actually connected need a voice kick.
#[test]
fn blocked_and_connected_intersection() {
    let blocked = [UserId::new(1), UserId::new(2)];
    let connected = [UserId::new(2), UserId::new(3)];

    assert_eq!(
        blocked_and_connected(&blocked, &connected),
        vec![UserId::new(2)]
    );
    assert!(blocked_and_connected(&blocked, &[]).is_empty());
}
