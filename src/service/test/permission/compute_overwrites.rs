use super::*;

/// The owner gets exactly one member entry carrying the full owner grant.
#[test]
fn owner_gets_single_grant() {
    let owner = UserId::new(1);
    let mut facts = base_facts();
    facts.owner = Some(owner);

    let overwrites = compute_overwrites(&facts);

    assert_eq!(overwrites.len(), 1);
    let entry = entry_for(&overwrites, PermissionOverwriteType::Member(owner)).unwrap();
    assert_eq!(entry.allow, OWNER_ALLOW);
    assert!(entry.deny.is_empty());
}

/// Blocked users are denied visibility; the owner never appears in the deny
/// set even when listed as blocked.
#[test]
fn blocked_users_are_hidden_but_never_the_owner() {
    let owner = UserId::new(1);
    let blocked = UserId::new(2);
    let mut facts = base_facts();
    facts.owner = Some(owner);
    facts.blocked = vec![blocked, owner];

    let overwrites = compute_overwrites(&facts);

    let entry = entry_for(&overwrites, PermissionOverwriteType::Member(blocked)).unwrap();
    assert_eq!(entry.deny, BLOCKED_DENY);

    let owner_entry = entry_for(&overwrites, PermissionOverwriteType::Member(owner)).unwrap();
    assert!(owner_entry.deny.is_empty());
}

/// A user both approved and blocked ends up denied: deny wins over allow for
/// the same subject.
#[test]
fn deny_wins_over_allow_for_same_subject() {
    let user = UserId::new(2);
    let mut facts = base_facts();
    facts.owner = Some(UserId::new(1));
    facts.approved = vec![user];
    facts.blocked = vec![user];

    let overwrites = compute_overwrites(&facts);

    let entry = entry_for(&overwrites, PermissionOverwriteType::Member(user)).unwrap();
    assert_eq!(entry.deny, BLOCKED_DENY);
    assert!(entry.allow.is_empty());
}

/// Approval mode denies connect to everyone; turning it off removes the
/// entry entirely.
#[test]
fn approval_mode_gates_everyone() {
    let mut facts = base_facts();
    facts.approval = true;

    let overwrites = compute_overwrites(&facts);
    let entry = entry_for(&overwrites, PermissionOverwriteType::Role(EVERYONE)).unwrap();
    assert_eq!(entry.deny, APPROVAL_EVERYONE_DENY);

    facts.approval = false;
    let overwrites = compute_overwrites(&facts);
    assert!(entry_for(&overwrites, PermissionOverwriteType::Role(EVERYONE)).is_none());
}

/// Approved members keep their connect grant while approval mode is on.
#[test]
fn approved_members_can_connect() {
    let approved = UserId::new(3);
    let mut facts = base_facts();
    facts.approval = true;
    facts.approved = vec![approved];

    let overwrites = compute_overwrites(&facts);

    let entry = entry_for(&overwrites, PermissionOverwriteType::Member(approved)).unwrap();
    assert_eq!(entry.allow, APPROVED_ALLOW);
}

/// Inherited category overwrites are merged into the result instead of being
/// dropped or duplicated.
#[test]
fn inherited_overwrites_are_merged() {
    let bot_role = RoleId::new(600);
    let mut facts = base_facts();
    facts.inherited = vec![PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL | Permissions::CONNECT,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(bot_role),
    }];
    facts.approval = true;

    let overwrites = compute_overwrites(&facts);

    let entry = entry_for(&overwrites, PermissionOverwriteType::Role(bot_role)).unwrap();
    assert!(entry.allow.contains(Permissions::CONNECT));
    assert_eq!(overwrites.len(), 2);
}

/// The computation is a pure function: same facts, same result, and role
/// entries always sort before member entries.
#[test]
fn deterministic_and_sorted() {
    let mut facts = base_facts();
    facts.owner = Some(UserId::new(9));
    facts.approval = true;
    facts.blocked = vec![UserId::new(4), UserId::new(2)];
    facts.muted = vec![UserId::new(7)];

    let first = compute_overwrites(&facts);
    let second = compute_overwrites(&facts);
    assert_eq!(first, second);

    let role_count = first
        .iter()
        .take_while(|o| matches!(o.kind, PermissionOverwriteType::Role(_)))
        .count();
    assert!(first
        .iter()
        .skip(role_count)
        .all(|o| matches!(o.kind, PermissionOverwriteType::Member(_))));
}

/// Muted members lose speak but keep whatever else they had.
#[test]
fn muted_members_lose_speak() {
    let muted = UserId::new(5);
    let mut facts = base_facts();
    facts.approved = vec![muted];
    facts.muted = vec![muted];

    let overwrites = compute_overwrites(&facts);

    let entry = entry_for(&overwrites, PermissionOverwriteType::Member(muted)).unwrap();
    assert!(entry.deny.contains(Permissions::SPEAK));
    assert!(entry.allow.contains(Permissions::CONNECT));
}
