use super::*;

/// Tests listing an owner's block entries.
///
/// Expected: only that owner's entries, ids parsed to u64
#[tokio::test]
async fn lists_only_owner_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::black_list::create_block_entry_for(db, 1000, 2000).await?;
    factory::black_list::create_block_entry_for(db, 1000, 2001).await?;
    factory::black_list::create_block_entry_for(db, 1001, 2002).await?;

    let repo = BlackListRepository::new(db);
    let blocked = repo.list_by_owner(1000).await?;

    assert_eq!(blocked.len(), 2);
    assert!(blocked.iter().all(|entry| entry.owner_id == 1000));
    let targets: Vec<u64> = blocked.iter().map(|entry| entry.blocked_user_id).collect();
    assert!(targets.contains(&2000));
    assert!(targets.contains(&2001));

    Ok(())
}

/// Tests listing for an owner with no entries.
///
/// Expected: Ok with an empty vector
#[tokio::test]
async fn empty_for_unknown_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlackListRepository::new(db);
    assert!(repo.list_by_owner(4242).await?.is_empty());

    Ok(())
}
