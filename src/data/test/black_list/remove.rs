use super::*;

/// Tests removing an existing block-list pair.
///
/// Expected: Ok with the row gone, other rows untouched
#[tokio::test]
async fn removes_pair() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::black_list::create_block_entry_for(db, 1000, 2000).await?;
    factory::black_list::create_block_entry_for(db, 1000, 2001).await?;

    let repo = BlackListRepository::new(db);
    repo.remove(1000, 2000).await?;

    let remaining = repo.list_by_owner(1000).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].blocked_user_id, 2001);

    Ok(())
}

/// Tests removing a pair that does not exist.
///
/// Expected: Ok, table unchanged
#[tokio::test]
async fn missing_pair_is_a_no_op() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::black_list::create_block_entry_for(db, 1000, 2000).await?;

    let repo = BlackListRepository::new(db);
    repo.remove(1000, 9999).await?;

    let count = entity::prelude::BlackList::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that removal is scoped to the owner.
///
/// Expected: another owner's pair with the same target survives
#[tokio::test]
async fn removal_is_scoped_to_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::black_list::create_block_entry_for(db, 1000, 2000).await?;
    factory::black_list::create_block_entry_for(db, 1001, 2000).await?;

    let repo = BlackListRepository::new(db);
    repo.remove(1000, 2000).await?;

    assert!(repo.list_by_owner(1000).await?.is_empty());
    assert_eq!(repo.list_by_owner(1001).await?.len(), 1);

    Ok(())
}
