use super::*;

/// Tests adding a new block-list pair.
///
/// Expected: Ok(true) with the row persisted
#[tokio::test]
async fn creates_pair() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlackListRepository::new(db);
    let created = repo.add(1000, 2000).await?;

    assert!(created);
    let row = entity::prelude::BlackList::find()
        .filter(entity::black_list::Column::UserId.eq("1000"))
        .filter(entity::black_list::Column::BlockUserId.eq("2000"))
        .one(db)
        .await?;
    assert!(row.is_some());

    Ok(())
}

/// Tests adding the same pair twice.
///
/// Expected: Ok(false) on the second add, only one row in the table
#[tokio::test]
async fn duplicate_pair_is_not_inserted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlackListRepository::new(db);
    assert!(repo.add(1000, 2000).await?);
    assert!(!repo.add(1000, 2000).await?);

    let count = entity::prelude::BlackList::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that the same blocked user can appear under different owners.
///
/// Expected: Ok(true) for each owner's pair
#[tokio::test]
async fn same_target_under_different_owners() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::BlackList)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlackListRepository::new(db);
    assert!(repo.add(1000, 2000).await?);
    assert!(repo.add(1001, 2000).await?);

    let count = entity::prelude::BlackList::find().count(db).await?;
    assert_eq!(count, 2);

    Ok(())
}
