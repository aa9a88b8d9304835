use super::*;

/// Tests that the first session write creates the row.
///
/// Expected: Ok with the returned row carrying the owner and approval facts
#[tokio::test]
async fn inserts_row_on_first_use() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoomRepository::new(db);
    let room = repo.set_session(1000, Some(2000), false).await?;

    assert_eq!(room.channel_id, 1000);
    assert_eq!(room.owner_id, Some(2000));
    assert!(!room.approval);

    let count = entity::prelude::RoomList::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that repeated session writes update the existing row.
///
/// Expected: single row, latest owner and approval facts stored
#[tokio::test]
async fn upserts_existing_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoomRepository::new(db);
    repo.set_session(1000, Some(2000), false).await?;
    let room = repo.set_session(1000, Some(2001), true).await?;

    assert_eq!(room.owner_id, Some(2001));
    assert!(room.approval);

    let count = entity::prelude::RoomList::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that ending a session clears the owner without touching the
/// waiting-room pairing.
///
/// Expected: owner cleared, wait_channel_id preserved
#[tokio::test]
async fn clearing_owner_keeps_wait_pairing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::room::RoomFactory::new(db)
        .channel_id(1000)
        .wait_channel_id(Some(1001))
        .owner_id(Some(2000))
        .approval(true)
        .build()
        .await?;

    let repo = RoomRepository::new(db);
    let room = repo.set_session(1000, None, true).await?;

    assert_eq!(room.owner_id, None);
    assert_eq!(room.wait_channel_id, Some(1001));
    assert!(room.approval);

    Ok(())
}
