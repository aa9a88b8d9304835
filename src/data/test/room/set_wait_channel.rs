use super::*;

/// Tests pairing a waiting room with a channel that has no row yet.
///
/// Expected: row created with the pairing stored
#[tokio::test]
async fn inserts_row_with_pairing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoomRepository::new(db);
    let room = repo.set_wait_channel(1000, Some(1001)).await?;

    assert_eq!(room.channel_id, 1000);
    assert_eq!(room.wait_channel_id, Some(1001));

    Ok(())
}

/// Tests that pairing updates leave the owner and approval facts alone.
///
/// Expected: wait_channel_id updated, owner and approval preserved
#[tokio::test]
async fn pairing_update_keeps_session_facts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::room::RoomFactory::new(db)
        .channel_id(1000)
        .owner_id(Some(2000))
        .approval(true)
        .build()
        .await?;

    let repo = RoomRepository::new(db);
    let room = repo.set_wait_channel(1000, Some(1001)).await?;

    assert_eq!(room.wait_channel_id, Some(1001));
    assert_eq!(room.owner_id, Some(2000));
    assert!(room.approval);

    Ok(())
}

/// Tests clearing the pairing when the waiting room is deleted.
///
/// Expected: wait_channel_id cleared, row still present
#[tokio::test]
async fn clears_pairing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::room::RoomFactory::new(db)
        .channel_id(1000)
        .wait_channel_id(Some(1001))
        .build()
        .await?;

    let repo = RoomRepository::new(db);
    let room = repo.set_wait_channel(1000, None).await?;

    assert_eq!(room.wait_channel_id, None);
    let count = entity::prelude::RoomList::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
