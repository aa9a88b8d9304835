use super::*;

/// Tests finding a session row by managed channel id.
///
/// Expected: Ok(Some) with all fields parsed
#[tokio::test]
async fn finds_by_channel_id() -> Result<(), DbErr> {
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
    let room = repo.find_by_channel_id(1000).await?.unwrap();

    assert_eq!(room.channel_id, 1000);
    assert_eq!(room.wait_channel_id, Some(1001));
    assert_eq!(room.owner_id, Some(2000));
    assert!(room.approval);

    Ok(())
}

/// Tests finding a session row for an unknown channel.
///
/// Expected: Ok(None)
#[tokio::test]
async fn none_for_unknown_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoomRepository::new(db);
    assert!(repo.find_by_channel_id(9999).await?.is_none());

    Ok(())
}

/// Tests resolving the managed channel from its waiting room.
///
/// Expected: Ok(Some) for the paired channel, Ok(None) otherwise
#[tokio::test]
async fn finds_by_wait_channel_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::room::RoomFactory::new(db)
        .channel_id(1000)
        .wait_channel_id(Some(1001))
        .approval(true)
        .build()
        .await?;

    let repo = RoomRepository::new(db);
    let room = repo.find_by_wait_channel_id(1001).await?.unwrap();
    assert_eq!(room.channel_id, 1000);

    assert!(repo.find_by_wait_channel_id(1000).await?.is_none());

    Ok(())
}

/// Tests the bulk lookup used by the control panel.
///
/// Expected: rows for seeded channels only, missing channels absent
#[tokio::test]
async fn finds_by_channel_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::room::RoomFactory::new(db)
        .channel_id(1000)
        .owner_id(Some(2000))
        .build()
        .await?;
    factory::room::RoomFactory::new(db).channel_id(1001).build().await?;

    let repo = RoomRepository::new(db);
    let rooms = repo.find_by_channel_ids(&[1000, 1001, 1002]).await?;

    assert_eq!(rooms.len(), 2);
    assert!(rooms.iter().any(|room| room.channel_id == 1000));
    assert!(rooms.iter().any(|room| room.channel_id == 1001));

    Ok(())
}
