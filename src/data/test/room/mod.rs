use crate::data::room::RoomRepository;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod find;
mod set_session;
mod set_wait_channel;
