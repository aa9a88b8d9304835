use crate::data::black_list::BlackListRepository;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod list_by_owner;
mod remove;
