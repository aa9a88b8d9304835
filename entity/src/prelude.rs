pub use super::black_list::Entity as BlackList;
pub use super::room_list::Entity as RoomList;
