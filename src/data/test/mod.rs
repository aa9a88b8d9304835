mod black_list;
mod room;
