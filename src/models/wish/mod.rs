pub mod message_view;
pub mod wish_row;
