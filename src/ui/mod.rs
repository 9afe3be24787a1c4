pub mod draw;
pub mod events;
