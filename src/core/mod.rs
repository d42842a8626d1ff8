pub mod deal;
pub mod item;
pub mod party;
pub mod percentage;
