pub mod layout;
pub mod status_card;

pub use status_card::{StatusCard, StatusCardView, select_card};
