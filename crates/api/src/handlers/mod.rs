pub mod listing_wizard;
pub mod listings;
