pub mod autocomplete;
pub mod listing;
pub mod reports;
