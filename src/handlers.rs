pub mod assignments;
pub mod dashboard;
pub mod events;
pub mod reference;
pub mod reports;
pub mod stock;
