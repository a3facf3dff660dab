pub mod assignments;
pub mod dashboard;
pub mod events;
pub mod ledger;
pub mod reference;
