pub mod assignment_service;
pub use assignment_service::AssignmentService;
pub mod ledger_service;
pub use ledger_service::LedgerService;
pub mod events_service;
pub use events_service::EventsService;
pub mod reference_service;
pub use reference_service::ReferenceService;
