// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Reference ---
        handlers::reference::get_reference_data,
        handlers::reference::list_suppliers,

        // --- Assignments ---
        handlers::assignments::get_active_assignments,
        handlers::assignments::assign_seller,

        // --- Stock ---
        handlers::stock::record_delivery,
        handlers::stock::record_allocation,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,
        handlers::dashboard::get_upcoming,

        // --- Reports ---
        handlers::reports::confirm_payment,
        handlers::reports::list_payments,
        handlers::reports::record_audit,
        handlers::reports::list_audits,

        // --- Events ---
        handlers::events::schedule_event,
        handlers::events::list_events,
    ),
    components(
        schemas(
            // --- Reference ---
            models::reference::Joint,
            models::reference::Seller,
            models::reference::Supplier,
            models::reference::ReferenceData,

            // --- Assignments ---
            models::assignments::SellerAssignment,
            models::assignments::AssignedSeller,

            // --- Ledger ---
            models::ledger::Delivery,
            models::ledger::Allocation,
            models::ledger::Payment,
            models::ledger::Audit,
            models::ledger::PaymentReportEntry,

            // --- Dashboard ---
            models::dashboard::DashboardMetrics,
            models::dashboard::ActivityKind,
            models::dashboard::ActivityEntry,

            // --- Events ---
            models::events::EventStatus,
            models::events::ScheduledEvent,
            models::events::EventPricing,
            models::events::EventWithPricing,

            // --- Payloads ---
            handlers::assignments::AssignSellerPayload,
            handlers::stock::RecordDeliveryPayload,
            handlers::stock::RecordAllocationPayload,
            handlers::reports::ConfirmPaymentPayload,
            handlers::reports::RecordAuditPayload,
            handlers::events::EventDetailsPayload,
            handlers::events::EventPricingPayload,
            handlers::events::ScheduleEventPayload,
        )
    ),
    tags(
        (name = "Reference", description = "Joints, sellers and suppliers"),
        (name = "Assignments", description = "Seller-to-joint authorization windows"),
        (name = "Stock", description = "Deliveries and seller allocations"),
        (name = "Dashboard", description = "Windowed metrics and upcoming events"),
        (name = "Reports", description = "Payments and count audits"),
        (name = "Events", description = "Scheduled customer events and pricing")
    )
)]
pub struct ApiDoc;
