// src/services/assignment_service.rs
//
// The assignment resolver: answers "which sellers are authorized where,
// right now" from the history of assignment windows, and performs the
// close-then-insert reassignment.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AssignmentRepository, ReferenceRepository},
    models::assignments::{AssignedSeller, AssignmentCandidate},
};

#[derive(Clone)]
pub struct AssignmentService {
    repo: AssignmentRepository,
    reference_repo: ReferenceRepository,
}

impl AssignmentService {
    pub fn new(repo: AssignmentRepository, reference_repo: ReferenceRepository) -> Self {
        Self { repo, reference_repo }
    }

    /// Resolves the sellers currently authorized at `joint_id` (or at any
    /// joint when none is given) as of `as_of`, defaulting to now.
    ///
    /// Pure view over the snapshot: no side effects, safe to call repeatedly.
    /// The result is a *filtered view*, not a uniqueness guarantee — if the
    /// store ever holds two open rows for one seller, both are returned,
    /// newest start first.
    pub async fn resolve_active(
        &self,
        joint_id: Option<Uuid>,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<AssignedSeller>, AppError> {
        let as_of = as_of.unwrap_or_else(Utc::now);
        let candidates = self.repo.fetch_candidates(joint_id).await?;
        Ok(filter_bindings(candidates, as_of))
    }

    /// Moves a seller to a joint: closes any open assignment for the seller
    /// and opens a new one starting now. Both ids must resolve to active
    /// rows. The close+insert pair runs in one store transaction.
    pub async fn assign(
        &self,
        seller_id: Uuid,
        joint_id: Uuid,
        note: Option<&str>,
    ) -> Result<AssignedSeller, AppError> {
        let seller = self
            .reference_repo
            .find_active_seller(seller_id)
            .await?
            .ok_or(AppError::NotFound("seller"))?;
        let joint = self
            .reference_repo
            .find_active_joint(joint_id)
            .await?
            .ok_or(AppError::NotFound("joint"))?;

        let assignment = self
            .repo
            .reassign(seller_id, joint_id, note, Utc::now())
            .await?;

        tracing::info!(
            seller = %seller.name,
            joint = %joint.name,
            "seller reassigned"
        );

        Ok(AssignedSeller {
            assignment_id: assignment.id,
            seller_id,
            seller_name: seller.name,
            joint_id,
            joint_name: joint.name,
            start_at: assignment.start_at,
            end_at: assignment.end_at,
            note: assignment.note,
        })
    }
}

/// The resolver predicate over a snapshot of candidate rows:
/// `active = true`, `start_at <= as_of`, `end_at` absent or `> as_of`, and
/// both the seller and the joint still enabled. Ordered by `start_at`
/// descending so an erroneously double-assigned seller surfaces the newest
/// intent first.
fn filter_bindings(rows: Vec<AssignmentCandidate>, as_of: DateTime<Utc>) -> Vec<AssignedSeller> {
    let mut bindings: Vec<AssignedSeller> = rows
        .into_iter()
        .filter(|row| row.active)
        .filter(|row| row.start_at <= as_of)
        .filter(|row| row.end_at.is_none_or(|end| end > as_of))
        .filter(|row| row.seller_is_active && row.joint_is_active)
        .map(AssignedSeller::from)
        .collect();

    bindings.sort_by(|a, b| b.start_at.cmp(&a.start_at));
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    fn candidate(start_at: DateTime<Utc>, end_at: Option<DateTime<Utc>>) -> AssignmentCandidate {
        AssignmentCandidate {
            assignment_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            seller_name: "Ama".to_string(),
            seller_is_active: true,
            joint_id: Uuid::new_v4(),
            joint_name: "Osu Beach".to_string(),
            joint_is_active: true,
            active: true,
            start_at,
            end_at,
            note: None,
        }
    }

    #[test]
    fn open_ended_assignment_within_window_is_resolved() {
        let rows = vec![candidate(at(8), None)];
        let bindings = filter_bindings(rows, at(12));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn assignment_starting_later_is_excluded() {
        let rows = vec![candidate(at(14), None)];
        assert!(filter_bindings(rows, at(12)).is_empty());
    }

    #[test]
    fn assignment_starting_exactly_at_as_of_is_included() {
        let rows = vec![candidate(at(12), None)];
        assert_eq!(filter_bindings(rows, at(12)).len(), 1);
    }

    #[test]
    fn closed_assignment_is_excluded_after_its_end() {
        let rows = vec![candidate(at(8), Some(at(10)))];
        assert!(filter_bindings(rows, at(12)).is_empty());
    }

    #[test]
    fn assignment_ending_exactly_at_as_of_is_excluded() {
        // Window is [start_at, end_at): the boundary instant no longer counts.
        let rows = vec![candidate(at(8), Some(at(12)))];
        assert!(filter_bindings(rows, at(12)).is_empty());
    }

    #[test]
    fn closed_assignment_still_resolves_inside_its_window() {
        let rows = vec![candidate(at(8), Some(at(12)))];
        assert_eq!(filter_bindings(rows, at(10)).len(), 1);
    }

    #[test]
    fn inactive_flag_on_row_excludes_it() {
        let mut row = candidate(at(8), None);
        row.active = false;
        assert!(filter_bindings(vec![row], at(12)).is_empty());
    }

    #[test]
    fn disabled_seller_is_never_currently_assigned() {
        let mut row = candidate(at(8), None);
        row.seller_is_active = false;
        assert!(filter_bindings(vec![row], at(12)).is_empty());
    }

    #[test]
    fn disabled_joint_is_never_currently_assigned() {
        let mut row = candidate(at(8), None);
        row.joint_is_active = false;
        assert!(filter_bindings(vec![row], at(12)).is_empty());
    }

    #[test]
    fn double_assigned_seller_surfaces_newest_start_first() {
        let seller_id = Uuid::new_v4();
        let mut older = candidate(at(8), None);
        older.seller_id = seller_id;
        let mut newer = candidate(at(10), None);
        newer.seller_id = seller_id;

        let bindings = filter_bindings(vec![older, newer], at(12));
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].start_at, at(10));
        assert_eq!(bindings[1].start_at, at(8));
    }

    #[test]
    fn reassignment_history_resolves_to_the_latest_window_only() {
        // Seller moved from joint A to joint B: the A row was closed at the
        // moment the B row opened.
        let moved_at = at(10);
        let previous = candidate(at(8), Some(moved_at));
        let current = candidate(moved_at, None);
        let current_joint = current.joint_id;

        let bindings = filter_bindings(vec![previous, current], moved_at + Duration::hours(1));
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].joint_id, current_joint);
    }
}
