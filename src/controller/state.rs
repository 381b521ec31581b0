use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::user_message;
use crate::models::{
    ClientError, ControllerSnapshot, MovieId, Operation, RecommendationItem, SearchResultItem,
    TrackPhase,
};

/// Shared controller state
#[derive(Clone, Default)]
pub struct ControllerState {
    pub(crate) inner: Arc<RwLock<ControllerStateInner>>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Dispatch record for one request; only the latest ticket of a kind may
/// write that kind's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub operation: Operation,
    pub seq: u64,
    pub attempt: u64,
}

/// Inner state, only mutated by the controller
#[derive(Debug, Default)]
pub(crate) struct ControllerStateInner {
    pub query: String,
    pub search_results: Vec<SearchResultItem>,
    pub selected_id: Option<MovieId>,
    pub recommendations: Vec<RecommendationItem>,
    pub error: Option<ClientError>,
    pub search_phase: TrackPhase,
    pub recommend_phase: TrackPhase,
    search_seq: u64,
    recommend_seq: u64,
    attempt_seq: u64,
}

impl ControllerStateInner {
    /// Starts a new attempt: bumps the sequences, clears the error slot and
    /// marks the track in flight.
    pub fn begin(&mut self, operation: Operation) -> Ticket {
        self.attempt_seq += 1;
        let seq = match operation {
            Operation::Search => {
                self.search_seq += 1;
                self.search_phase = TrackPhase::InFlight;
                self.search_seq
            }
            Operation::Recommend => {
                self.recommend_seq += 1;
                self.recommend_phase = TrackPhase::InFlight;
                self.recommend_seq
            }
        };
        self.error = None;

        Ticket {
            operation,
            seq,
            attempt: self.attempt_seq,
        }
    }

    /// Whether `ticket` is still the latest dispatch of its kind
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        let latest = match ticket.operation {
            Operation::Search => self.search_seq,
            Operation::Recommend => self.recommend_seq,
        };
        ticket.seq == latest
    }

    /// Makes every outstanding search response stale
    pub fn invalidate_search(&mut self) {
        self.search_seq += 1;
        if self.search_phase == TrackPhase::InFlight {
            self.search_phase = TrackPhase::Idle;
        }
    }

    /// Makes every outstanding recommend response stale
    pub fn invalidate_recommend(&mut self) {
        self.recommend_seq += 1;
        if self.recommend_phase == TrackPhase::InFlight {
            self.recommend_phase = TrackPhase::Idle;
        }
    }

    /// Marks the track succeeded. The error slot is left alone: `begin`
    /// already cleared it for this attempt, so any error present now was
    /// written by a newer attempt.
    pub fn record_success(&mut self, ticket: &Ticket) {
        self.set_phase(ticket.operation, TrackPhase::Succeeded);
    }

    /// Marks the track failed; the error slot is only written when no newer
    /// attempt of either kind has started since.
    pub fn record_failure(&mut self, ticket: &Ticket) {
        self.set_phase(ticket.operation, TrackPhase::Failed);
        if ticket.attempt == self.attempt_seq {
            self.error = Some(ClientError {
                message: user_message(ticket.operation).to_string(),
                operation: ticket.operation,
                occurred_at: Utc::now(),
                attempt: ticket.attempt,
            });
        }
    }

    fn set_phase(&mut self, operation: Operation, phase: TrackPhase) {
        match operation {
            Operation::Search => self.search_phase = phase,
            Operation::Recommend => self.recommend_phase = phase,
        }
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            query: self.query.clone(),
            search_results: self.search_results.clone(),
            selected_id: self.selected_id,
            recommendations: self.recommendations.clone(),
            error: self.error.clone(),
            search_phase: self.search_phase,
            recommend_phase: self.recommend_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_bumps_per_kind_and_global_sequences() {
        let mut inner = ControllerStateInner::default();

        let first = inner.begin(Operation::Search);
        let second = inner.begin(Operation::Recommend);
        let third = inner.begin(Operation::Search);

        assert_eq!((first.seq, first.attempt), (1, 1));
        assert_eq!((second.seq, second.attempt), (1, 2));
        assert_eq!((third.seq, third.attempt), (2, 3));

        assert!(!inner.is_current(&first));
        assert!(inner.is_current(&second));
        assert!(inner.is_current(&third));
    }

    #[test]
    fn test_begin_clears_error() {
        let mut inner = ControllerStateInner::default();
        let ticket = inner.begin(Operation::Recommend);
        inner.record_failure(&ticket);
        assert!(inner.error.is_some());

        inner.begin(Operation::Search);
        assert_eq!(inner.error, None);
        assert_eq!(inner.search_phase, TrackPhase::InFlight);
        assert_eq!(inner.recommend_phase, TrackPhase::Failed);
    }

    #[test]
    fn test_failure_of_older_attempt_does_not_take_error_slot() {
        let mut inner = ControllerStateInner::default();
        let search = inner.begin(Operation::Search);
        let _recommend = inner.begin(Operation::Recommend);

        inner.record_failure(&search);
        assert_eq!(inner.error, None);
        assert_eq!(inner.search_phase, TrackPhase::Failed);
    }

    #[test]
    fn test_success_keeps_error_of_newer_attempt() {
        let mut inner = ControllerStateInner::default();
        let search = inner.begin(Operation::Search);
        let recommend = inner.begin(Operation::Recommend);

        inner.record_failure(&recommend);
        inner.record_success(&search);

        let error = inner.error.as_ref().unwrap();
        assert_eq!(error.operation, Operation::Recommend);
        assert_eq!(inner.search_phase, TrackPhase::Succeeded);
    }

    #[test]
    fn test_invalidate_search_makes_ticket_stale() {
        let mut inner = ControllerStateInner::default();
        let ticket = inner.begin(Operation::Search);

        inner.invalidate_search();

        assert!(!inner.is_current(&ticket));
        assert_eq!(inner.search_phase, TrackPhase::Idle);
    }

    #[test]
    fn test_invalidate_recommend_makes_ticket_stale() {
        let mut inner = ControllerStateInner::default();
        let search = inner.begin(Operation::Search);
        let recommend = inner.begin(Operation::Recommend);

        inner.invalidate_recommend();

        assert!(!inner.is_current(&recommend));
        assert!(inner.is_current(&search));
        assert_eq!(inner.recommend_phase, TrackPhase::Idle);
        assert_eq!(inner.search_phase, TrackPhase::InFlight);
    }

    #[tokio::test]
    async fn test_state_starts_empty() {
        let state = ControllerState::new();
        let inner = state.inner.read().await;
        assert_eq!(inner.snapshot(), ControllerSnapshot::default());
    }
}
