//! The working set of accepted usage events.
//!
//! Records enter through [`Schedule::ingest`] (a full refresh from storage) or
//! [`Schedule::submit`] (one new event from a form). Both validate; a rejected
//! record never reaches the working set and is always reported back.

use std::collections::HashSet;
use std::fmt;

use rayon::prelude::*;

use crate::event::{RawEvent, UsageEvent, validate};
use crate::types::{EventId, ValidationError};

/// A record that failed validation during ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Position of the record in the ingested batch.
    pub index: usize,
    /// The record's ID as submitted, possibly empty.
    pub id: String,
    pub error: ValidationError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "record {}: {}", self.index, self.error)
        } else {
            write!(f, "record {} ({}): {}", self.index, self.id, self.error)
        }
    }
}

/// Outcome of ingesting a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    /// True when every record was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Accepted events in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    events: Vec<UsageEvent>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from a batch, returning the ingestion report alongside.
    pub fn from_raw(raws: Vec<RawEvent>) -> (Self, IngestReport) {
        let mut schedule = Self::new();
        let report = schedule.ingest(raws);
        (schedule, report)
    }

    pub fn events(&self) -> &[UsageEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&UsageEvent> {
        self.events.iter().find(|e| e.id().as_str() == id)
    }

    /// Replaces the working set with the valid records of `raws`.
    ///
    /// Invalid records are skipped and reported; one bad record does not stop
    /// the rest. When two records share an ID the first one wins.
    pub fn ingest(&mut self, raws: Vec<RawEvent>) -> IngestReport {
        let results: Vec<(String, Result<UsageEvent, ValidationError>)> = raws
            .into_par_iter()
            .map(|raw| (raw.id.clone(), validate(raw)))
            .collect();

        let mut seen: HashSet<EventId> = HashSet::with_capacity(results.len());
        let mut accepted = Vec::with_capacity(results.len());
        let mut rejected = Vec::new();

        for (index, (id, result)) in results.into_iter().enumerate() {
            let error = match result {
                Ok(event) if seen.insert(event.id().clone()) => {
                    accepted.push(event);
                    continue;
                }
                Ok(event) => ValidationError::DuplicateId {
                    id: event.id().to_string(),
                },
                Err(error) => error,
            };
            tracing::warn!(index, id = %id, error = %error, "rejected usage event");
            rejected.push(Rejection { index, id, error });
        }

        tracing::debug!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "ingested usage events"
        );
        self.events = accepted;
        IngestReport {
            accepted: self.events.len(),
            rejected,
        }
    }

    /// Validates a single new event and appends it.
    ///
    /// On rejection the working set is unchanged and the violated invariant is
    /// returned.
    pub fn submit(&mut self, raw: RawEvent) -> Result<&UsageEvent, ValidationError> {
        let event = validate(raw)?;
        if self.get(event.id().as_str()).is_some() {
            return Err(ValidationError::DuplicateId {
                id: event.id().to_string(),
            });
        }
        tracing::debug!(id = %event.id(), day = event.day_index(), "accepted usage event");
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Swaps a provisionally added event for the version storage sent back.
    ///
    /// Returns `Ok(false)` when no event has the provisional ID. The saved
    /// record is validated like any other submission.
    pub fn reconcile(&mut self, provisional: &EventId, saved: RawEvent) -> Result<bool, ValidationError> {
        let saved = validate(saved)?;
        if saved.id() != provisional && self.get(saved.id().as_str()).is_some() {
            return Err(ValidationError::DuplicateId {
                id: saved.id().to_string(),
            });
        }

        let Some(slot) = self.events.iter_mut().find(|e| e.id() == provisional) else {
            return Ok(false);
        };
        tracing::debug!(provisional = %provisional, saved = %saved.id(), "reconciled usage event");
        *slot = saved;
        Ok(true)
    }
}
