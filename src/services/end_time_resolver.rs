//! End-time inference
//!
//! An operation ends when the next operation that can displace it starts:
//! the earliest operation with a strictly later start time that is either in
//! the same sector, or where one of the two is a PAD operation. Without such
//! an operation the end time is `None` (ongoing).
//!
//! This is the only place the rule lives. Every mutation of the operation set
//! recomputes all end times through [`resolve_end_times`].

use chrono::{DateTime, Utc};

use crate::models::operation::{Operation, Sector};

/// Whether an operation in `next` displaces a running operation in `current`
pub fn displaces(current: Sector, next: Sector) -> bool {
    current.is_pad() || next.is_pad() || current == next
}

/// End time of a single operation given the full operation set
pub fn end_time_for(operation: &Operation, all: &[Operation]) -> Option<DateTime<Utc>> {
    all.iter()
        .filter(|next| {
            next.start_time > operation.start_time && displaces(operation.sector, next.sector)
        })
        .map(|next| next.start_time)
        .min()
}

/// Recompute `end_time` of every operation in place.
///
/// Only `end_time` is written; order and every other field are untouched.
/// The result depends on start-time values alone, so candidates that tie on
/// start time all yield the same end time and no tie-break is needed.
pub fn resolve_end_times(operations: &mut [Operation]) {
    let starts: Vec<(DateTime<Utc>, Sector)> = operations
        .iter()
        .map(|op| (op.start_time, op.sector))
        .collect();

    let mut ongoing = 0usize;
    for operation in operations.iter_mut() {
        operation.end_time = starts
            .iter()
            .filter(|(start, sector)| {
                *start > operation.start_time && displaces(operation.sector, *sector)
            })
            .map(|(start, _)| *start)
            .min();

        if operation.end_time.is_none() {
            ongoing += 1;
        }
    }

    tracing::debug!(
        operations = operations.len(),
        ongoing = ongoing,
        "Resolved operation end times"
    );
}
