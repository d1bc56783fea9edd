//! Marker types.

/// Marker type describing a scheduled occurrence.
#[derive(Clone, Copy, Debug)]
pub struct Schedule;

/// Marker type describing an accepted submission.
#[derive(Clone, Copy, Debug)]
pub struct Submission;
