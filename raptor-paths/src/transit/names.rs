//! Stop display names for log and debug output.

use crate::domain::StopIndex;

/// Turns a stop index into a display name.
///
/// Only used for tracing and debug output; it has no effect on which
/// paths are found.
pub trait StopNameResolver {
    fn stop_name(&self, stop: StopIndex) -> String;
}

impl<F> StopNameResolver for F
where
    F: Fn(StopIndex) -> String,
{
    fn stop_name(&self, stop: StopIndex) -> String {
        self(stop)
    }
}

/// Resolver that prints the raw stop index.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopIndexNames;

impl StopNameResolver for StopIndexNames {
    fn stop_name(&self, stop: StopIndex) -> String {
        stop.to_string()
    }
}
