//! Cast validation pipeline.
//!
//! Every cast attempt runs the same ordered, short-circuiting sequence of
//! checks. Failure reasons are mutually exclusive and the first failing
//! check names the reported reason, so the order is part of the contract:
//!
//! 1. caster alive
//! 2. cast state idle
//! 3. slot cooldown zero
//! 4. slot non-empty
//! 5. energy after cost multipliers
//! 6. school resource
//! 7. target present and alive
//! 8. range
//!
//! The pipeline itself only reads. Its two side effects are telemetry
//! counters and, for a range failure, the approach queue entry made by the
//! character that called it.
mod pipeline;
mod result;
mod telemetry;

pub use pipeline::{CastRequest, TargetLookup, TargetView, ValidatedCast, validate_cast};
pub use result::{CastFailure, CastRejection, CastResult};
pub use telemetry::{CastCounter, CastCounters, TelemetrySink};
