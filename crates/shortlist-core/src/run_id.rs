//! Process-level run ID for tracking screening executions.
//!
//! Each process gets a unique ULID at startup. Every screening performed
//! within the same process shares this ID, so log lines and emitted
//! reports can be traced back to the run that produced them, even when
//! several runs happen on the same day.

use std::sync::LazyLock;

use ulid::Ulid;

/// Process-level run ID, generated once at first access.
static RUN_ID: LazyLock<String> = LazyLock::new(|| Ulid::new().to_string());

/// Returns the process-level run ID.
///
/// This ID is:
/// - Generated once per process (at first call)
/// - Time-ordered (ULIDs sort lexicographically by creation time)
/// - 26 characters, URL-safe
#[inline]
pub fn get() -> &'static str {
    &RUN_ID
}

/// Generates a fresh ULID, for IDs scoped narrower than the process
/// (e.g. one per screening request).
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
