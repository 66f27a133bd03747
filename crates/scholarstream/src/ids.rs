//! Generated record identifiers: a short entity prefix followed by a
//! zero-padded process-wide sequence number.

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) fn next_in_sequence(prefix: &str, sequence: &AtomicU64) -> String {
    let n = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{n:06}")
}

/// An id is well formed when it carries the expected prefix and a purely
/// numeric suffix. Lookups that promise `InvalidId` check this first so a
/// malformed id never reaches the store as a miss.
pub(crate) fn well_formed(raw: &str, prefix: &str) -> bool {
    raw.strip_prefix(prefix)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_ids_are_prefixed_and_padded() {
        let sequence = AtomicU64::new(7);
        assert_eq!(next_in_sequence("app-", &sequence), "app-000007");
        assert_eq!(next_in_sequence("app-", &sequence), "app-000008");
    }

    #[test]
    fn well_formed_rejects_foreign_shapes() {
        assert!(well_formed("app-000001", "app-"));
        assert!(well_formed("app-1234567", "app-"));
        assert!(!well_formed("app-", "app-"));
        assert!(!well_formed("app-12x4", "app-"));
        assert!(!well_formed("sch-000001", "app-"));
        assert!(!well_formed("", "app-"));
    }
}
