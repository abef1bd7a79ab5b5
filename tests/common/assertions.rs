//! Custom test assertions for integration tests

use lta_datamall::Error;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that no two records share an identity
pub fn assert_unique_ids<K, I>(ids: I, what: &str)
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash + Debug,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            panic!("duplicate {what} id {id:?}");
        }
        seen.insert(id);
    }
}

/// Unwrap a live result, returning `None` when DataMall throttled the call
///
/// Live tests treat rate limiting as inconclusive rather than failed.
pub fn ok_unless_rate_limited<T: Debug>(result: Result<T, Error>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(Error::RateLimited) => {
            eprintln!("Skipping {what}: rate limited by DataMall");
            None
        }
        Err(e) => panic!("{what} failed: {e} ({})", e.error_code()),
    }
}
