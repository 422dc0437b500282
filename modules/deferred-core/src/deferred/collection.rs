
use alloc::{sync::Arc, vec::Vec};

use super::Deferred;
use crate::{
  dispatch::{DispatchTargetShared, InlineDispatchTarget},
  sync::ReadWriteLock,
};

/// Joins `deferreds` into one future holding every value, in input order.
///
/// The order of the result follows the input, not the order in which the inputs complete. An
/// empty input yields an already fulfilled future holding an empty `Vec`. If any input is never
/// fulfilled, neither is the result.
///
/// The result uses the configuration of the first input.
#[must_use]
pub fn all<T, L, I>(deferreds: I) -> Deferred<Vec<T>, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
  I: IntoIterator<Item = Deferred<T, L>>, {
  let deferreds: Arc<[Deferred<T, L>]> = deferreds.into_iter().collect();
  let Some(first) = deferreds.first() else {
    return Deferred::fulfilled(Vec::new());
  };

  let combined = Deferred::new_with_config(first.config().clone());
  let results = Vec::with_capacity(deferreds.len());
  collect_from(deferreds, results, combined.clone());
  combined
}

// Appends every value that is already available, then waits on the first missing one and
// resumes from its continuation. Values are therefore appended strictly in index order.
fn collect_from<T, L>(deferreds: Arc<[Deferred<T, L>]>, mut results: Vec<T>, combined: Deferred<Vec<T>, L>)
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock, {
  while let Some(value) = deferreds.get(results.len()).and_then(Deferred::peek) {
    results.push(value);
  }

  let Some(pending) = deferreds.get(results.len()).cloned() else {
    combined.fulfill(results);
    return;
  };

  pending.upon(move |value| {
    results.push(value);
    collect_from(deferreds, results, combined);
  });
}

/// Races `deferreds` and yields whichever input is fulfilled first.
///
/// The result holds the winning future itself rather than its value; read the value from it
/// with [`Deferred::peek`] or any other accessor. Later completions are ignored. An empty input
/// yields a future that is never fulfilled.
///
/// The result uses the configuration of the first input.
#[must_use]
pub fn any<T, L, I>(deferreds: I) -> Deferred<Deferred<T, L>, L>
where
  T: Clone + Send + Sync + 'static,
  L: ReadWriteLock,
  I: IntoIterator<Item = Deferred<T, L>>, {
  let mut deferreds = deferreds.into_iter().peekable();
  let config = deferreds.peek().map(|first| first.config().clone()).unwrap_or_default();
  let winner = Deferred::new_with_config(config);
  let inline = DispatchTargetShared::new(InlineDispatchTarget);

  // Candidates are held weakly by their own continuation. It runs inline, while the fulfilling
  // caller still owns a handle.
  for candidate in deferreds {
    let output = winner.clone();
    let finished = candidate.downgrade();
    candidate.upon_on(inline.clone(), move |_| {
      if let Some(finished) = finished.upgrade() {
        output.fulfill_if_unfulfilled(finished);
      }
    });
  }
  winner
}
