//! Record id allocation shared by the medication store, meal log and chat.

use chrono::Utc;

/// Hands out millisecond-timestamp ids that never repeat within a collection.
///
/// Ids normally increase. Once the last id is `i64::MAX` there is no larger
/// value left, so the smallest positive id not yet in use is returned instead.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    /// An allocator whose next id is greater than `last` when possible.
    pub(crate) fn after(last: i64) -> Self {
        Self { last }
    }

    /// Allocate an id for which `in_use` is false.
    pub(crate) fn next(&mut self, in_use: impl Fn(i64) -> bool) -> i64 {
        match self.last.checked_add(1) {
            Some(floor) => {
                let id = Utc::now().timestamp_millis().max(floor);
                self.last = id;
                id
            }
            None => {
                // A collection cannot hold every i64, so the scan always finds a gap.
                let id = (1..=i64::MAX)
                    .chain(i64::MIN..1)
                    .find(|id| !in_use(*id))
                    .unwrap_or(self.last);
                tracing::warn!(id, "Id space above the last id is exhausted; reusing a free id");
                id
            }
        }
    }
}
