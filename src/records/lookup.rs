//! Binary lookup over a fixed-width record store
//!
//! Ids are zero-padded to a fixed width, so comparing them as strings gives
//! numeric order. The catalog must be sorted by id; this is assumed, not
//! checked.
//!
//! Searches run over inclusive bounds `[0, total - 1]` and probe the lower
//! middle `left + (right - left) / 2`. A malformed record hit by a probe
//! counts as "not found" for that probe: exact search gives up, bound
//! searches keep the best bound seen so far.

use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::core::error::KbError;
use crate::records::record::{strip_id_prefix, Record};
use crate::records::store::{RawLine, RecordSource, RecordStore};

/// Exact and range queries over a sorted catalog
pub struct BinaryLookup<S> {
    store: RecordStore<S>,
}

impl<S: RecordSource> BinaryLookup<S> {
    pub fn new(store: RecordStore<S>) -> Self {
        Self { store }
    }

    /// Inclusive index bounds `[0, total - 1]`, `None` for an empty catalog
    fn bounds(&self) -> Result<Option<(u64, u64)>, KbError> {
        let total = self.store.total_records()?;
        Ok(total.checked_sub(1).map(|last| (0, last)))
    }

    /// Read the slot at `index` and extract its id, `None` when malformed
    fn probe(&self, index: u64) -> Result<Option<(RawLine, String)>, KbError> {
        let line = self.store.read_record_at(index)?;
        match RecordStore::<S>::extract_id(&line) {
            Some(id) => {
                debug!(index, id = %id, "probe");
                Ok(Some((line, id)))
            }
            None => {
                warn!(index, "malformed record encountered during binary search");
                Ok(None)
            }
        }
    }

    /// Find the record whose id equals `target_id` (with or without `ID-`)
    pub fn find_exact(&self, target_id: &str) -> Result<Option<Record>, KbError> {
        let target = strip_id_prefix(target_id);
        let Some((mut left, mut right)) = self.bounds()? else {
            return Ok(None);
        };

        while left <= right {
            let mid = left + (right - left) / 2;
            let Some((line, id)) = self.probe(mid)? else {
                return Ok(None);
            };

            match id.as_str().cmp(target) {
                Ordering::Equal => return Ok(Record::parse(line.as_str())),
                Ordering::Less => left = mid + 1,
                Ordering::Greater => match mid.checked_sub(1) {
                    Some(next) => right = next,
                    None => break,
                },
            }
        }

        Ok(None)
    }

    /// Leftmost index whose id is `>= start_id`
    pub fn find_range_start(&self, start_id: &str) -> Result<Option<u64>, KbError> {
        let target = strip_id_prefix(start_id);
        let Some((mut left, mut right)) = self.bounds()? else {
            return Ok(None);
        };
        let mut found = None;

        while left <= right {
            let mid = left + (right - left) / 2;
            let Some((_, id)) = self.probe(mid)? else {
                break;
            };

            if id.as_str() >= target {
                found = Some(mid);
                match mid.checked_sub(1) {
                    Some(next) => right = next,
                    None => break,
                }
            } else {
                left = mid + 1;
            }
        }

        Ok(found)
    }

    /// Rightmost index whose id is `<= end_id`
    pub fn find_range_end(&self, end_id: &str) -> Result<Option<u64>, KbError> {
        let target = strip_id_prefix(end_id);
        let Some((mut left, mut right)) = self.bounds()? else {
            return Ok(None);
        };
        let mut found = None;

        while left <= right {
            let mid = left + (right - left) / 2;
            let Some((_, id)) = self.probe(mid)? else {
                break;
            };

            if id.as_str() <= target {
                found = Some(mid);
                left = mid + 1;
            } else {
                match mid.checked_sub(1) {
                    Some(next) => right = next,
                    None => break,
                }
            }
        }

        Ok(found)
    }

    /// All records with `start_id <= id <= end_id`, in catalog order.
    ///
    /// Records between the two bounds are read sequentially; malformed ones
    /// are skipped.
    pub fn find_range(&self, start_id: &str, end_id: &str) -> Result<Vec<Record>, KbError> {
        let (Some(first), Some(last)) =
            (self.find_range_start(start_id)?, self.find_range_end(end_id)?)
        else {
            return Ok(Vec::new());
        };

        if first > last {
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity((last - first + 1) as usize);
        for index in first..=last {
            let line = self.store.read_record_at(index)?;
            match Record::parse(line.as_str()) {
                Some(record) => records.push(record),
                None => warn!(
                    error = %KbError::MalformedRecord { index },
                    "skipping record inside range"
                ),
            }
        }

        Ok(records)
    }
}
