use std::collections::{HashMap, VecDeque};

use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

use crate::configs::Store;
use crate::models::{HistorySample, Location, Reading, StatusSummary, UnitStatus};

/// 24 hours of samples at a 5 minute cadence.
pub const MAX_HISTORY_POINTS: usize = 288;

#[derive(Debug, Default)]
struct UnitEntry {
    latest: Option<Reading>,
    history: VecDeque<HistorySample>,
    location: Option<Location>,
}

/// In-memory state for every unit seen so far.
///
/// A single lock guards the whole map, so the latest reading, its history and
/// its location always change together. Entries are created by the first
/// reading or location write and never removed.
pub struct UnitStore {
    units: RwLock<HashMap<String, UnitEntry>>,
    max_history_points: usize,
    offline_after: Option<Duration>,
}

impl UnitStore {
    pub fn new(store: &Store) -> Self {
        Self {
            units: RwLock::new(HashMap::new()),
            max_history_points: store.max_history_points,
            offline_after: store
                .offline_after()
                .and_then(|limit| Duration::try_from(limit).ok()),
        }
    }

    /// Stores `reading` as the unit's latest and appends it to the history,
    /// evicting the oldest samples past the bound. Returns the stored value.
    pub async fn record_reading(&self, reading: Reading) -> Reading {
        let mut units = self.units.write().await;
        let entry = units.entry(reading.unit_id.clone()).or_default();

        entry.history.push_back(reading.sample());
        while entry.history.len() > self.max_history_points {
            entry.history.pop_front();
        }

        let reading = reading.with_location(entry.location.clone());
        entry.latest = Some(reading.clone());

        reading
    }

    pub async fn get_latest(&self, unit_id: &str) -> Option<Reading> {
        let now = OffsetDateTime::now_utc();
        let units = self.units.read().await;

        units
            .get(unit_id)
            .and_then(|entry| entry.latest.clone())
            .map(|reading| self.observed(reading, now))
    }

    pub async fn get_all_latest(&self) -> HashMap<String, Reading> {
        let now = OffsetDateTime::now_utc();
        let units = self.units.read().await;

        units
            .iter()
            .filter_map(|(unit_id, entry)| {
                let reading = entry.latest.clone()?;
                Some((unit_id.clone(), self.observed(reading, now)))
            })
            .collect()
    }

    /// Upserts the location and refreshes the copy attached to the latest
    /// reading. History samples never carry a location.
    pub async fn set_location(&self, unit_id: &str, location: Location) -> Location {
        let mut units = self.units.write().await;
        let entry = units.entry(unit_id.to_string()).or_default();

        entry.location = Some(location.clone());
        if let Some(latest) = entry.latest.take() {
            entry.latest = Some(latest.with_location(Some(location.clone())));
        }

        location
    }

    pub async fn get_location(&self, unit_id: &str) -> Option<Location> {
        let units = self.units.read().await;
        units.get(unit_id).and_then(|entry| entry.location.clone())
    }

    pub async fn get_all_locations(&self) -> HashMap<String, Location> {
        let units = self.units.read().await;

        units
            .iter()
            .filter_map(|(unit_id, entry)| Some((unit_id.clone(), entry.location.clone()?)))
            .collect()
    }

    /// Oldest-first history of a unit that has reported at least once.
    /// `window` keeps only samples newer than `now - window`.
    pub async fn get_history(&self, unit_id: &str, window: Option<Duration>) -> Option<Vec<HistorySample>> {
        let units = self.units.read().await;
        let entry = units.get(unit_id).filter(|entry| entry.latest.is_some())?;

        // A window reaching before the representable range keeps everything
        let since = window.and_then(|window| OffsetDateTime::now_utc().checked_sub(window));

        let history = match since {
            Some(since) => {
                entry
                    .history
                    .iter()
                    .filter(|sample| sample.timestamp >= since)
                    .copied()
                    .collect()
            }
            None => entry.history.iter().copied().collect(),
        };

        Some(history)
    }

    pub async fn status_summary(&self) -> StatusSummary {
        let now = OffsetDateTime::now_utc();
        let units = self.units.read().await;

        let (total, online) = units
            .values()
            .filter_map(|entry| entry.latest.as_ref())
            .fold((0, 0), |(total, online), reading| {
                let is_online = self.status_at(reading, now) == UnitStatus::Online;
                (total + 1, online + usize::from(is_online))
            });

        StatusSummary {
            total,
            online,
            offline: total - online,
            last_update: now,
        }
    }

    /// Ids of the units that have reported, sorted.
    pub async fn unit_ids(&self) -> Vec<String> {
        let units = self.units.read().await;

        let mut unit_ids: Vec<String> = units
            .iter()
            .filter(|(_, entry)| entry.latest.is_some())
            .map(|(unit_id, _)| unit_id.clone())
            .collect();
        unit_ids.sort();

        unit_ids
    }

    fn status_at(&self, reading: &Reading, now: OffsetDateTime) -> UnitStatus {
        match self.offline_after {
            Some(limit) if now - reading.timestamp > limit => UnitStatus::Offline,
            _ => reading.status,
        }
    }

    fn observed(&self, reading: Reading, now: OffsetDateTime) -> Reading {
        let status = self.status_at(&reading, now);
        reading.with_status(status)
    }
}

impl Default for UnitStore {
    fn default() -> Self {
        Self::new(&Store::default())
    }
}
