use chrono::{DateTime, Utc};
use tally_domain::TransactionId;

/// Hands out creation-time ids (milliseconds since the epoch), bumping past
/// the last issued id so two additions in the same millisecond never collide.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn seeded(last: Option<TransactionId>) -> Self {
        Self {
            last: last.map(TransactionId::value),
        }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> TransactionId {
        let candidate = now.timestamp_millis();
        let id = match self.last {
            Some(last) if candidate <= last => last.saturating_add(1),
            _ => candidate,
        };
        self.last = Some(id);
        TransactionId(id)
    }

    /// Makes sure future ids stay above `id`.
    pub fn observe(&mut self, id: TransactionId) {
        if self.last.map_or(true, |last| id.value() > last) {
            self.last = Some(id.value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_instant_yields_increasing_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let mut ids = IdGenerator::default();
        let first = ids.next(now);
        let second = ids.next(now);
        assert_eq!(first.value(), now.timestamp_millis());
        assert_eq!(second.value(), first.value() + 1);
    }

    #[test]
    fn seeded_generator_skips_past_loaded_ids() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut ids = IdGenerator::seeded(Some(TransactionId(i64::from(u32::MAX) * 1000)));
        let next = ids.next(now);
        assert_eq!(next.value(), i64::from(u32::MAX) * 1000 + 1);
    }

    #[test]
    fn observe_only_moves_forward() {
        let mut ids = IdGenerator::seeded(Some(TransactionId(50)));
        ids.observe(TransactionId(10));
        let now = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(ids.next(now), TransactionId(51));
    }
}
