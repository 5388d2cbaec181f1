use crate::style::{Size, Thickness};

pub const MEASUREMENT_CACHE_CAPACITY: usize = 15;

/// One measurement outcome for a given available size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementMeasurement {
    pub available: Size,
    pub requested: Thickness,
    pub shared: Thickness,
    pub content: Thickness,
}

impl ElementMeasurement {
    /// An entry taken at `self.available` still answers a query for `available`
    /// when the space shrank but still covers what was requested. Growth can
    /// change the answer (wrapping content re-flows), so it never matches.
    pub fn is_reusable_for(&self, available: Size) -> bool {
        self.available == available
            || (self.available.contains(available) && self.requested.size().fits_within(available))
    }
}

/// The combined result of a full measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    pub self_size: Thickness,
    pub full_size: Thickness,
    pub shared_size: Thickness,
    pub content_size: Thickness,
}

impl Measurement {
    pub const ZERO: Measurement = Measurement {
        self_size: Thickness::ZERO,
        full_size: Thickness::ZERO,
        shared_size: Thickness::ZERO,
        content_size: Thickness::ZERO,
    };
}

/// Fixed-capacity ring of recent measurements, newest first.
#[derive(Debug, Clone)]
pub struct MeasurementCache {
    entries: [ElementMeasurement; MEASUREMENT_CACHE_CAPACITY],
    head: usize,
    len: usize,
}

impl Default for MeasurementCache {
    fn default() -> Self {
        Self {
            entries: [ElementMeasurement::default(); MEASUREMENT_CACHE_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

impl MeasurementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Newest entry first.
    pub fn iter(&self) -> impl Iterator<Item = &ElementMeasurement> + '_ {
        (0..self.len).map(move |i| {
            let index = (self.head + MEASUREMENT_CACHE_CAPACITY - i) % MEASUREMENT_CACHE_CAPACITY;
            &self.entries[index]
        })
    }

    pub fn find(&self, available: Size) -> Option<ElementMeasurement> {
        self.iter().find(|entry| entry.is_reusable_for(available)).copied()
    }

    /// Records `measurement` as the newest entry. An entry for the same
    /// available size is replaced rather than duplicated; otherwise the oldest
    /// entry is evicted once the ring is full.
    pub fn insert(&mut self, measurement: ElementMeasurement) {
        let existing = self
            .iter()
            .position(|entry| entry.available == measurement.available);
        if let Some(position) = existing {
            self.remove_at(position);
        }

        if self.len == 0 {
            self.head = 0;
        } else {
            self.head = (self.head + 1) % MEASUREMENT_CACHE_CAPACITY;
        }
        self.entries[self.head] = measurement;
        self.len = (self.len + 1).min(MEASUREMENT_CACHE_CAPACITY);
    }

    // `position` counts from the newest entry.
    fn remove_at(&mut self, position: usize) {
        let kept: Vec<ElementMeasurement> = self
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, entry)| *entry)
            .collect();
        self.clear();
        for entry in kept.into_iter().rev() {
            self.insert_unchecked(entry);
        }
    }

    fn insert_unchecked(&mut self, measurement: ElementMeasurement) {
        if self.len == 0 {
            self.head = 0;
        } else {
            self.head = (self.head + 1) % MEASUREMENT_CACHE_CAPACITY;
        }
        self.entries[self.head] = measurement;
        self.len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementMeasurement, MEASUREMENT_CACHE_CAPACITY, MeasurementCache};
    use crate::style::{Size, Thickness};

    fn entry(available: Size, requested: Size) -> ElementMeasurement {
        ElementMeasurement {
            available,
            requested: Thickness::from_size(requested),
            ..ElementMeasurement::default()
        }
    }

    #[test]
    fn shrinking_within_requested_reuses_entry() {
        let mut cache = MeasurementCache::new();
        cache.insert(entry(Size::new(200, 100), Size::new(40, 20)));

        assert!(cache.find(Size::new(120, 60)).is_some());
        assert!(cache.find(Size::new(40, 20)).is_some());
        assert!(cache.find(Size::new(39, 20)).is_none());
    }

    #[test]
    fn growth_never_reuses_entry() {
        let mut cache = MeasurementCache::new();
        cache.insert(entry(Size::new(100, 100), Size::new(40, 20)));

        assert!(cache.find(Size::new(101, 100)).is_none());
        assert!(cache.find(Size::new(100, 101)).is_none());
        assert!(cache.find(Size::new(100, 100)).is_some());
    }

    #[test]
    fn exact_match_reuses_even_when_request_exceeds_space() {
        let mut cache = MeasurementCache::new();
        cache.insert(entry(Size::new(30, 30), Size::new(50, 50)));
        assert!(cache.find(Size::new(30, 30)).is_some());
        assert!(cache.find(Size::new(29, 29)).is_none());
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut cache = MeasurementCache::new();
        for i in 0..(MEASUREMENT_CACHE_CAPACITY as i32 + 3) {
            cache.insert(entry(Size::new(i, i), Size::new(i + 1000, 0)));
        }
        assert_eq!(cache.len(), MEASUREMENT_CACHE_CAPACITY);
        assert!(cache.find(Size::new(0, 0)).is_none());
        assert!(cache.find(Size::new(2, 2)).is_none());
        assert!(cache.find(Size::new(3, 3)).is_some());
        assert_eq!(
            cache.iter().next().map(|e| e.available),
            Some(Size::new(MEASUREMENT_CACHE_CAPACITY as i32 + 2, MEASUREMENT_CACHE_CAPACITY as i32 + 2))
        );
    }

    #[test]
    fn same_available_size_replaces_instead_of_duplicating() {
        let mut cache = MeasurementCache::new();
        cache.insert(entry(Size::new(10, 10), Size::new(1, 1)));
        cache.insert(entry(Size::new(20, 20), Size::new(1, 1)));
        cache.insert(entry(Size::new(10, 10), Size::new(5, 5)));

        assert_eq!(cache.len(), 2);
        let newest = cache.iter().next().copied().expect("cache has entries");
        assert_eq!(newest.available, Size::new(10, 10));
        assert_eq!(newest.requested.size(), Size::new(5, 5));
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = MeasurementCache::new();
        cache.insert(entry(Size::new(10, 10), Size::new(1, 1)));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.find(Size::new(10, 10)).is_none());
    }
}
