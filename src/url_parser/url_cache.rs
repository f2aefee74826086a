use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, trace};

use super::components::{ComponentSelector, IntoSelector, Normalized};
use super::parser::UrlNormalizer;
use crate::error::NormalizeError;

/// Default number of entries kept by [`NormalizeCache::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Memoizes normalization results by raw input and selector.
///
/// The cache belongs to whoever creates it; the normalizer itself keeps no
/// state between calls. Once `capacity` entries are stored, further results
/// are computed but not remembered.
#[derive(Debug)]
pub struct NormalizeCache {
    normalizer: UrlNormalizer,
    entries: Mutex<HashMap<(String, ComponentSelector), Normalized>>,
    capacity: usize,
}

impl NormalizeCache {
    pub fn new(normalizer: UrlNormalizer) -> Self {
        Self::with_capacity(normalizer, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(normalizer: UrlNormalizer, capacity: usize) -> Self {
        Self {
            normalizer,
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    pub fn normalizer(&self) -> &UrlNormalizer {
        &self.normalizer
    }

    /// Cached result for `raw`, normalizing it on a miss.
    pub fn get_or_normalize<S: IntoSelector>(
        &self,
        raw: &str,
        selector: S,
    ) -> Result<Normalized, NormalizeError> {
        let selector = selector.into_selector()?;
        let key = (raw.to_string(), selector);

        if let Some(hit) = self.lock().get(&key) {
            trace!("Cache hit for {:?} ({})", raw, selector);
            return Ok(hit.clone());
        }

        let result = self.normalizer.normalize(raw, selector)?;

        let mut entries = self.lock();
        if entries.len() < self.capacity {
            entries.insert(key, result.clone());
        } else {
            debug!("Normalize cache full ({} entries), not storing {:?}", self.capacity, raw);
        }
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, ComponentSelector), Normalized>> {
        // A poisoned lock still only holds complete entries.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
