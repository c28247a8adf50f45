//! Input-keyed memoization for derived views

/// Caches the last value computed for a key
///
/// `get_or_compute` reruns the computation only when the key differs from the
/// one the cached value was built from.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computations: u64,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        let entry = match self.entry.take() {
            Some((cached, value)) if cached == key => (cached, value),
            _ => {
                let value = compute(&key);
                self.computations += 1;
                (key, value)
            }
        };
        &self.entry.insert(entry).1
    }

    /// Cached value, if any
    pub fn get(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    /// How many times the computation has run
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
