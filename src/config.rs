/// Bucket count used by [`TableConfig::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor used by [`TableConfig::default`].
pub const DEFAULT_LOAD_FACTOR: f64 = 0.8;

/// Construction parameters for a [`ChainedHashTable`](crate::ChainedHashTable).
///
/// The table resizes whenever its entry count reaches
/// `capacity * load_factor`. The load factor is not validated: a value of
/// zero or below makes every `set` trigger a resize.
///
/// # Examples
///
/// ```rust
/// use chain_table::ChainedHashTable;
/// use chain_table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_initial_capacity(4)
///     .with_load_factor(0.75);
/// let table: ChainedHashTable<u32> = ChainedHashTable::with_config(config);
/// assert_eq!(table.capacity(), 4);
/// assert_eq!(table.load_factor(), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated up front.
    pub initial_capacity: usize,
    /// Fill ratio at which the bucket array doubles.
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Replaces the initial bucket count.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Replaces the load factor.
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Entry count at which a table of `capacity` buckets must grow.
    #[inline]
    pub(crate) fn reached(&self, count: usize, capacity: usize) -> bool {
        count as f64 >= capacity as f64 * self.load_factor
    }
}
