use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;

use log::debug;
use log::trace;

use crate::bucket_hasher::BucketHasher;
use crate::bucket_hasher::Polynomial31;
use crate::chain::Chain;
use crate::config::TableConfig;
use crate::error::TableError;

type Bucket<V> = Option<Chain<V>>;

fn empty_buckets<V>(capacity: usize) -> Vec<Bucket<V>> {
    // vec![None; n] would require Chain<V>: Clone
    core::iter::repeat_with(|| None).take(capacity).collect()
}

/// Resolves `key` to a bucket and enforces `index < capacity`.
#[inline]
fn checked_bucket<H: BucketHasher>(
    hasher: &H,
    key: &str,
    capacity: usize,
) -> Result<usize, TableError> {
    match hasher.bucket(key, capacity) {
        Some(index) if index < capacity => Ok(index),
        index => Err(TableError::OutOfBounds { index, capacity }),
    }
}

/// Find-by-key-or-append into a bucket, creating the chain on first use.
///
/// Returns the overwritten value when `key` was already present.
fn merge<V>(bucket: &mut Bucket<V>, key: String, value: V) -> Option<V> {
    let chain = bucket.get_or_insert_with(Chain::new);
    match chain.find_by_key_mut(&key) {
        Some(entry) => Some(entry.replace_value(value)),
        None => {
            chain.append(key, value);
            None
        }
    }
}

/// A string-keyed hash table resolving collisions with per-bucket chains.
///
/// `ChainedHashTable<V, H>` owns a fixed-length array of optional
/// [`Chain`]s. A bucket's chain is created the first time a key lands in it
/// and is never removed. When the number of distinct keys reaches
/// `capacity * load_factor` the bucket array doubles and every key is
/// re-hashed under the new capacity.
///
/// The bucket for a key is chosen by a [`BucketHasher`]; the default,
/// [`Polynomial31`], folds the capacity into the hash itself, so the
/// placement of every key changes on each resize.
///
/// ## Errors
///
/// `set`, `get` and `has` bounds-check the computed bucket index and return
/// [`TableError::OutOfBounds`] if it falls outside `[0, capacity)`. With the
/// built-in hashers that only happens for a table of capacity 0. A missing
/// key is never an error.
///
/// ## Example
///
/// ```rust
/// use chain_table::ChainedHashTable;
///
/// # fn main() -> Result<(), chain_table::TableError> {
/// let mut table = ChainedHashTable::with_capacity_and_load_factor(4, 0.75);
///
/// table.set("Messi", 10)?;
/// table.set("C. Ronaldo", 7)?;
/// table.set("Neymar Jr.", 11)?;
/// assert_eq!(table.capacity(), 8);
///
/// assert_eq!(table.set("Messi", 30)?, Some(10));
/// assert_eq!(table.get("Messi")?, Some(&30));
/// assert!(table.has("C. Ronaldo")?);
/// assert!(!table.has("Pele")?);
/// assert_eq!(table.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ChainedHashTable<V, H = Polynomial31> {
    buckets: Vec<Bucket<V>>,
    config: TableConfig,
    count: usize,
    hasher: H,
}

impl<V, H> Debug for ChainedHashTable<V, H>
where
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Populated<'a, V>(&'a [Bucket<V>]);

        impl<V: Debug> Debug for Populated<'_, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.0
                            .iter()
                            .enumerate()
                            .filter_map(|(index, bucket)| Some((index, bucket.as_ref()?))),
                    )
                    .finish()
            }
        }

        f.debug_struct("ChainedHashTable")
            .field("count", &self.count)
            .field("capacity", &self.buckets.len())
            .field("load_factor", &self.config.load_factor)
            .field("buckets", &Populated(&self.buckets))
            .finish()
    }
}

impl<V> ChainedHashTable<V, Polynomial31> {
    /// Creates a table with 16 buckets and a load factor of 0.8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainedHashTable;
    ///
    /// let table: ChainedHashTable<i32> = ChainedHashTable::new();
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.load_factor(), 0.8);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates a table with `capacity` buckets and the default load factor.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TableConfig::default().with_initial_capacity(capacity))
    }

    /// Creates a table with `capacity` buckets that grows once
    /// `capacity * load_factor` keys are stored.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::with_config(
            TableConfig::default()
                .with_initial_capacity(capacity)
                .with_load_factor(load_factor),
        )
    }

    /// Creates a table from a [`TableConfig`].
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, Polynomial31)
    }
}

impl<V, H> Default for ChainedHashTable<V, H>
where
    H: BucketHasher + Default,
{
    fn default() -> Self {
        Self::with_config_and_hasher(TableConfig::default(), H::default())
    }
}

impl<V, H> ChainedHashTable<V, H>
where
    H: BucketHasher,
{
    /// Creates a default-sized table placing keys with `hasher`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use core::hash::BuildHasherDefault;
    ///
    /// use chain_table::ChainedHashTable;
    /// use chain_table::Digest;
    /// use siphasher::sip::SipHasher;
    ///
    /// # fn main() -> Result<(), chain_table::TableError> {
    /// let digest: Digest<BuildHasherDefault<SipHasher>> = Digest::default();
    /// let mut table = ChainedHashTable::with_hasher(digest);
    /// table.set("key", "value")?;
    /// assert_eq!(table.get("key")?, Some(&"value"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hasher)
    }

    /// Creates a table from a [`TableConfig`], placing keys with `hasher`.
    pub fn with_config_and_hasher(config: TableConfig, hasher: H) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity),
            config,
            count: 0,
            hasher,
        }
    }

    /// Returns the number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no key has been set.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current number of buckets.
    ///
    /// Starts at the configured initial capacity and only ever doubles.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the fill ratio that triggers a resize.
    pub fn load_factor(&self) -> f64 {
        self.config.load_factor
    }

    /// Returns the bucket hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the chain in bucket `index`, if that bucket has been populated.
    ///
    /// Intended for inspecting key placement; the table itself has no
    /// iteration API.
    pub fn bucket(&self, index: usize) -> Option<&Chain<V>> {
        self.buckets.get(index)?.as_ref()
    }

    #[inline]
    fn bucket_index(&self, key: &str) -> Result<usize, TableError> {
        checked_bucket(&self.hasher, key, self.buckets.len())
    }

    /// Associates `value` with `key`.
    ///
    /// An existing key has its value overwritten in place and the previous
    /// value is returned; the key count is unchanged. A new key is appended
    /// to its bucket's chain. If the key count then reaches
    /// `capacity * load_factor`, the table doubles.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfBounds`] if the key's bucket index is outside the
    /// bucket array, or if a rehash during the resize produces such an index.
    /// In the latter case the value has been stored but the table keeps its
    /// old capacity.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        let key = key.into();
        let index = self.bucket_index(&key)?;

        let bucket = &mut self.buckets[index];
        if bucket.is_none() {
            trace!("creating chain for bucket {index}");
        }
        let previous = merge(bucket, key, value);
        if previous.is_none() {
            self.count += 1;
        }

        if self.config.reached(self.count, self.buckets.len()) {
            self.resize()?;
        }

        Ok(previous)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfBounds`] if the key's bucket index is outside the
    /// bucket array.
    pub fn get(&self, key: &str) -> Result<Option<&V>, TableError> {
        let index = self.bucket_index(key)?;
        Ok(self.buckets[index]
            .as_ref()
            .and_then(|chain| chain.find_by_key(key))
            .map(|entry| entry.value()))
    }

    /// Returns `true` if `key` has been set.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfBounds`] if the key's bucket index is outside the
    /// bucket array.
    pub fn has(&self, key: &str) -> Result<bool, TableError> {
        Ok(self.get(key)?.is_some())
    }

    /// Doubles the bucket array and re-hashes every key into it.
    ///
    /// Entries are re-inserted bucket by bucket, each chain head to tail,
    /// with the same find-or-append merge as [`set`](Self::set). Every new
    /// index is computed and checked before anything moves, so on error the
    /// table is left exactly as it was.
    #[cold]
    fn resize(&mut self) -> Result<(), TableError> {
        let old_capacity = self.buckets.len();
        let capacity = old_capacity
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow {
                capacity: old_capacity,
            })?;

        let plan = self
            .buckets
            .iter()
            .flatten()
            .flat_map(|chain| chain.iter())
            .map(|entry| checked_bucket(&self.hasher, entry.key(), capacity))
            .collect::<Result<Vec<_>, _>>()?;

        let mut buckets = empty_buckets(capacity);
        let old = core::mem::take(&mut self.buckets);
        for (entry, index) in old.into_iter().flatten().flatten().zip(plan) {
            let (key, value) = entry.into_parts();
            merge(&mut buckets[index], key, value);
        }
        self.buckets = buckets;

        debug!(
            "resized table from {old_capacity} to {capacity} buckets ({} entries)",
            self.count
        );
        Ok(())
    }

    /// Prints every bucket and its chain to stdout.
    ///
    /// Requires the `std` feature. Empty buckets print as `<empty>`.
    #[cfg(feature = "std")]
    pub fn print_layout(&self)
    where
        V: fmt::Display,
    {
        println!(
            "table: {} entries in {} buckets (load factor {})",
            self.count,
            self.buckets.len(),
            self.config.load_factor
        );
        for (index, bucket) in self.buckets.iter().enumerate() {
            match bucket {
                Some(chain) => println!("{index:>4} | {chain}"),
                None => println!("{index:>4} | <empty>"),
            }
        }
    }
}
