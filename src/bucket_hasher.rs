use core::hash::BuildHasher;

/// Maps a string key to a bucket index for a given bucket count.
///
/// The table calls this on every access and re-calls it for every stored key
/// when the bucket array grows, so an implementation is free to fold the
/// capacity into the hash itself. Returning `None` signals that `capacity`
/// admits no index at all; the table reports that as
/// [`TableError::OutOfBounds`](crate::TableError::OutOfBounds). Any returned
/// index is still bounds-checked by the table before use.
pub trait BucketHasher {
    /// Returns the bucket for `key` in a table of `capacity` buckets.
    fn bucket(&self, key: &str, capacity: usize) -> Option<usize>;
}

/// Multiplier of the polynomial rolling hash.
const PRIME: u128 = 31;

/// The capacity-coupled polynomial hash.
///
/// Walks the UTF-16 code units of the key left to right, accumulating
/// `h = (31 * h + unit) mod capacity` from `h = 0`. Because the modulo is
/// applied at every step, the index of a key under one capacity says nothing
/// about its index under another; resizing must rehash every key.
///
/// # Examples
///
/// ```rust
/// use chain_table::BucketHasher;
/// use chain_table::Polynomial31;
///
/// // 'a' is 97, 'b' is 98: (31 * (97 % 8) + 98) % 8 == 1
/// assert_eq!(Polynomial31.bucket("ab", 8), Some(1));
/// assert_eq!(Polynomial31.bucket("", 8), Some(0));
/// assert_eq!(Polynomial31.bucket("ab", 0), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Polynomial31;

impl BucketHasher for Polynomial31 {
    #[inline]
    fn bucket(&self, key: &str, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            return None;
        }

        let modulus = capacity as u128;
        let hash = key
            .encode_utf16()
            .fold(0u128, |hash, unit| (PRIME * hash + unit as u128) % modulus);
        Some(hash as usize)
    }
}

/// Hash-then-reduce: a capacity-independent digest taken modulo the capacity.
///
/// Any [`BuildHasher`] works; the digest of a key never changes across
/// resizes, only its reduction does.
///
/// # Examples
///
/// ```rust
/// use core::hash::BuildHasherDefault;
///
/// use chain_table::BucketHasher;
/// use chain_table::Digest;
/// use siphasher::sip::SipHasher;
///
/// let digest: Digest<BuildHasherDefault<SipHasher>> = Digest::default();
/// let index = digest.bucket("key", 16).unwrap();
/// assert!(index < 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Digest<S> {
    hash_builder: S,
}

impl<S> Digest<S> {
    /// Wraps a hasher builder.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the wrapped hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<S: BuildHasher> BucketHasher for Digest<S> {
    #[inline]
    fn bucket(&self, key: &str, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            return None;
        }
        let hash = self.hash_builder.hash_one(key);
        Some((hash % capacity as u64) as usize)
    }
}

/// [`Digest`] over foldhash's fixed-seed fast hasher.
#[cfg(feature = "foldhash")]
pub type FoldDigest = Digest<foldhash::fast::FixedState>;

#[cfg(test)]
mod tests {
    use alloc::format;
    use core::hash::BuildHasherDefault;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;

    fn reference_hash(key: &str, capacity: usize) -> usize {
        let mut hash = 0usize;
        for unit in key.encode_utf16() {
            hash = (31 * hash + unit as usize) % capacity;
        }
        hash
    }

    #[test]
    fn polynomial_matches_step_by_step_fold() {
        for capacity in [1usize, 2, 3, 4, 7, 8, 16, 1000] {
            for key in ["", "a", "Messi", "C. Ronaldo", "Neymar Jr.", "Xavi"] {
                assert_eq!(
                    Polynomial31.bucket(key, capacity),
                    Some(reference_hash(key, capacity)),
                    "{key} @ {capacity}"
                );
            }
        }
    }

    #[test]
    fn polynomial_known_values() {
        assert_eq!(Polynomial31.bucket("a", 4), Some(1));
        assert_eq!(Polynomial31.bucket("ab", 5), Some(0));
        assert_eq!(Polynomial31.bucket("ab", 8), Some(1));
        assert_eq!(Polynomial31.bucket("ab", 16), Some(1));
        assert_eq!(Polynomial31.bucket("anything", 1), Some(0));
    }

    #[test]
    fn polynomial_uses_utf16_units() {
        // U+1F600 is the surrogate pair D83D DE00.
        let expected = (31 * (0xD83D % 1000) + 0xDE00) % 1000;
        assert_eq!(Polynomial31.bucket("\u{1F600}", 1000), Some(expected));
    }

    #[test]
    fn polynomial_does_not_overflow_on_huge_capacity() {
        let key = "\u{FFFF}".repeat(64);
        let index = Polynomial31.bucket(&key, usize::MAX).unwrap();
        assert!(index < usize::MAX);
    }

    #[test]
    fn zero_capacity_has_no_bucket() {
        assert_eq!(Polynomial31.bucket("", 0), None);
        assert_eq!(Polynomial31.bucket("key", 0), None);

        let digest: Digest<BuildHasherDefault<SipHasher>> = Digest::default();
        assert_eq!(digest.bucket("key", 0), None);
    }

    #[test]
    fn digest_is_stable_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let digest: Digest<BuildHasherDefault<SipHasher>> = Digest::default();
        for _ in 0..500 {
            let key = format!("key_{:016X}", rng.random::<u64>());
            let capacity = rng.random_range(1..4096usize);
            let index = digest.bucket(&key, capacity).unwrap();
            assert!(index < capacity);
            assert_eq!(digest.bucket(&key, capacity), Some(index));
        }
    }

    #[test]
    fn digest_reduces_one_hash() {
        let digest: Digest<BuildHasherDefault<SipHasher>> = Digest::default();
        let full = digest.hasher().hash_one("Messi");
        for capacity in [4usize, 8, 16, 32] {
            assert_eq!(
                digest.bucket("Messi", capacity),
                Some((full % capacity as u64) as usize)
            );
        }
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn fold_digest_in_range() {
        let digest = FoldDigest::default();
        for capacity in [1usize, 5, 64] {
            assert!(digest.bucket("Iniesta", capacity).unwrap() < capacity);
        }
    }
}
