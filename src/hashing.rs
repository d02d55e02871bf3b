//! Polynomial string hashing and double-hash probe sequences.
//!
//! A key's bytes are treated as digits of a number in a prime base,
//! reduced modulo the bucket count after every step so intermediate
//! values never grow. The two bases are distinct primes larger than the
//! byte alphabet, which keeps the first-slot hash and the probe stride
//! independent of each other.

/// Base for the primary hash. Prime, and larger than any byte value.
pub(crate) const PRIME_A: u64 = 151;

/// Base for the secondary hash that sets the probe stride.
pub(crate) const PRIME_B: u64 = 163;

/// Hashes `key` into `[0, modulus)` by evaluating the polynomial
/// `sum(base^(len-1-i) * key[i])` with Horner's rule, reducing after each
/// step. Arithmetic is widened to `u128` before the multiply so no bucket
/// count a `Vec` can hold will overflow.
pub(crate) fn polynomial_hash(key: &str, base: u64, modulus: u64) -> u64 {
    debug_assert!(modulus > 0, "hash modulus must be nonzero");
    let mut hash: u64 = 0;
    for byte in key.bytes() {
        hash = ((u128::from(hash) * u128::from(base) + u128::from(byte))
            % u128::from(modulus)) as u64;
    }
    hash
}

/// The double-hash probe sequence for a key.
///
/// Attempt `a` yields `(hash_a + a * stride) mod num_buckets`, computed
/// incrementally, with `stride = (hash_b + 1) mod num_buckets`. The `+ 1`
/// keeps the stride nonzero for keys whose secondary hash is zero; when
/// the reduction itself lands on zero (`hash_b == num_buckets - 1`) the
/// stride falls back to 1 so an attempt always moves to a new slot. With
/// a prime bucket count every sequence therefore visits every bucket
/// exactly once.
///
/// At most `num_buckets` indices are yielded, so a walk over a table
/// with no terminating slot ends instead of cycling forever; exhaustion
/// is the caller's table-full signal.
pub(crate) struct ProbeSequence {
    bucket: usize,
    stride: usize,
    num_buckets: usize,
    remaining: usize,
}

impl ProbeSequence {
    pub(crate) fn new(key: &str, num_buckets: usize) -> Self {
        if num_buckets == 0 {
            // Degenerate table: nothing to probe, and no modulus to divide by.
            return ProbeSequence {
                bucket: 0,
                stride: 0,
                num_buckets: 1,
                remaining: 0,
            };
        }
        let modulus = num_buckets as u64;
        let hash_a = polynomial_hash(key, PRIME_A, modulus);
        let hash_b = polynomial_hash(key, PRIME_B, modulus);
        let stride = match (hash_b + 1) % modulus {
            0 => 1,
            s => s as usize,
        };
        ProbeSequence {
            bucket: hash_a as usize,
            stride,
            num_buckets,
            remaining: num_buckets,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let index = self.bucket;
        self.bucket = (self.bucket + self.stride) % self.num_buckets;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference implementation of the hash as written in its power-sum
    /// definition, against which the Horner form is checked.
    fn power_sum_hash(key: &str, base: u64, modulus: u64) -> u64 {
        fn pow_mod(mut base: u128, mut exp: u32, modulus: u128) -> u128 {
            let mut acc: u128 = 1 % modulus;
            base %= modulus;
            while exp > 0 {
                if exp & 1 == 1 {
                    acc = acc * base % modulus;
                }
                base = base * base % modulus;
                exp >>= 1;
            }
            acc
        }
        let bytes: Vec<u8> = key.bytes().collect();
        let len = bytes.len() as u32;
        let m = u128::from(modulus);
        let mut hash: u128 = 0;
        for (i, b) in bytes.iter().enumerate() {
            let term = pow_mod(u128::from(base), len - 1 - i as u32, m) * u128::from(*b) % m;
            hash = (hash + term) % m;
        }
        hash as u64
    }

    /// Invariant: the Horner evaluation equals the power-sum definition
    /// for both bases across assorted keys and moduli.
    #[test]
    fn horner_matches_power_sum_definition() {
        let keys = ["", "a", "cat", "dog", "hash table", "日本語", "k0123456789"];
        for modulus in [1u64, 2, 7, 53, 101, 4099] {
            for key in keys {
                for base in [PRIME_A, PRIME_B] {
                    assert_eq!(
                        polynomial_hash(key, base, modulus),
                        power_sum_hash(key, base, modulus),
                        "key={key:?} base={base} modulus={modulus}"
                    );
                }
            }
        }
    }

    /// Invariant: the hash is deterministic and always lands in
    /// `[0, modulus)`.
    #[test]
    fn hash_is_deterministic_and_in_range() {
        for modulus in [1u64, 3, 53, 1009] {
            for i in 0..200u32 {
                let key = format!("key-{i}");
                let h1 = polynomial_hash(&key, PRIME_A, modulus);
                let h2 = polynomial_hash(&key, PRIME_A, modulus);
                assert_eq!(h1, h2);
                assert!(h1 < modulus);
            }
        }
    }

    /// Invariant: the empty key hashes to zero under any modulus.
    #[test]
    fn empty_key_hashes_to_zero() {
        for modulus in [1u64, 53, 4099] {
            assert_eq!(polynomial_hash("", PRIME_A, modulus), 0);
            assert_eq!(polynomial_hash("", PRIME_B, modulus), 0);
        }
    }

    /// Invariant: each yielded index matches the closed form
    /// `(hash_a + attempt * stride) mod num_buckets` with the stride
    /// derived from the secondary hash.
    #[test]
    fn sequence_matches_closed_form() {
        let num_buckets = 53usize;
        for key in ["cat", "dog", "", "k14", "a longer key with spaces"] {
            let m = num_buckets as u64;
            let hash_a = u128::from(polynomial_hash(key, PRIME_A, m));
            let stride = match (polynomial_hash(key, PRIME_B, m) + 1) % m {
                0 => 1u128,
                s => u128::from(s),
            };
            for (attempt, index) in ProbeSequence::new(key, num_buckets).enumerate() {
                let expected = (hash_a + attempt as u128 * stride) % num_buckets as u128;
                assert_eq!(index as u128, expected, "key={key:?} attempt={attempt}");
            }
        }
    }

    /// Invariant: a sequence yields exactly `num_buckets` indices and then
    /// stops, regardless of the key.
    #[test]
    fn sequence_is_bounded_by_bucket_count() {
        for num_buckets in [1usize, 2, 7, 53] {
            let indices: Vec<usize> = ProbeSequence::new("bounded", num_buckets).collect();
            assert_eq!(indices.len(), num_buckets);
            assert!(indices.iter().all(|&i| i < num_buckets));
        }
    }

    /// Invariant: with a prime bucket count the stride is always coprime
    /// with the capacity, so the sequence visits every bucket exactly
    /// once.
    #[test]
    fn prime_bucket_count_gives_full_cycle() {
        for num_buckets in [2usize, 7, 53] {
            for i in 0..40u32 {
                let key = format!("cycle-{i}");
                let mut seen: Vec<usize> = ProbeSequence::new(&key, num_buckets).collect();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), num_buckets, "key={key:?} m={num_buckets}");
            }
        }
    }

    /// Invariant: zero buckets produce an empty sequence rather than a
    /// division by zero.
    #[test]
    fn zero_buckets_yield_nothing() {
        assert_eq!(ProbeSequence::new("anything", 0).next(), None);
    }
}
