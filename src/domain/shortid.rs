//! Short, seeded, per-parse unique identifiers for outline entries.
//!
//! Every id packs a monotonically increasing counter, the worker number and
//! random padding. Characters are drawn from an alphabet shuffled with the
//! seed, so ids look random while staying unique within one generator.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::error::{DomainError, DomainResult};

/// Default alphabet: 64 URL-safe characters.
pub const DEFAULT_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";

/// Default seed used when the caller does not pick one.
pub const DEFAULT_ID_SEED: u64 = 2342;

/// Length of every generated id.
pub const ID_LEN: usize = 9;

const ALPHABET_LEN: usize = 64;
const COUNTER_DIGITS: usize = 5;
const MAX_WORKER: u8 = 32;
const RANDOM_DIGITS: usize = ID_LEN - COUNTER_DIGITS - 1;

/// Generator for short entry identifiers.
///
/// Create one per parse and pass it along; there is no process-wide instance.
#[derive(Debug)]
pub struct IdGenerator {
    alphabet: Vec<char>,
    worker: u8,
    rng: StdRng,
    counter: u64,
    capacity: u64,
}

impl IdGenerator {
    /// Create a generator for `worker` using a custom 64-character alphabet.
    pub fn new(worker: u8, alphabet: &str, seed: u64) -> DomainResult<Self> {
        if worker >= MAX_WORKER {
            return Err(DomainError::IdGenerator(format!(
                "worker {} out of range 0..{}",
                worker, MAX_WORKER
            )));
        }

        let mut chars: Vec<char> = alphabet.chars().collect();
        if chars.len() != ALPHABET_LEN {
            return Err(DomainError::IdGenerator(format!(
                "alphabet must contain exactly {} characters, got {}",
                ALPHABET_LEN,
                chars.len()
            )));
        }
        let distinct: HashSet<char> = chars.iter().copied().collect();
        if distinct.len() != chars.len() {
            return Err(DomainError::IdGenerator(
                "alphabet contains duplicate characters".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        chars.shuffle(&mut rng);

        Ok(Self {
            alphabet: chars,
            worker,
            rng,
            counter: 0,
            capacity: (ALPHABET_LEN as u64).pow(COUNTER_DIGITS as u32),
        })
    }

    /// Generator with the default alphabet and worker 0.
    pub fn seeded(seed: u64) -> DomainResult<Self> {
        Self::new(0, DEFAULT_ALPHABET, seed)
    }

    /// Cap the number of ids this generator hands out.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = self.capacity.min(capacity);
        self
    }

    /// Produce the next identifier.
    pub fn generate(&mut self) -> DomainResult<String> {
        if self.counter >= self.capacity {
            return Err(DomainError::IdGenerator(format!(
                "id space exhausted after {} ids",
                self.capacity
            )));
        }

        let mut id = String::with_capacity(ID_LEN);
        let mut rest = self.counter;
        for _ in 0..COUNTER_DIGITS {
            id.push(self.alphabet[(rest % ALPHABET_LEN as u64) as usize]);
            rest /= ALPHABET_LEN as u64;
        }
        id.push(self.alphabet[usize::from(self.worker)]);
        for _ in 0..RANDOM_DIGITS {
            id.push(self.alphabet[self.rng.random_range(0..ALPHABET_LEN)]);
        }

        self.counter += 1;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_seed_when_generating_then_sequences_match() {
        let mut a = IdGenerator::seeded(7).unwrap();
        let mut b = IdGenerator::seeded(7).unwrap();
        for _ in 0..50 {
            assert_eq!(a.generate().unwrap(), b.generate().unwrap());
        }
    }

    #[test]
    fn given_many_ids_when_generating_then_all_unique_and_short() {
        let mut ids = IdGenerator::seeded(DEFAULT_ID_SEED).unwrap();
        let mut seen = HashSet::new();
        for _ in 0..5000 {
            let id = ids.generate().unwrap();
            assert_eq!(id.chars().count(), ID_LEN);
            assert!(id.chars().all(|c| DEFAULT_ALPHABET.contains(c)));
            assert!(seen.insert(id), "duplicate id");
        }
    }

    #[test]
    fn given_short_alphabet_when_creating_then_fails() {
        let err = IdGenerator::new(0, "abc", 1).unwrap_err();
        assert!(err.to_string().contains("exactly 64"));
    }

    #[test]
    fn given_duplicate_alphabet_when_creating_then_fails() {
        let alphabet: String = std::iter::repeat('a').take(64).collect();
        let err = IdGenerator::new(0, &alphabet, 1).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn given_worker_out_of_range_when_creating_then_fails() {
        assert!(IdGenerator::new(32, DEFAULT_ALPHABET, 1).is_err());
        assert!(IdGenerator::new(31, DEFAULT_ALPHABET, 1).is_ok());
    }

    #[test]
    fn given_exhausted_counter_when_generating_then_fails() {
        let mut ids = IdGenerator::seeded(1).unwrap();
        ids.counter = (ALPHABET_LEN as u64).pow(COUNTER_DIGITS as u32);
        assert!(ids.generate().is_err());
    }

    #[test]
    fn given_capacity_when_generating_then_fails_after_that_many() {
        let mut ids = IdGenerator::seeded(1).unwrap().with_capacity(2);
        assert!(ids.generate().is_ok());
        assert!(ids.generate().is_ok());
        let err = ids.generate().unwrap_err();
        assert!(err.to_string().contains("exhausted after 2"));
    }
}
