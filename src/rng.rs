// Copyright 2026 the Flashdeck authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, completely insecure PRNG for queue sampling and re-insertion
/// offsets. Callers supply it explicitly, so tests can drive every
/// randomized code path from a fixed seed.
pub struct SessionRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl SessionRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Initialize the RNG from the system clock.
    #[cfg(feature = "clock")]
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::from_seed(seed)
    }

    fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random number in the range [0, max). `max` must be
    /// positive.
    pub fn below(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Generate a random number in the inclusive range [min, max].
    pub fn between(&mut self, min: u32, max: u32) -> u32 {
        min + self.below(max - min + 1)
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(v: &mut [T], rng: &mut SessionRng) {
    let len = v.len();
    for i in (1..len).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        v.swap(i, j);
    }
}

/// Draw `n` elements uniformly at random, in random order. Returns the whole
/// input, shuffled, when `n >= v.len()`.
pub fn sample<T>(mut v: Vec<T>, n: usize, rng: &mut SessionRng) -> Vec<T> {
    let len = v.len();
    if n >= len {
        shuffle(&mut v, rng);
        return v;
    }
    // Partial Fisher-Yates: the first n slots end up holding the sample.
    for i in 0..n {
        let j = i + rng.below((len - i) as u32) as usize;
        v.swap(i, j);
    }
    v.truncate(n);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut a = SessionRng::from_seed(42);
        let mut b = SessionRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_below_bounds() {
        let mut rng = SessionRng::from_seed(7);
        for _ in 0..1000 {
            assert!(rng.below(10) < 10);
        }
    }

    #[test]
    fn test_between_is_inclusive() {
        let mut rng = SessionRng::from_seed(7);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let n = rng.between(3, 5);
            assert!((3..=5).contains(&n));
            seen[(n - 3) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = SessionRng::from_seed(99);
        let mut v: Vec<u32> = (0..50).collect();
        shuffle(&mut v, &mut rng);
        assert_eq!(v.len(), 50);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_sample_draws_distinct_elements() {
        let mut rng = SessionRng::from_seed(123);
        let v: Vec<u32> = (0..25).collect();
        let drawn = sample(v, 10, &mut rng);
        assert_eq!(drawn.len(), 10);
        let mut sorted = drawn.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
        assert!(drawn.iter().all(|n| *n < 25));
    }

    #[test]
    fn test_sample_of_small_input_returns_everything() {
        let mut rng = SessionRng::from_seed(123);
        let v: Vec<u32> = (0..4).collect();
        let mut drawn = sample(v, 10, &mut rng);
        drawn.sort();
        assert_eq!(drawn, vec![0, 1, 2, 3]);
    }
}
