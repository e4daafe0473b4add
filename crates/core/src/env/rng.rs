//! Deterministic random number generation for creature decisions.
//!
//! Arbitration draws (weighted action selection, wander steps) must come
//! from a generator that is threaded through the decision context, never
//! from process-global state. Given the same seed, a simulation replays
//! identically, which the regression tests rely on.

/// Stateful PCG-XSH-RR generator carried by a decision context.
///
/// PCG keeps 64 bits of LCG state and permutes it into 32-bit output.
/// It is small, fast, and passes the usual statistical batteries, which is
/// more than enough for weighted ticket draws.
#[derive(Clone, Copy, Debug)]
pub struct DecisionRng {
    state: u64,
}

impl DecisionRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed, typically the output of
    /// [`combine_seed`] for the current creature turn.
    pub fn seeded(seed: u64) -> Self {
        // One warm-up step so low-entropy seeds (0, 1, ...) diverge
        // immediately instead of sharing their first few outputs.
        let mut rng = Self { state: seed };
        rng.advance();
        rng
    }

    #[inline]
    fn advance(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// Draws the next 32-bit value and advances the state.
    pub fn next_u32(&mut self) -> u32 {
        self.advance();
        let state = self.state;

        // XSH-RR output permutation: xorshift the high bits down, then
        // rotate by the top five bits of state.
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    /// Draws a uniform value in `[0, bound)`. Returns 0 for `bound == 0`.
    ///
    /// Plain modulo reduction; the bias is negligible for the small bounds
    /// used by arbitration (total candidate weight).
    pub fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.next_u64() % bound
    }
}

/// Combines per-turn entropy sources into one seed.
///
/// `game_seed` is fixed for a whole simulation run; `turn` is the scheduler's
/// turn counter; `actor` is the deciding creature. Mixing all three gives
/// every creature turn an independent stream while keeping full replays
/// deterministic.
pub fn combine_seed(game_seed: u64, turn: u64, actor: u32) -> u64 {
    // SplitMix64-style mixing: multiply by large odd constants, then
    // finish with an avalanche so nearby inputs decorrelate.
    let mut hash = game_seed;
    hash ^= turn.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
