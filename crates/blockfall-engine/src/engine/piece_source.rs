use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies the kind of each newly spawned piece.
///
/// The session asks for exactly one kind per spawn. Inject a deterministic
/// source to make games reproducible.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

impl<T> PieceSource for Box<T>
where
    T: PieceSource + ?Sized,
{
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}

/// Uniformly random pieces drawn from a seeded PCG32 generator.
///
/// Every spawn is an independent draw; there is no bag and no preview.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSeed, PieceSource, RandomPieceSource};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = RandomPieceSource::with_seed(seed);
/// let mut b = RandomPieceSource::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.next_piece(), b.next_piece());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for RandomPieceSource {
    fn next_piece(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed, repeating sequence of kinds.
///
/// Useful for scripted games and tests that need a known spawn order.
#[derive(Debug, Clone)]
pub struct FixedPieceSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl FixedPieceSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for FixedPieceSource {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the PCG32 generator behind
/// [`RandomPieceSource`]. Seeds print and parse as 32 hex digits, which is
/// also their serialized form.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(#[error(not(source))] String),
}

impl FromStr for PieceSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::InvalidLength(s.len()));
        }
        // `from_str_radix` alone would also take a leading sign.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SeedParseError::InvalidDigit(s.to_owned()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|_| SeedParseError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
