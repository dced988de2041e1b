/// Minimum subset size required before a node may be split.
pub const MIN_SAMPLES_SPLIT: usize = 2;
/// Number of neighbours consulted by the k-nearest-neighbour vote.
pub const DEFAULT_K: usize = 3;
/// Gains within this distance of each other, or of zero, are treated as equal.
pub const GAIN_TOLERANCE: f64 = 1e-12;
