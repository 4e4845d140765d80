//! Random index selection used when filling a mosaic grid

use rand::Rng;

/// Pick an index uniformly from `0..count`
///
/// Returns `None` when there is nothing to pick from.
pub fn select_uniform_index<R: Rng>(count: usize, rng: &mut R) -> Option<usize> {
    (count > 0).then(|| rng.random_range(0..count))
}

/// Pick an index with probability proportional to its weight
///
/// Negative and non-finite weights count as zero. When every weight is zero the
/// selection falls back to uniform so a library of all-zero tiles still fills
/// the grid.
pub fn select_weighted_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let sanitized = |weight: f64| {
        if weight.is_finite() {
            weight.max(0.0)
        } else {
            0.0
        }
    };

    let total: f64 = weights.iter().copied().map(sanitized).sum();
    if total <= 0.0 {
        return select_uniform_index(weights.len(), rng);
    }

    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += sanitized(weight);
        if target < cumulative {
            return Some(index);
        }
    }

    // Floating point accumulation can leave `target` a hair above the last bound
    weights.len().checked_sub(1)
}
