//! Inverting point-count estimates into a particle density
//!
//! Every shape can predict how many points it would emit at a given density.
//! Point counts fall as density grows, so the density matching a target count
//! is found by bracketing the target and bisecting in log space.

use super::EPSILON;

/// Largest density the search will return
const MAX_DENSITY: f64 = 1e6;

/// Bisection rounds once the target is bracketed
const BISECTION_ROUNDS: usize = 48;

/// Relative distance kept from the step edge the bisection converges on
const PLATEAU_MARGIN: f64 = 1e-6;

/// Find the density whose estimated point count is closest to `target`
///
/// `estimate` maps a density to the number of points the shape would emit.
/// It must be non-increasing in density; small plateaus from rounding are fine.
pub fn invert<F>(target: usize, estimate: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let target = target.max(1) as f64;

    // Bracket: `dense` gives at least the target, `sparse` at most.
    let mut dense = 1.0_f64;
    let mut sparse = 1.0_f64;
    if estimate(1.0) >= target {
        loop {
            sparse *= 2.0;
            if sparse >= MAX_DENSITY {
                return MAX_DENSITY;
            }
            if estimate(sparse) <= target {
                break;
            }
            dense = sparse;
        }
    } else {
        loop {
            dense /= 2.0;
            if dense <= EPSILON {
                return EPSILON;
            }
            if estimate(dense) >= target {
                break;
            }
            sparse = dense;
        }
    }

    for _ in 0..BISECTION_ROUNDS {
        let mid = (dense * sparse).sqrt();
        if estimate(mid) >= target {
            dense = mid;
        } else {
            sparse = mid;
        }
    }

    let dense_error = (estimate(dense) - target).abs();
    let sparse_error = (estimate(sparse) - target).abs();
    let density = if dense_error <= sparse_error {
        settle(&estimate, dense, 1.0 - PLATEAU_MARGIN)
    } else {
        settle(&estimate, sparse, 1.0 + PLATEAU_MARGIN)
    };
    log::debug!("Inverted target count {} to density {:.6}", target, density);
    density
}

/// Move `density` off the edge of its plateau when the count there is unchanged
///
/// Generators recompute lengths along slightly different float paths, so a
/// density sitting exactly on a rounding boundary could emit a different
/// count than the estimate predicted.
fn settle<F>(estimate: &F, density: f64, factor: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let inside = density * factor;
    if estimate(inside) == estimate(density) {
        inside
    } else {
        density
    }
}
