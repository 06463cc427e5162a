use log::debug;
use rayon::prelude::*;

use crate::color::rgb::point_distance_sq;

/// Points handled per parallel work unit. Fixed so that partial results are
/// merged in the same order whatever the thread count.
const ASSIGN_CHUNK: usize = 4096;

/// Final state of one Lloyd run.
#[derive(Debug, Clone)]
pub struct LloydOutcome {
    pub centroids: Vec<[f64; 3]>,
    pub labels: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
    pub reseeded: usize,
}

/// Per-chunk accumulators produced by one assignment pass.
struct Partial {
    sums: Vec<[u64; 3]>,
    counts: Vec<u64>,
    inertia: f64,
    changed: usize,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Runs Lloyd's algorithm from the given starting centroids.
///
/// `points` hold integer-valued RGB colors and `counts` how many pixels each
/// one stands for. The loop alternates assignment and update until no label
/// changes or `max_iterations` update steps have been made; in the latter case
/// the state at the cap is returned with `converged == false`.
///
/// Centroids that end an assignment pass with no points are re-seeded to the
/// point farthest from every non-empty centroid.
pub fn lloyd(
    points: &[[f64; 3]],
    counts: &[u64],
    mut centroids: Vec<[f64; 3]>,
    max_iterations: usize,
) -> LloydOutcome {
    assert_eq!(points.len(), counts.len(), "points and counts must have equal length");
    assert!(!centroids.is_empty(), "at least one centroid is required");

    let k = centroids.len();
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;
    let mut reseeded = 0;

    loop {
        let pass = assign(points, counts, &centroids, &mut labels);

        if pass.changed == 0 {
            return LloydOutcome { centroids, labels, inertia: pass.inertia, iterations, converged: true, reseeded };
        }
        if iterations == max_iterations {
            debug!("k-means hit the iteration cap ({max_iterations}) with {} labels still moving", pass.changed);
            return LloydOutcome { centroids, labels, inertia: pass.inertia, iterations, converged: false, reseeded };
        }

        iterations += 1;

        let mut empty = Vec::new();
        for j in 0..k {
            let n = pass.counts[j];
            if n == 0 {
                empty.push(j);
            } else {
                let s = pass.sums[j];
                centroids[j] = [s[0] as f64 / n as f64, s[1] as f64 / n as f64, s[2] as f64 / n as f64];
            }
        }
        if !empty.is_empty() {
            reseed_empty(points, &mut centroids, &empty);
            reseeded += empty.len();
        }
    }
}

/// Index of the centroid nearest to `point`; ties go to the lowest index.
#[inline]
pub fn nearest_centroid(point: [f64; 3], centroids: &[[f64; 3]]) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, c) in centroids.iter().enumerate() {
        let d = point_distance_sq(point, *c);
        if d < best_dist {
            best_dist = d;
            best = idx;
        }
    }
    (best, best_dist)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One assignment pass. Writes the new labels in place and returns the merged
/// per-cluster sums, counts, inertia and number of changed labels.
fn assign(points: &[[f64; 3]], counts: &[u64], centroids: &[[f64; 3]], labels: &mut [usize]) -> Partial {
    let k = centroids.len();

    let partials: Vec<Partial> = labels
        .par_chunks_mut(ASSIGN_CHUNK)
        .zip(points.par_chunks(ASSIGN_CHUNK))
        .zip(counts.par_chunks(ASSIGN_CHUNK))
        .map(|((labels, points), counts)| {
            let mut part = Partial {
                sums: vec![[0; 3]; k],
                counts: vec![0; k],
                inertia: 0.0,
                changed: 0,
            };
            for ((label, p), &w) in labels.iter_mut().zip(points).zip(counts) {
                let (idx, dist) = nearest_centroid(*p, centroids);
                if *label != idx {
                    *label = idx;
                    part.changed += 1;
                }
                let s = &mut part.sums[idx];
                s[0] += p[0] as u64 * w;
                s[1] += p[1] as u64 * w;
                s[2] += p[2] as u64 * w;
                part.counts[idx] += w;
                part.inertia += dist * w as f64;
            }
            part
        })
        .collect();

    let mut total = Partial {
        sums: vec![[0; 3]; k],
        counts: vec![0; k],
        inertia: 0.0,
        changed: 0,
    };
    for part in partials {
        for j in 0..k {
            for c in 0..3 {
                total.sums[j][c] += part.sums[j][c];
            }
            total.counts[j] += part.counts[j];
        }
        total.inertia += part.inertia;
        total.changed += part.changed;
    }
    total
}

/// Moves every centroid listed in `empty` (ascending) onto the point whose
/// distance to its nearest active centroid is largest. Centroids re-seeded
/// earlier in the same call count as active for the later ones.
fn reseed_empty(points: &[[f64; 3]], centroids: &mut [[f64; 3]], empty: &[usize]) {
    let mut active: Vec<bool> = vec![true; centroids.len()];
    for &j in empty {
        active[j] = false;
    }

    for &j in empty {
        let mut far_idx = 0;
        let mut far_dist = f64::NEG_INFINITY;
        for (i, p) in points.iter().enumerate() {
            let d = centroids
                .iter()
                .zip(&active)
                .filter(|(_, &on)| on)
                .map(|(c, _)| point_distance_sq(*p, *c))
                .fold(f64::INFINITY, f64::min);
            if d > far_dist {
                far_dist = d;
                far_idx = i;
            }
        }
        debug!("re-seeding empty cluster {j} at point {far_idx} (distance² {far_dist})");
        centroids[j] = points[far_idx];
        active[j] = true;
    }
}
