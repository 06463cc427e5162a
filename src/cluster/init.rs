use rand::Rng;

use crate::color::rgb::point_distance_sq;

/// Greedy k-means++ seeding over weighted points.
///
/// The first centroid is drawn with probability proportional to `weights`.
/// Each following centroid is the best of `2 + ⌊ln k⌋` candidates drawn with
/// probability proportional to `weight · D²`, where "best" means the smallest
/// total weighted squared distance once the candidate is added.
///
/// Points already chosen have `D² = 0` and can never be drawn again, so as long
/// as there are more than `k` distinct points the centroids are distinct.
pub fn kmeans_plus_plus<R: Rng>(
    points: &[[f64; 3]],
    weights: &[f64],
    k: usize,
    rng: &mut R,
) -> Vec<[f64; 3]> {
    assert!(!points.is_empty(), "cannot seed centroids from zero points");
    assert_eq!(points.len(), weights.len(), "points and weights must have equal length");

    let n_local_trials = 2 + (k as f64).ln().floor() as usize;
    let mut centroids = Vec::with_capacity(k);

    let first = sample_weighted(weights, rng);
    centroids.push(points[first]);

    let mut closest: Vec<f64> = points
        .iter()
        .map(|p| point_distance_sq(*p, points[first]))
        .collect();

    while centroids.len() < k {
        let mass: Vec<f64> = closest.iter().zip(weights).map(|(d, w)| d * w).collect();
        let potential: f64 = mass.iter().sum();

        if potential <= 0.0 {
            // Every point coincides with a centroid already.
            centroids.push(points[first]);
            continue;
        }

        let mut best: Option<(f64, usize)> = None;
        for _ in 0..n_local_trials {
            let candidate = sample_weighted(&mass, rng);
            let cand_potential: f64 = points
                .iter()
                .zip(weights)
                .zip(&closest)
                .map(|((p, w), &d)| w * d.min(point_distance_sq(*p, points[candidate])))
                .sum();
            match best {
                Some((pot, _)) if pot <= cand_potential => {}
                _ => best = Some((cand_potential, candidate)),
            }
        }

        // `n_local_trials >= 2`, so `best` is always set.
        let chosen = best.map(|(_, idx)| idx).unwrap_or(first);
        centroids.push(points[chosen]);
        for (d, p) in closest.iter_mut().zip(points) {
            *d = d.min(point_distance_sq(*p, points[chosen]));
        }
    }

    centroids
}

/// Draws an index with probability proportional to `mass`.
///
/// Entries with zero mass are never returned unless every entry has zero mass,
/// in which case index 0 is returned.
fn sample_weighted<R: Rng>(mass: &[f64], rng: &mut R) -> usize {
    let mut cumulative = Vec::with_capacity(mass.len());
    let mut acc = 0.0;
    for &m in mass {
        acc += m;
        cumulative.push(acc);
    }
    if acc <= 0.0 {
        return 0;
    }

    let r = rng.gen::<f64>() * acc;
    let idx = cumulative.partition_point(|&c| c <= r);
    if idx < mass.len() && mass[idx] > 0.0 {
        return idx;
    }
    // Float round-off pushed `r` past the last bucket.
    mass.iter().rposition(|&m| m > 0.0).unwrap_or(0)
}
