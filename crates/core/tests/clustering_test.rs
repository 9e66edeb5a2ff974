//! Tests for centroid clustering.
//!
//! Covers the structural guarantees of DensityClusterer over seeded random
//! layouts: partitioning, monotonicity in eps, order independence.

use listscan_core::layout::{DensityClusterer, Partition, SpatialClusterer};
use listscan_core::utils::Point;

#[path = "../benches/common/rng.rs"]
mod rng;

use rng::XorShift64;

fn random_points(seed: u64, n: usize) -> Vec<Point> {
    let mut rng = XorShift64::new(seed);
    (0..n)
        .map(|_| (rng.gen_f64(0.0, 800.0), rng.gen_f64(0.0, 1200.0)))
        .collect()
}

fn partition(points: &[Point], eps: f64) -> Partition {
    DensityClusterer::new(eps).partition(points).unwrap()
}

/// Reference grouping: flood fill over all pairs.
fn brute_force(points: &[Point], eps: f64) -> Vec<Vec<usize>> {
    let n = points.len();
    let mut seen = vec![false; n];
    let mut groups = Vec::new();
    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut stack = vec![start];
        let mut group = Vec::new();
        while let Some(i) = stack.pop() {
            group.push(i);
            for j in 0..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                if !seen[j] && (dx * dx + dy * dy).sqrt() <= eps {
                    seen[j] = true;
                    stack.push(j);
                }
            }
        }
        group.sort_unstable();
        groups.push(group);
    }
    groups.sort();
    groups
}

// ============================================================================
// Partition property
// ============================================================================

#[test]
fn test_clusters_partition_the_input() {
    for seed in 1..=20 {
        let points = random_points(seed, 150);
        let p = partition(&points, 50.0);

        let mut covered: Vec<usize> = p
            .clusters()
            .iter()
            .flat_map(|c| c.members.iter().copied())
            .collect();
        covered.sort_unstable();
        assert_eq!(covered, (0..points.len()).collect::<Vec<_>>(), "seed {seed}");
        assert!(p.clusters().iter().all(|c| !c.members.is_empty()));

        let mut labels: Vec<usize> = p.clusters().iter().map(|c| c.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), p.cluster_count(), "labels must be unique");
    }
}

#[test]
fn test_matches_brute_force_flood_fill() {
    for seed in 1..=10 {
        let points = random_points(seed * 31, 120);
        for eps in [0.0, 25.0, 50.0, 90.0] {
            assert_eq!(
                partition(&points, eps).canonical(),
                brute_force(&points, eps),
                "seed {seed} eps {eps}"
            );
        }
    }
}

// ============================================================================
// Merge monotonicity
// ============================================================================

#[test]
fn test_larger_eps_only_merges() {
    for seed in 1..=10 {
        let points = random_points(seed * 7, 200);
        let fine = partition(&points, 30.0);
        let coarse_labels = partition(&points, 60.0).labels();

        for cluster in fine.clusters() {
            let first = coarse_labels[cluster.members[0]];
            assert!(
                cluster.members.iter().all(|&m| coarse_labels[m] == first),
                "cluster {:?} split at larger eps (seed {seed})",
                cluster.members
            );
        }
        assert!(partition(&points, 60.0).cluster_count() <= fine.cluster_count());
    }
}

// ============================================================================
// Order independence
// ============================================================================

#[test]
fn test_partition_ignores_input_order() {
    for seed in 1..=10 {
        let points = random_points(seed * 13, 100);
        let mut rng = XorShift64::new(seed + 1000);

        // Fisher-Yates shuffle, remembering where each point came from.
        let mut order: Vec<usize> = (0..points.len()).collect();
        for i in (1..order.len()).rev() {
            let j = rng.gen_index(i + 1);
            order.swap(i, j);
        }
        let shuffled: Vec<Point> = order.iter().map(|&i| points[i]).collect();

        let mut remapped: Vec<Vec<usize>> = partition(&shuffled, 50.0)
            .clusters()
            .iter()
            .map(|c| {
                let mut m: Vec<usize> = c.members.iter().map(|&k| order[k]).collect();
                m.sort_unstable();
                m
            })
            .collect();
        remapped.sort();

        assert_eq!(remapped, partition(&points, 50.0).canonical(), "seed {seed}");
    }
}

// ============================================================================
// Single-cluster and edge cases
// ============================================================================

#[test]
fn test_dense_column_is_one_cluster() {
    let points: Vec<Point> = (0..40).map(|i| (100.0, 20.0 + 30.0 * i as f64)).collect();
    assert_eq!(partition(&points, 50.0).cluster_count(), 1);
}

#[test]
fn test_mutually_close_points_are_one_cluster() {
    let points = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (5.0, 30.0)];
    let p = partition(&points, 50.0);
    assert_eq!(p.canonical(), vec![vec![0, 1, 2, 3]]);
}

#[test]
fn test_two_columns_far_apart() {
    let mut points: Vec<Point> = (0..10).map(|i| (50.0, 40.0 * i as f64)).collect();
    points.extend((0..10).map(|i| (400.0, 40.0 * i as f64)));
    let p = partition(&points, 50.0);
    assert_eq!(
        p.canonical(),
        vec![(0..10).collect::<Vec<_>>(), (10..20).collect::<Vec<_>>()]
    );
}

#[test]
fn test_adjacent_columns_within_eps_merge() {
    // Full 2D clustering links neighbouring columns closer than eps.
    let mut points: Vec<Point> = (0..5).map(|i| (0.0, 40.0 * i as f64)).collect();
    points.extend((0..5).map(|i| (45.0, 40.0 * i as f64)));
    assert_eq!(partition(&points, 50.0).cluster_count(), 1);
}

#[test]
fn test_empty_and_single() {
    assert_eq!(partition(&[], 50.0).cluster_count(), 0);
    assert_eq!(partition(&[(1.0, 2.0)], 50.0).canonical(), vec![vec![0]]);
}
