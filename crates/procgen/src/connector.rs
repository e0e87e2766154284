//! Nearest-neighbour connector: chains of offspring between close anchors.
//!
//! Each anchor links to up to `line_count` of its nearest *higher-indexed*
//! anchors, so every unordered pair is considered once, from its lower end.
//! Selection is a plain scan: O(n^2 * k) for n anchors, fine for the few
//! hundred anchors a field uses. Ties go to the lowest index (strict `<`).

use std::collections::HashSet;

use engine_core::{HeightSampler, MushroomKind};
use rand::Rng;

use crate::config::Span;
use crate::instance::{blend_planar, lerp, MushroomInstance};
use crate::placement::{ground, SkippedPlacement};

/// One offspring and where along its chain it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLink {
    /// Blend factor from start (0) toward end (1), exclusive of both.
    pub t: f32,
    pub instance: MushroomInstance,
}

/// Offspring bred between anchors `start` and `end` (`start < end`).
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub start: usize,
    pub end: usize,
    pub links: Vec<ChainLink>,
}

/// Planar (x, z) distance between two anchors.
pub fn planar_distance(a: &MushroomInstance, b: &MushroomInstance) -> f32 {
    a.planar().distance(b.planar())
}

/// Closest anchor to `anchors[i]` with index > `i` that is not in `linked`.
pub fn nearest_unlinked(
    anchors: &[MushroomInstance],
    i: usize,
    linked: &HashSet<usize>,
) -> Option<usize> {
    let start = anchors.get(i)?;
    let mut closest_dist = f32::INFINITY;
    let mut closest_idx = None;
    for (j, end) in anchors.iter().enumerate().skip(i + 1) {
        if linked.contains(&j) {
            continue;
        }
        let dist = planar_distance(start, end);
        if dist < closest_dist {
            closest_dist = dist;
            closest_idx = Some(j);
        }
    }
    closest_idx
}

/// Up to `k` endpoints for anchor `i`, nearest first.
pub fn select_neighbors(anchors: &[MushroomInstance], i: usize, k: u32) -> Vec<usize> {
    let mut linked = HashSet::new();
    let mut chosen = Vec::with_capacity(k as usize);
    for _ in 0..k {
        match nearest_unlinked(anchors, i, &linked) {
            Some(j) => {
                linked.insert(j);
                chosen.push(j);
            }
            None => break,
        }
    }
    chosen
}

/// One spacing step drawn from `density` (constant when the span is a point).
fn draw_step<R: Rng + ?Sized>(density: Span, rng: &mut R) -> f32 {
    if density.min < density.max {
        rng.gen_range(density.min..density.max)
    } else {
        density.min
    }
}

/// Blend factors for offspring along a segment of `length`.
///
/// Walks from the start in random steps from `density` and emits
/// `pos / length` for every position short of the end, so all values are
/// strictly increasing and lie in `(0, 1)`.
pub fn chain_offsets<R: Rng + ?Sized>(length: f32, density: Span, rng: &mut R) -> Vec<f32> {
    let mut ts = Vec::new();
    let mut pos = draw_step(density, rng);
    while pos < length {
        ts.push(pos / length);
        pos += draw_step(density, rng);
    }
    ts
}

/// Breed the chain between `anchors[start]` and `anchors[end]`.
///
/// The walk runs along the full 3D segment, so chains across a slope get more
/// offspring than their planar footprint alone would give. Offspring heights are re-queried from the terrain at the blended column
/// rather than interpolated, so chains follow the ground between anchors.
/// Offspring with no terrain underneath are left out and reported in `skipped`.
pub fn breed_chain<H, R>(
    anchors: &[MushroomInstance],
    start: usize,
    end: usize,
    density: Span,
    heights: &H,
    rng: &mut R,
    skipped: &mut Vec<SkippedPlacement>,
) -> Chain
where
    H: HeightSampler + ?Sized,
    R: Rng + ?Sized,
{
    let a = &anchors[start];
    let b = &anchors[end];
    let length = a.position.distance(b.position);

    let mut links = Vec::new();
    for t in chain_offsets(length, density, rng) {
        let column = blend_planar(a, b, t);
        let scale = lerp(a.scale, b.scale, t);
        match ground(heights, column.x, column.y, scale) {
            Ok(y) => links.push(ChainLink {
                t,
                instance: MushroomInstance::blend(a, b, t, y),
            }),
            Err(e) => {
                log::warn!("Skipping offspring {}->{} at t={:.3}: {}", start, end, t, e);
                skipped.push(SkippedPlacement {
                    kind: MushroomKind::Offspring,
                    x: column.x,
                    z: column.y,
                });
            }
        }
    }

    Chain { start, end, links }
}

/// Connect every anchor to up to `line_count` nearest higher-indexed anchors.
pub fn connect_anchors<H, R>(
    anchors: &[MushroomInstance],
    line_count: u32,
    density: Span,
    heights: &H,
    rng: &mut R,
) -> (Vec<Chain>, Vec<SkippedPlacement>)
where
    H: HeightSampler + ?Sized,
    R: Rng + ?Sized,
{
    let mut chains = Vec::new();
    let mut skipped = Vec::new();

    for i in 0..anchors.len() {
        for j in select_neighbors(anchors, i, line_count) {
            chains.push(breed_chain(anchors, i, j, density, heights, rng, &mut skipped));
        }
    }

    log::debug!(
        "Connected {} chains with {} offspring",
        chains.len(),
        chains.iter().map(|c| c.links.len()).sum::<usize>()
    );
    (chains, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{FlatGround, Rgba, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f32, z: f32) -> MushroomInstance {
        MushroomInstance {
            position: Vec3::new(x, 0.0, z),
            tilt_x: 0.0,
            tilt_z: 0.0,
            scale: 1.0,
            color: Rgba::WHITE,
        }
    }

    fn scattered(n: usize, seed: u64) -> Vec<MushroomInstance> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| at(rng.gen_range(0.0..500.0), rng.gen_range(0.0..500.0)))
            .collect()
    }

    #[test]
    fn picks_nearest_higher_index() {
        let anchors = vec![at(0.0, 0.0), at(50.0, 0.0), at(10.0, 0.0), at(30.0, 0.0)];
        assert_eq!(select_neighbors(&anchors, 0, 3), vec![2, 3, 1]);
        // Anchor 2 may not pick 0 even though it is close.
        assert_eq!(select_neighbors(&anchors, 2, 3), vec![3]);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let anchors = vec![at(0.0, 0.0), at(10.0, 0.0), at(-10.0, 0.0), at(0.0, 10.0)];
        assert_eq!(select_neighbors(&anchors, 0, 1), vec![1]);
        assert_eq!(select_neighbors(&anchors, 0, 3), vec![1, 2, 3]);
    }

    #[test]
    fn ranking_ignores_height() {
        let mut high = at(5.0, 0.0);
        high.position.y = 1000.0;
        let anchors = vec![at(0.0, 0.0), at(6.0, 0.0), high];
        assert_eq!(select_neighbors(&anchors, 0, 1), vec![2]);
    }

    #[test]
    fn k_larger_than_candidates_connects_fewer() {
        let anchors = scattered(6, 1);
        assert_eq!(select_neighbors(&anchors, 4, 3).len(), 1);
        assert_eq!(select_neighbors(&anchors, 3, 3).len(), 2);
        assert!(select_neighbors(&anchors, 5, 3).is_empty());
    }

    #[test]
    fn single_anchor_makes_no_chains() {
        let anchors = vec![at(1.0, 1.0)];
        let mut rng = StdRng::seed_from_u64(0);
        let (chains, skipped) =
            connect_anchors(&anchors, 3, Span::new(5.0, 10.0), &FlatGround(0.0), &mut rng);
        assert!(chains.is_empty());
        assert!(skipped.is_empty());
    }

    #[test]
    fn no_duplicate_pairs_and_no_backward_links() {
        let anchors = scattered(40, 9);
        let mut rng = StdRng::seed_from_u64(4);
        let (chains, _) =
            connect_anchors(&anchors, 3, Span::new(5.0, 10.0), &FlatGround(0.0), &mut rng);
        let mut pairs = HashSet::new();
        for c in &chains {
            assert!(c.end > c.start);
            assert!(pairs.insert((c.start, c.end)), "duplicate chain {:?}", (c.start, c.end));
        }
        for i in 0..anchors.len() {
            let from_i = chains.iter().filter(|c| c.start == i).count();
            assert_eq!(from_i, 3.min(anchors.len() - 1 - i));
        }
    }

    #[test]
    fn offspring_count_bounded_by_density() {
        let density = Span::new(5.0, 10.0);
        let mut rng = StdRng::seed_from_u64(12);
        for length in [0.0, 3.0, 5.0, 9.99, 10.0, 37.5, 100.0, 733.0] {
            for _ in 0..20 {
                let count = chain_offsets(length, density, &mut rng).len() as f32;
                assert!(count >= (length / density.max).floor(), "too few at {}", length);
                assert!(count <= (length / density.min).ceil(), "too many at {}", length);
            }
        }
    }

    #[test]
    fn blend_factors_strictly_increase_inside_unit_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        let ts = chain_offsets(250.0, Span::new(5.0, 10.0), &mut rng);
        assert!(!ts.is_empty());
        assert!(ts.iter().all(|&t| t > 0.0 && t < 1.0));
        assert!(ts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn constant_density_spaces_evenly() {
        let mut rng = StdRng::seed_from_u64(0);
        let ts = chain_offsets(20.0, Span::new(5.0, 5.0), &mut rng);
        assert_eq!(ts, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn offspring_interpolate_and_follow_ground() {
        let mut a = at(0.0, 0.0);
        a.scale = 0.5;
        a.color = Rgba::new(0.0, 0.0, 0.0, 1.0);
        let mut b = at(100.0, 0.0);
        b.scale = 1.5;
        b.color = Rgba::new(1.0, 1.0, 1.0, 1.0);
        b.position.y = 40.0;

        let mut rng = StdRng::seed_from_u64(2);
        let mut skipped = Vec::new();
        let chain = breed_chain(
            &[a, b],
            0,
            1,
            Span::new(5.0, 10.0),
            &FlatGround(3.0),
            &mut rng,
            &mut skipped,
        );
        // Segment length is sqrt(100^2 + 40^2), about 107.7.
        assert!((10..=22).contains(&chain.links.len()));
        for link in &chain.links {
            let o = link.instance;
            assert_eq!(o.position.y, 3.0);
            assert!((o.position.x - 100.0 * link.t).abs() < 1e-3);
            assert!((o.scale - (0.5 + link.t)).abs() < 1e-5);
            assert!((o.color.r - link.t).abs() < 1e-5);
        }
        assert!(skipped.is_empty());
    }

    #[test]
    fn walk_length_includes_height_difference() {
        let a = at(0.0, 0.0);
        let mut b = at(30.0, 0.0);
        b.position.y = 40.0;

        let mut rng = StdRng::seed_from_u64(0);
        let mut skipped = Vec::new();
        let chain = breed_chain(&[a, b], 0, 1, Span::new(5.0, 5.0), &FlatGround(0.0), &mut rng, &mut skipped);
        // 50 units of segment at a constant step of 5: t = 0.1, 0.2, ..., 0.9.
        assert_eq!(chain.links.len(), 9);
        for (n, link) in chain.links.iter().enumerate() {
            let expected = (n + 1) as f32 * 0.1;
            assert!((link.t - expected).abs() < 1e-5, "t {} vs {}", link.t, expected);
            assert!((link.instance.position.x - 30.0 * link.t).abs() < 1e-4);
            assert_eq!(link.instance.position.y, 0.0);
        }
        assert!(skipped.is_empty());
    }

    #[test]
    fn offspring_without_terrain_are_skipped() {
        struct Nowhere;
        impl HeightSampler for Nowhere {
            fn height_at(&self, _x: f32, _z: f32, _size_hint: f32) -> Option<f32> {
                None
            }
        }

        let anchors = [at(0.0, 0.0), at(0.0, 60.0)];
        let mut rng = StdRng::seed_from_u64(2);
        let mut skipped = Vec::new();
        let chain = breed_chain(&anchors, 0, 1, Span::new(5.0, 10.0), &Nowhere, &mut rng, &mut skipped);
        assert!(chain.links.is_empty());
        assert!(skipped.len() >= 6);
        assert!(skipped.iter().all(|s| s.kind == MushroomKind::Offspring && s.x == 0.0));
    }
}
