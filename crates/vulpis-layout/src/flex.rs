//! Main-axis space distribution: flex growth and justification.

use vulpis_tree::Justify;

/// Split `free` space between children in proportion to their grow weights.
///
/// Allocations are whole pixels. Each child first gets the floor of its
/// exact share of `floor(free)`; the leftover pixels go one each to the
/// children with the largest fractional parts, earlier children winning
/// ties. The result sums to `floor(free)` whenever any weight is positive.
pub fn distribute_flex(free: f32, grows: &[f32]) -> Vec<f32> {
    let total: f32 = grows.iter().sum();
    if total <= 0.0 || free <= 0.0 {
        return vec![0.0; grows.len()];
    }

    let pool = free.floor();
    let exact: Vec<f32> = grows.iter().map(|g| pool * g / total).collect();
    let mut alloc: Vec<f32> = exact.iter().map(|e| e.floor()).collect();

    let assigned: f32 = alloc.iter().sum();
    let leftover = (pool - assigned).round().max(0.0) as usize;

    let mut order: Vec<usize> = (0..grows.len()).filter(|&i| grows[i] > 0.0).collect();
    // Stable sort keeps child order among equal fractions.
    order.sort_by(|&a, &b| {
        let fa = exact[a] - alloc[a];
        let fb = exact[b] - alloc[b];
        fb.total_cmp(&fa)
    });
    for &i in order.iter().take(leftover) {
        alloc[i] += 1.0;
    }

    alloc
}

/// Leading offset and between-item gap for a justified run of `count`
/// children with `free` space left over and a base `spacing`.
///
/// The space-* modes fold the base spacing into the distributed gap, so
/// space-evenly leaves the same gap at both ends and between items. When
/// the run overflows they fall back to start.
pub fn justify_spacing(justify: Justify, free: f32, count: usize, spacing: f32) -> (f32, f32) {
    let spread = free + spacing * count.saturating_sub(1) as f32;
    match justify {
        Justify::Start => (0.0, spacing),
        Justify::End => (free, spacing),
        Justify::Center => (free / 2.0, spacing),
        Justify::SpaceBetween if count > 1 && free >= 0.0 => (0.0, spread / (count - 1) as f32),
        Justify::SpaceAround if count > 0 && free >= 0.0 => {
            let gap = spread / count as f32;
            (gap / 2.0, gap)
        }
        Justify::SpaceEvenly if count > 0 && free >= 0.0 => {
            let gap = spread / (count + 1) as f32;
            (gap, gap)
        }
        Justify::SpaceBetween | Justify::SpaceAround | Justify::SpaceEvenly => (0.0, spacing),
    }
}
