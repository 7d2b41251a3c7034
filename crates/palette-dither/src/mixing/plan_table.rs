//! The pairwise blend table behind mixing-plan dithering.

use std::collections::HashMap;

use crate::color::{DistanceMetric, Rgb};
use crate::matrix::{MatrixError, MatrixOrder, BAYER_MAX_ORDER};
use crate::palette::Palette;

/// Weight of the pair-distance penalty.
const PENALTY_SCALE: f64 = 0.1;

/// Two palette entries and the share of pixels that show the second one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingPlan {
    /// Index shown where the threshold factor is at or above `ratio`
    pub first: u8,
    /// Index shown where the threshold factor is below `ratio`
    pub second: u8,
    /// Share of `second`, `k / n²` for some `k` in `0..n²`
    pub ratio: f64,
}

impl MixingPlan {
    /// Index to emit for a threshold factor in `[0, 1)`.
    #[inline]
    pub fn select(&self, factor: f64) -> u8 {
        if factor < self.ratio {
            self.second
        } else {
            self.first
        }
    }
}

/// One table row: a plan, the color it blends to, and its penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingEntry {
    /// The plan
    pub plan: MixingPlan,
    /// `round(c_first + ratio * (c_second - c_first))`, clamped to 8 bits
    pub blend: Rgb,
    /// `d(c_first, c_second) * 0.1 * (|ratio - 0.5| + 0.5)`
    pub penalty: f64,
    /// `blend` in the metric's working scale
    point: [f64; 3],
}

/// Every pairwise blend of a palette at every ratio of an `n x n` matrix.
///
/// Entries are generated for `i` ascending, `j >= i` ascending and
/// `k` ascending in `0..n²`; a pair with `i == j` only gets `k = 0`. The
/// table therefore holds `N + n² * N * (N - 1) / 2` entries.
///
/// Plans are looked up through the blend color. When two plans blend to
/// the same 8-bit color the one generated later wins, and [`pick`] returns
/// that plan even if the earlier one scored lower.
///
/// Built once, then shared read-only across threads.
///
/// [`pick`]: MixingPlanTable::pick
#[derive(Debug, Clone)]
pub struct MixingPlanTable {
    entries: Vec<MixingEntry>,
    by_blend: HashMap<u32, MixingPlan>,
    metric: DistanceMetric,
    order: usize,
}

/// Norm metrics work on `[0, 1]` channels so the pixel distance and the
/// pair penalty share one scale; the psychovisual metric normalizes
/// internally.
fn working_point(metric: DistanceMetric, color: [f64; 3]) -> [f64; 3] {
    if metric.is_psychovisual() {
        color
    } else {
        [color[0] / 255.0, color[1] / 255.0, color[2] / 255.0]
    }
}

impl MixingPlanTable {
    /// Build the table for `palette` and a threshold matrix of side `order`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOrder`] unless `order` is a power of two in
    /// `2..=256`, the sides a Bayer matrix can take.
    pub fn build(
        palette: &Palette,
        order: usize,
        metric: DistanceMetric,
    ) -> Result<Self, MatrixError> {
        if !order.is_power_of_two() || !(2..=BAYER_MAX_ORDER).contains(&order) {
            return Err(MatrixError::UnsupportedOrder {
                kind: "mixing plan",
                order: MatrixOrder::Square(order),
                supported: format!("powers of two from 2 to {BAYER_MAX_ORDER}"),
            });
        }
        Ok(Self::build_unchecked(palette, order, metric))
    }

    /// `build` for an order already validated by a Bayer matrix.
    pub(crate) fn build_unchecked(
        palette: &Palette,
        order: usize,
        metric: DistanceMetric,
    ) -> Self {
        let n = palette.len();
        let steps = order * order;
        let mut entries = Vec::with_capacity(n + steps * n * n.saturating_sub(1) / 2);
        let mut by_blend = HashMap::new();

        for i in 0..n {
            for j in i..n {
                let ci = palette.value(i);
                let cj = palette.value(j);
                let pair_distance =
                    metric.distance(working_point(metric, ci), working_point(metric, cj));

                let ratios = if i == j { 1 } else { steps };
                for k in 0..ratios {
                    let ratio = k as f64 / steps as f64;
                    let blend = Rgb::from_f64([
                        ci[0] + ratio * (cj[0] - ci[0]),
                        ci[1] + ratio * (cj[1] - ci[1]),
                        ci[2] + ratio * (cj[2] - ci[2]),
                    ]);
                    let plan = MixingPlan {
                        first: i as u8,
                        second: j as u8,
                        ratio,
                    };
                    let penalty = pair_distance * PENALTY_SCALE * ((ratio - 0.5).abs() + 0.5);
                    entries.push(MixingEntry {
                        plan,
                        blend,
                        penalty,
                        point: working_point(metric, blend.to_f64()),
                    });
                    by_blend.insert(blend.to_packed(), plan);
                }
            }
        }

        tracing::debug!(
            colors = n,
            order,
            entries = entries.len(),
            distinct_blends = by_blend.len(),
            "Built mixing plan table"
        );

        Self {
            entries,
            by_blend,
            metric,
            order,
        }
    }

    /// Number of entries, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a table built from a palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matrix side the ratios were generated for.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Entries in generation order.
    pub fn entries(&self) -> &[MixingEntry] {
        &self.entries
    }

    /// Plan stored for a blend color.
    pub fn plan_for_blend(&self, blend: Rgb) -> Option<MixingPlan> {
        self.by_blend.get(&blend.to_packed()).copied()
    }

    /// Best plan for `pixel` (channels on the `0..=255` scale).
    ///
    /// Scores every entry as `d(pixel, blend) + penalty`, keeps the first
    /// minimum, then returns the plan stored for that entry's blend.
    pub fn pick(&self, pixel: [f64; 3]) -> MixingPlan {
        let point = working_point(self.metric, pixel);
        let mut best = &self.entries[0];
        let mut best_score = f64::INFINITY;
        for entry in &self.entries {
            let score = self.metric.distance(point, entry.point) + entry.penalty;
            if score < best_score {
                best_score = score;
                best = entry;
            }
        }
        self.plan_for_blend(best.blend).unwrap_or(best.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bw() -> Palette {
        Palette::from_packed(&[0x000000, 0xFFFFFF]).unwrap()
    }

    #[test]
    fn test_table_size() {
        for (colors, order) in [(2usize, 2usize), (3, 2), (4, 4), (5, 8)] {
            let packed: Vec<u32> = (0..colors as u32).map(|c| c * 0x101010).collect();
            let palette = Palette::from_packed(&packed).unwrap();
            let table = MixingPlanTable::build(&palette, order, DistanceMetric::Psychovisual).unwrap();
            let expected = colors + order * order * colors * (colors - 1) / 2;
            assert_eq!(table.len(), expected, "N={colors}, order={order}");
        }
    }

    #[test]
    fn test_generation_order_and_blends() {
        let table = MixingPlanTable::build(&bw(), 2, DistanceMetric::Psychovisual).unwrap();
        let summary: Vec<(u8, u8, f64, Rgb)> = table
            .entries()
            .iter()
            .map(|e| (e.plan.first, e.plan.second, e.plan.ratio, e.blend))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, 0, 0.0, Rgb::new(0, 0, 0)),
                (0, 1, 0.0, Rgb::new(0, 0, 0)),
                (0, 1, 0.25, Rgb::new(64, 64, 64)),
                (0, 1, 0.5, Rgb::new(128, 128, 128)),
                (0, 1, 0.75, Rgb::new(191, 191, 191)),
                (1, 1, 0.0, Rgb::new(255, 255, 255)),
            ]
        );
    }

    #[test]
    fn test_penalty_grows_away_from_even_mix() {
        let table = MixingPlanTable::build(&bw(), 2, DistanceMetric::Psychovisual).unwrap();
        let e = table.entries();
        // same-color pairs are free
        assert_eq!(e[0].penalty, 0.0);
        assert_eq!(e[5].penalty, 0.0);
        // black/white distance is 1.75 under the psychovisual metric
        assert!((e[3].penalty - 1.75 * 0.1 * 0.5).abs() < 1e-12);
        assert!((e[1].penalty - 1.75 * 0.1 * 1.0).abs() < 1e-12);
        assert!(e[2].penalty > e[3].penalty);
    }

    #[test]
    fn test_collision_keeps_later_plan() {
        // (0, 1, 0.5) blends to 0x808080 first; (2, 2, 0) overwrites it
        let palette = Palette::from_packed(&[0x000000, 0xFFFFFF, 0x808080]).unwrap();
        let table = MixingPlanTable::build(&palette, 2, DistanceMetric::Psychovisual).unwrap();
        let expected = MixingPlan {
            first: 2,
            second: 2,
            ratio: 0.0,
        };
        assert_eq!(table.plan_for_blend(Rgb::new(128, 128, 128)), Some(expected));
        assert_eq!(table.pick([128.0, 128.0, 128.0]), expected);
    }

    #[test]
    fn test_pick_exact_palette_color() {
        let table = MixingPlanTable::build(&bw(), 4, DistanceMetric::Psychovisual).unwrap();
        let plan = table.pick([255.0, 255.0, 255.0]);
        assert_eq!((plan.first, plan.second, plan.ratio), (1, 1, 0.0));
    }

    #[test]
    fn test_pick_mid_gray_mixes_black_and_white() {
        let table = MixingPlanTable::build(&bw(), 4, DistanceMetric::Psychovisual).unwrap();
        let plan = table.pick([128.0, 128.0, 128.0]);
        assert_eq!((plan.first, plan.second), (0, 1));
        assert_eq!(plan.ratio, 0.5);
    }

    #[test]
    fn test_norm_metric_uses_unit_scale() {
        let table = MixingPlanTable::build(&bw(), 2, DistanceMetric::EUCLIDEAN).unwrap();
        let e = table.entries();
        // unit-scale distance black/white = sqrt(3)
        let expected = 3f64.sqrt() * 0.1 * 0.5;
        assert!((e[3].penalty - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_orders_without_a_bayer_matrix() {
        let palette = Palette::from_packed(&[0xFF0000, 0xFFFFFF]).unwrap();
        for order in [0, 1, 3, 6, 512] {
            assert!(
                matches!(
                    MixingPlanTable::build(&palette, order, DistanceMetric::Psychovisual),
                    Err(MatrixError::UnsupportedOrder {
                        kind: "mixing plan",
                        ..
                    })
                ),
                "order {order} should be rejected"
            );
        }
    }

    #[test]
    fn test_select_threshold() {
        let plan = MixingPlan {
            first: 3,
            second: 7,
            ratio: 0.25,
        };
        assert_eq!(plan.select(0.0), 7);
        assert_eq!(plan.select(0.1875), 7);
        assert_eq!(plan.select(0.25), 3);
        assert_eq!(plan.select(0.9), 3);
    }
}
