//! Narrowing searches over ordered sequences.
//!
//! [`ClosestPointFinder`] finds the candidate nearest to a target among points
//! ordered along a 1-D path (one zone edge, for instance) by shrinking an index
//! window instead of scanning every candidate. [`bracket`] performs the same
//! kind of narrowing over a sorted slice of numbers.

use std::cmp::Ordering;

use glam::DVec3;

/// Distance used to rank candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Sum of absolute coordinate differences.
    #[default]
    Manhattan,
    /// Straight-line distance.
    Euclidean,
}

impl DistanceMetric {
    /// Distance between `a` and `b` under this metric.
    #[inline]
    #[must_use]
    pub fn distance(self, a: DVec3, b: DVec3) -> f64 {
        match self {
            DistanceMetric::Manhattan => (a - b).abs().element_sum(),
            DistanceMetric::Euclidean => a.distance(b),
        }
    }
}

/// Nearest-candidate search over a path-ordered point sequence.
///
/// Each step probes `lo`, the midpoint and `hi`, drops the farthest of the
/// three and keeps the other two, in index order, as the next window. When
/// the midpoint itself is the farthest probe the window is halved toward the
/// closer end instead, so the window strictly shrinks every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestPointFinder {
    metric: DistanceMetric,
}

impl ClosestPointFinder {
    /// Finder ranking candidates by `metric`.
    #[must_use]
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    /// Finder ranking by straight-line distance.
    #[must_use]
    pub fn euclidean() -> Self {
        Self::new(DistanceMetric::Euclidean)
    }

    /// The active metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Index of the candidate nearest to `target`, or `None` if `candidates`
    /// is empty. Ties resolve to the lower index.
    pub fn find(&self, target: DVec3, candidates: &[DVec3]) -> Option<usize> {
        let last = candidates.len().checked_sub(1)?;
        let dist = |i: usize| self.metric.distance(target, candidates[i]);

        let (mut lo, mut hi) = (0, last);
        while hi - lo > 1 {
            let mid = (lo + hi).div_ceil(2);
            let mut probes = [(lo, dist(lo)), (mid, dist(mid)), (hi, dist(hi))];
            probes.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

            let (a, b) = (probes[0].0, probes[1].0);
            let (next_lo, next_hi) = (a.min(b), a.max(b));
            if (next_lo, next_hi) == (lo, hi) {
                if dist(lo) <= dist(hi) {
                    hi = mid;
                } else {
                    lo = mid;
                }
            } else {
                lo = next_lo;
                hi = next_hi;
            }
        }

        Some(if dist(lo) <= dist(hi) { lo } else { hi })
    }

    /// Brute-force linear scan with the same metric and tie rule.
    pub fn scan(&self, target: DVec3, candidates: &[DVec3]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|(i, a), (j, b)| {
                self.metric
                    .distance(target, **a)
                    .total_cmp(&self.metric.distance(target, **b))
                    .then(i.cmp(j))
            })
            .map(|(i, _)| i)
    }
}

/// Where a value falls in a sorted slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bracket {
    /// The value equals the entry at this index.
    Exact(usize),
    /// The value lies strictly between these two adjacent entries.
    Between(usize, usize),
    /// The value is below the first entry.
    BeforeFirst,
    /// The value is above the last entry, whose index is carried.
    AfterLast(usize),
}

impl Bracket {
    /// The `(lower, upper)` bounding indices; one side is `None` when the
    /// value lies outside the slice. An exact match bounds itself.
    #[must_use]
    pub fn bounds(self) -> (Option<usize>, Option<usize>) {
        match self {
            Bracket::Exact(i) => (Some(i), Some(i)),
            Bracket::Between(lo, hi) => (Some(lo), Some(hi)),
            Bracket::BeforeFirst => (None, Some(0)),
            Bracket::AfterLast(last) => (Some(last), None),
        }
    }
}

/// Locate `value` in an ascending slice without duplicates.
///
/// Returns `None` for an empty slice or a NaN query.
pub fn bracket(value: f64, sorted: &[f64]) -> Option<Bracket> {
    let last = sorted.len().checked_sub(1)?;
    if value.is_nan() {
        return None;
    }

    let below = |i: usize| sorted[i].total_cmp(&value);
    match below(0) {
        Ordering::Equal => return Some(Bracket::Exact(0)),
        Ordering::Greater => return Some(Bracket::BeforeFirst),
        Ordering::Less => {}
    }
    match below(last) {
        Ordering::Equal => return Some(Bracket::Exact(last)),
        Ordering::Less => return Some(Bracket::AfterLast(last)),
        Ordering::Greater => {}
    }

    // sorted[lo] < value < sorted[hi]
    let (mut lo, mut hi) = (0, last);
    while hi - lo > 1 {
        let mid = (lo + hi).div_ceil(2);
        match below(mid) {
            Ordering::Equal => return Some(Bracket::Exact(mid)),
            Ordering::Less => lo = mid,
            Ordering::Greater => hi = mid,
        }
    }
    Some(Bracket::Between(lo, hi))
}

/// Sort ascending and drop duplicate and NaN entries.
pub fn sorted_unique(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}
