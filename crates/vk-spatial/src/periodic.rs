//! Pairwise separation on the periodic domain.

use vk_core::{PeriodicRule, Vec2};

/// Squared separation of `a` from `b` (axis differences taken as `a − b`)
/// on a periodic square of side `domain`.
///
/// Under [`PeriodicRule::Legacy`] only positive differences above `(L/2)²`
/// are shifted, so `separation_squared(a, b)` and `separation_squared(b, a)`
/// may differ.  [`PeriodicRule::MinimumImage`] is symmetric.
#[inline]
pub fn separation_squared(a: Vec2, b: Vec2, domain: f64, rule: PeriodicRule) -> f64 {
    let dx = corrected(a.x - b.x, domain, rule);
    let dy = corrected(a.y - b.y, domain, rule);
    dx * dx + dy * dy
}

#[inline]
fn corrected(d: f64, domain: f64, rule: PeriodicRule) -> f64 {
    match rule {
        PeriodicRule::MinimumImage => d - domain * (d / domain).round(),
        PeriodicRule::Legacy => {
            let half = domain / 2.0;
            let threshold = half * half;
            if d > threshold { d - threshold } else { d }
        }
    }
}
