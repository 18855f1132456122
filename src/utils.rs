use std::ops::Range;

/// Largest magnitude an axis end may take.
/// The tick computation needs a finite span between the ends.
pub const AXIS_LIMIT: f64 = 1e300;

pub fn min_and_max<'a, I, T>(mut s: I) -> Option<(T, T)>
where
    I: Iterator<Item = &'a T>,
    T: 'a + std::cmp::PartialOrd + Clone,
{
    let (mut min, mut max) = match s.next() {
        Some(v) => (v, v),
        None => return None,
    };
    for es in s {
        if es > max {
            max = es
        } else if es < min {
            min = es
        }
    }
    Some((min.clone(), max.clone()))
}

/// Clamp both ends into `±AXIS_LIMIT` and pad them by `fraction` of the span.
/// A flat range is widened by `flat_pad`, or by 5% of the value when that is larger,
/// so the ends stay distinct also for huge values.
fn padded_range(min: f64, max: f64, fraction: f64, flat_pad: f64) -> Range<f64> {
    let min = min.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let max = max.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let pad = if max > min {
        // each end scaled before the difference, the span itself may not fit in f64
        max * fraction - min * fraction
    } else {
        flat_pad.max(max.abs() / 20.0)
    };
    min - pad..max + pad
}

/// Range for the x axis, the distances are plotted as f64.
/// A single distance would collapse the axis, so widen it by one on each side.
pub fn x_range(min_max: Option<(i64, i64)>) -> Range<f64> {
    match min_max {
        None => 0.0..1.0,
        Some((xmin, xmax)) => padded_range(xmin as f64, xmax as f64, 0.0, 1.0),
    }
}

/// Range for the y axis, padded by 5% of the span on both sides.
pub fn y_range(min_max: Option<(f64, f64)>) -> Range<f64> {
    match min_max {
        None => 0.0..1.0,
        Some((ymin, ymax)) => padded_range(ymin, ymax, 0.05, 1.0),
    }
}
