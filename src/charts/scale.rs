//! Linear scales and tick generation.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Maps a continuous domain onto a continuous pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Scale over the observed extent; `NaN` domain when there is none.
    pub fn from_extent(extent: Option<(f64, f64)>, range: [f64; 2]) -> Self {
        let (min, max) = extent.unwrap_or((f64::NAN, f64::NAN));
        Self::new([min, max], range)
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Map a domain value into the range.
    ///
    /// A collapsed domain sends everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Roughly `count` evenly spaced, human friendly values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain[0], self.domain[1], count as f64)
    }

    /// Formatter matching the precision of [`LinearScale::ticks`].
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String {
        let step = tick_step(self.domain[0], self.domain[1], count as f64);
        let precision = if step.is_finite() && step != 0.0 {
            (-step.abs().log10().floor()).max(0.0) as usize
        } else {
            0
        };
        move |value| format!("{value:.precision$}")
    }
}

/// JavaScript style rounding: halves go towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        // Negative increments encode 1/step so small steps stay exact
        let inv = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || start.is_nan() || stop.is_nan() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let i = i as f64;
            let k = if reverse { i2 - i } else { i1 + i };
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect()
}

fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let (_, _, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_onto_range() {
        let x = LinearScale::new([5.0, 30.1], [0.0, 700.0]);

        assert_eq!(x.domain(), [5.0, 30.1]);
        assert_eq!(x.map(5.0), 0.0);
        assert!((x.map(30.1) - 700.0).abs() < 1e-9);
        assert!((x.map(17.55) - 350.0).abs() < 1e-6);
    }

    #[test]
    fn inverted_range_puts_large_values_on_top() {
        let y = LinearScale::new([8.0, 20.0], [700.0, 0.0]);

        assert_eq!(y.map(8.0), 700.0);
        assert_eq!(y.map(20.0), 0.0);
        assert!(y.map(9.5) > y.map(19.0));
    }

    #[test]
    fn collapsed_domain_maps_to_middle() {
        let x = LinearScale::new([12.0, 12.0], [0.0, 900.0]);
        assert_eq!(x.map(12.0), 450.0);
    }

    #[test]
    fn missing_extent_gives_nan_domain() {
        let x = LinearScale::from_extent(None, [0.0, 900.0]);

        assert!(x.domain()[0].is_nan());
        assert!(x.map(3.0).is_nan());
        assert!(x.ticks(10).is_empty());
    }

    #[test]
    fn ticks_use_round_steps() {
        let x = LinearScale::new([5.0, 30.1], [0.0, 700.0]);
        let ticks = x.ticks(10);

        assert_eq!(ticks.first(), Some(&6.0));
        assert_eq!(ticks.last(), Some(&30.0));
        assert_eq!(ticks.len(), 13);
    }

    #[test]
    fn fractional_ticks_stay_exact() {
        let y = LinearScale::new([0.0, 1.0], [100.0, 0.0]);
        let ticks = y.ticks(10);

        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        let format = y.tick_format(10);
        assert_eq!(format(0.3), "0.3");
    }

    #[test]
    fn integer_steps_format_without_decimals() {
        let x = LinearScale::new([5.0, 30.1], [0.0, 700.0]);
        let format = x.tick_format(10);
        assert_eq!(format(12.0), "12");
    }
}
