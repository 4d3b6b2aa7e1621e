use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

const NICE_MAX_PASSES: usize = 10;

/// Monotonic mapping from a data domain interval to a pixel range.
///
/// Both ends of domain and range are explicit, so an inverted pixel axis
/// (`[height, 0]`) is expressed by the range alone. Construction validates
/// the endpoints; `scale`/`invert` are then plain arithmetic, matching how
/// layout code uses them in tight per-point loops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> PlotResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(PlotError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(PlotError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Identity mapping over a pixel span, used by precomputed-pixel layouts.
    pub fn identity(extent: f64) -> PlotResult<Self> {
        Self::new((0.0, extent), (0.0, extent))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to its pixel coordinate.
    #[must_use]
    pub fn scale(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel coordinate back to its domain value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Returns a copy with a replacement domain and the same range.
    pub fn with_domain(self, domain: (f64, f64)) -> PlotResult<Self> {
        Self::new(domain, (self.range_start, self.range_end))
    }

    /// Expands the domain outward to friendly tick boundaries.
    ///
    /// Follows the d3 rounding ladder: steps are powers of ten times 1, 2
    /// or 5, and the pass repeats until the chosen step stabilizes.
    #[must_use]
    pub fn nice(self, tick_count: usize) -> Self {
        let (lo, hi, descending) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end, false)
        } else {
            (self.domain_end, self.domain_start, true)
        };

        let mut start = lo;
        let mut stop = hi;
        let mut prestep = 0.0;

        for _ in 0..NICE_MAX_PASSES {
            let step = tick_increment(start, stop, tick_count);
            if step == prestep || step == 0.0 || !step.is_finite() {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = step;
        }

        let (domain_start, domain_end) = if descending {
            (stop, start)
        } else {
            (start, stop)
        };
        Self {
            domain_start,
            domain_end,
            range_start: self.range_start,
            range_end: self.range_end,
        }
    }
}

/// Tick step between `start` and `stop` for roughly `count` intervals.
///
/// Positive results are literal steps; negative results encode a divisor
/// (`-q` means step `1/q`), mirroring the reference tick algorithm so
/// sub-unit domains round cleanly.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50.0_f64.sqrt();
    let e5 = 10.0_f64.sqrt();
    let e2 = 2.0_f64.sqrt();

    let step = (stop - start) / count.max(1) as f64;
    if step <= 0.0 || !step.is_finite() {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);

    if power >= 0.0 {
        let factor = if error >= e10 {
            10.0
        } else if error >= e5 {
            5.0
        } else if error >= e2 {
            2.0
        } else {
            1.0
        };
        factor * 10.0_f64.powf(power)
    } else {
        let factor = if error >= e10 {
            10.0
        } else if error >= e5 {
            5.0
        } else if error >= e2 {
            2.0
        } else {
            1.0
        };
        -(10.0_f64.powf(-power)) / factor
    }
}
