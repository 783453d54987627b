/// A linear value axis with "nice" round tick steps. Zero is always in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

fn nice_number(x: f64, round: bool) -> f64 {
    let exponent = x.log10().floor();
    let magnitude = 10f64.powi(exponent as i32);
    let fraction = x / magnitude;
    let nice = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

impl AxisScale {
    pub fn new(data_min: f64, data_max: f64, max_ticks: usize) -> Self {
        let mut lo = data_min.min(0.0);
        let mut hi = data_max.max(0.0);
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo + 1.0;
        }
        let range = nice_number(hi - lo, false);
        let step = nice_number(range / (max_ticks.max(2) - 1) as f64, true);
        lo = (lo / step).floor() * step;
        hi = (hi / step).ceil() * step;
        Self {
            min: lo,
            max: hi,
            step,
        }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Position of `value` between `top` (max) and `bottom` (min).
    pub fn project(&self, value: f64, top: f32, bottom: f32) -> f32 {
        let t = (value - self.min) / (self.max - self.min);
        bottom - (t as f32) * (bottom - top)
    }
}
