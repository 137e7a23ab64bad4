//! Acceleration envelopes.
//!
//! Each envelope is a speed-dependent acceleration bound defined by a
//! breakpoint table and linear interpolation between breakpoints.

use super::interp;

/// Lower acceleration bound for the stock envelope (m/s²).
pub const A_CRUISE_MIN: f64 = -1.2;

/// Speed-dependent acceleration bounds.
pub trait AccelerationEnvelope {
    /// Eco profile minimum (m/s²).
    fn eco_min(&self, v_ego: f64) -> f64;
    /// Eco profile maximum (m/s²).
    fn eco_max(&self, v_ego: f64) -> f64;
    /// Sport profile minimum (m/s²).
    fn sport_min(&self, v_ego: f64) -> f64;
    /// Sport profile maximum (m/s²).
    fn sport_max(&self, v_ego: f64) -> f64;
    /// Stock maximum (m/s²). The stock minimum is [`A_CRUISE_MIN`].
    fn stock_max(&self, v_ego: f64) -> f64;
}

/// Breakpoint table: speeds (m/s) and values (m/s²).
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeTable {
    pub breakpoints: &'static [f64],
    pub values: &'static [f64],
}

impl EnvelopeTable {
    pub fn eval(&self, v_ego: f64) -> f64 {
        interp(v_ego, self.breakpoints, self.values)
    }
}

const STOCK_MAX: EnvelopeTable = EnvelopeTable {
    breakpoints: &[0.0, 10.0, 25.0, 40.0],
    values: &[1.6, 1.2, 0.8, 0.6],
};

const CUSTOM_MIN_BP: &[f64] = &[0.0, 2.0, 2.01, 11.0, 11.01, 18.0, 18.01, 28.0, 28.01, 33.0, 55.0];
const CUSTOM_MAX_BP: &[f64] = &[0.0, 3.0, 6.0, 8.0, 11.0, 15.0, 20.0, 25.0, 30.0, 55.0];

const ECO_MIN: EnvelopeTable = EnvelopeTable {
    breakpoints: CUSTOM_MIN_BP,
    values: &[-0.48, -0.48, -0.40, -0.40, -0.40, -0.36, -0.32, -0.28, -0.28, -0.25, -0.25],
};

const ECO_MAX: EnvelopeTable = EnvelopeTable {
    breakpoints: CUSTOM_MAX_BP,
    values: &[3.5, 3.3, 1.7, 1.1, 0.76, 0.62, 0.47, 0.36, 0.28, 0.09],
};

const SPORT_MIN: EnvelopeTable = EnvelopeTable {
    breakpoints: CUSTOM_MIN_BP,
    values: &[-0.50, -0.50, -0.42, -0.42, -0.42, -0.42, -0.40, -0.35, -0.35, -0.30, -0.30],
};

const SPORT_MAX: EnvelopeTable = EnvelopeTable {
    breakpoints: CUSTOM_MAX_BP,
    values: &[3.5, 3.5, 3.0, 2.6, 1.4, 1.0, 0.7, 0.6, 0.38, 0.2],
};

/// Table-driven envelopes with the default tuning.
#[derive(Debug, Clone, Copy)]
pub struct TabulatedEnvelope {
    pub stock_max: EnvelopeTable,
    pub eco_min: EnvelopeTable,
    pub eco_max: EnvelopeTable,
    pub sport_min: EnvelopeTable,
    pub sport_max: EnvelopeTable,
}

impl Default for TabulatedEnvelope {
    fn default() -> Self {
        Self {
            stock_max: STOCK_MAX,
            eco_min: ECO_MIN,
            eco_max: ECO_MAX,
            sport_min: SPORT_MIN,
            sport_max: SPORT_MAX,
        }
    }
}

impl AccelerationEnvelope for TabulatedEnvelope {
    fn eco_min(&self, v_ego: f64) -> f64 {
        self.eco_min.eval(v_ego)
    }

    fn eco_max(&self, v_ego: f64) -> f64 {
        self.eco_max.eval(v_ego)
    }

    fn sport_min(&self, v_ego: f64) -> f64 {
        self.sport_min.eval(v_ego)
    }

    fn sport_max(&self, v_ego: f64) -> f64 {
        self.sport_max.eval(v_ego)
    }

    fn stock_max(&self, v_ego: f64) -> f64 {
        self.stock_max.eval(v_ego)
    }
}
