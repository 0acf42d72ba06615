//! Activation functions with selectable numerical policy.
//!
//! The recurrent and output layers only ever call `sigmoid`, `tanh` and
//! `exp`; which numerics back those calls is a policy choice that must not
//! leak into the layer code. Three interchangeable strategies:
//!
//! - `Exact`: stdlib transcendental functions.
//! - `Fast`: Schraudolph's bit-manipulation exponential (valid on roughly
//!   [-25, 25]), with sigmoid and tanh composed from it.
//! - `Lookup`: uniform-step tables precomputed over fixed domains;
//!   out-of-domain inputs clamp to the boundary value and never index out
//!   of bounds.
//!
//! Precision differs between strategies; control flow in the callers must
//! not depend on which one is active.

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};

// =============================================================================
// STRATEGY SELECTION
// =============================================================================

/// Which numerical backend evaluates the activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Stdlib `exp`/`tanh` calls.
    #[default]
    Exact,
    /// Schraudolph exponent approximation.
    Fast,
    /// Precomputed uniform-step tables.
    Lookup,
}

/// Domain and resolution of one lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupSpec {
    pub min: f32,
    pub max: f32,
    pub size: usize,
}

impl LookupSpec {
    fn validate(&self, what: &'static str) -> NetworkResult<()> {
        if self.size < 2 {
            return Err(NetworkError::ConfigError {
                message: format!("{} lookup table needs at least 2 entries", what),
            });
        }
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(NetworkError::ConfigError {
                message: format!(
                    "{} lookup domain [{}, {}] is not a valid range",
                    what, self.min, self.max
                ),
            });
        }
        Ok(())
    }
}

/// Table domains for the three functions.
///
/// Defaults reproduce the reference model's tables: sigmoid over
/// [-23, 24], tanh over [-10, 10], exp over [-5, 25], 256 entries each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "LookupConfig::default_sigmoid")]
    pub sigmoid: LookupSpec,
    #[serde(default = "LookupConfig::default_tanh")]
    pub tanh: LookupSpec,
    #[serde(default = "LookupConfig::default_exp")]
    pub exp: LookupSpec,
}

impl LookupConfig {
    fn default_sigmoid() -> LookupSpec {
        LookupSpec {
            min: -23.0,
            max: 24.0,
            size: 256,
        }
    }

    fn default_tanh() -> LookupSpec {
        LookupSpec {
            min: -10.0,
            max: 10.0,
            size: 256,
        }
    }

    fn default_exp() -> LookupSpec {
        LookupSpec {
            min: -5.0,
            max: 25.0,
            size: 256,
        }
    }

    /// Check that every table domain is usable.
    pub fn validate(&self) -> NetworkResult<()> {
        self.sigmoid.validate("sigmoid")?;
        self.tanh.validate("tanh")?;
        self.exp.validate("exp")?;
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            sigmoid: Self::default_sigmoid(),
            tanh: Self::default_tanh(),
            exp: Self::default_exp(),
        }
    }
}

// =============================================================================
// FAST APPROXIMATION
// =============================================================================

// Schraudolph, "A Fast, Compact Approximation of the Exponential Function",
// Neural Computation 11(4), 1999. Writes the biased exponent estimate into
// the high half of an IEEE-754 single.
const EXP_A: f32 = 184.0;
const EXP_C: f32 = 16249.0;

/// Approximate `e^y` for `y` in roughly [-25, 25]; 0 below, `f32::MAX` above.
#[inline]
fn fast_exp(y: f32) -> f32 {
    if y < -25.0 {
        0.0
    } else if y > 25.0 {
        f32::MAX
    } else {
        let hi = (EXP_A * y + EXP_C) as i16;
        f32::from_bits((hi as u16 as u32) << 16)
    }
}

#[inline]
fn fast_sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + fast_exp(-x))
}

#[inline]
fn fast_tanh(x: f32) -> f32 {
    // tanh = (1 - e^(-2x)) / (1 + e^(-2x))
    let e = fast_exp(-2.0 * x);
    (1.0 - e) / (1.0 + e)
}

// =============================================================================
// LOOKUP TABLES
// =============================================================================

#[derive(Debug, Clone)]
struct LookupTable {
    min: f32,
    max: f32,
    step: f32,
    below: f32,
    above: f32,
    values: Vec<f32>,
}

impl LookupTable {
    /// Sample `f` uniformly over `[spec.min, spec.max]`.
    ///
    /// `above` of `None` clamps high inputs to the last table entry.
    fn build(spec: LookupSpec, f: impl Fn(f32) -> f32, below: f32, above: Option<f32>) -> Self {
        let step = (spec.max.abs() + spec.min.abs()) / (spec.size - 1) as f32;
        let values: Vec<f32> = (0..spec.size)
            .map(|i| f(spec.min + i as f32 * step))
            .collect();
        let above = above.unwrap_or_else(|| values[values.len() - 1]);
        Self {
            min: spec.min,
            max: spec.max,
            step,
            below,
            above,
            values,
        }
    }

    #[inline]
    fn eval(&self, x: f32) -> f32 {
        if x <= self.min {
            self.below
        } else if x >= self.max {
            self.above
        } else {
            self.values[((x - self.min) / self.step) as usize]
        }
    }
}

/// The three precomputed tables of the `Lookup` strategy.
#[derive(Debug, Clone)]
pub struct LookupTables {
    sigmoid: LookupTable,
    tanh: LookupTable,
    exp: LookupTable,
}

impl LookupTables {
    /// Build all three tables from exact math.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ConfigError` for an unusable table domain.
    pub fn new(config: &LookupConfig) -> NetworkResult<Self> {
        config.validate()?;
        Ok(Self {
            sigmoid: LookupTable::build(
                config.sigmoid,
                |x| 1.0 / (1.0 + (-x).exp()),
                0.0,
                Some(1.0),
            ),
            tanh: LookupTable::build(config.tanh, f32::tanh, -1.0, Some(1.0)),
            exp: LookupTable::build(config.exp, f32::exp, 0.0, None),
        })
    }
}

// =============================================================================
// ACTIVATION
// =============================================================================

/// Activation evaluator bound to one numerical strategy.
///
/// # Example
///
/// ```rust
/// use textline_blstm::{Activation, ActivationMode};
///
/// let act = Activation::new(ActivationMode::Exact).unwrap();
/// assert!((act.sigmoid(0.0) - 0.5).abs() < 1e-6);
/// assert!((act.tanh(0.0)).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub enum Activation {
    Exact,
    Fast,
    Lookup(LookupTables),
}

impl Activation {
    /// Build an evaluator for `mode`, using the default table domains for
    /// `Lookup`.
    ///
    /// # Errors
    ///
    /// Infallible for the default domains in practice; the `Result` is kept
    /// so custom-domain construction shares the signature.
    pub fn new(mode: ActivationMode) -> NetworkResult<Self> {
        Self::with_lookup(mode, &LookupConfig::default())
    }

    /// Build an evaluator with explicit lookup-table domains.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ConfigError` if `mode` is `Lookup` and a table
    /// domain is unusable.
    pub fn with_lookup(mode: ActivationMode, config: &LookupConfig) -> NetworkResult<Self> {
        Ok(match mode {
            ActivationMode::Exact => Self::Exact,
            ActivationMode::Fast => Self::Fast,
            ActivationMode::Lookup => Self::Lookup(LookupTables::new(config)?),
        })
    }

    /// Logistic sigmoid `1 / (1 + e^-x)`.
    #[inline]
    #[must_use]
    pub fn sigmoid(&self, x: f32) -> f32 {
        match self {
            Self::Exact => 1.0 / (1.0 + (-x).exp()),
            Self::Fast => fast_sigmoid(x),
            Self::Lookup(tables) => tables.sigmoid.eval(x),
        }
    }

    /// Hyperbolic tangent.
    #[inline]
    #[must_use]
    pub fn tanh(&self, x: f32) -> f32 {
        match self {
            Self::Exact => x.tanh(),
            Self::Fast => fast_tanh(x),
            Self::Lookup(tables) => tables.tanh.eval(x),
        }
    }

    /// Natural exponential.
    #[inline]
    #[must_use]
    pub fn exp(&self, x: f32) -> f32 {
        match self {
            Self::Exact => x.exp(),
            Self::Fast => fast_exp(x),
            Self::Lookup(tables) => tables.exp.eval(x),
        }
    }
}
