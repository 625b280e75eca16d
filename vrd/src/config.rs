//! Configuration for [`RidgeDetector`](crate::RidgeDetector).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ridge::RidgeRule;
use crate::variance::Reduction;

/// Largest accepted sampling radius.
pub const MAX_RADIUS: usize = 4096;

/// Which implementation of the stages runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// 3-channel LAB, `f64`, one value per operation.
    Reference,
    /// 4-channel LABX, `f32`, four lanes per operation.
    #[default]
    Wide,
}

/// Ridge detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Box radius of the variance blur and sampling distance of the
    /// gradient and ridge stages, in pixels.
    pub radius: usize,
    pub variant: Variant,
    pub ridge_rule: RidgeRule,
    pub reduction: Reduction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: 5,
            variant: Variant::Wide,
            ridge_rule: RidgeRule::AxisScan,
            reduction: Reduction::StdDev,
        }
    }
}

impl Config {
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_ridge_rule(mut self, ridge_rule: RidgeRule) -> Self {
        self.ridge_rule = ridge_rule;
        self
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius > MAX_RADIUS {
            return Err(Error::InvalidConfig(format!(
                "radius must be at most {}, got {}",
                MAX_RADIUS, self.radius
            )));
        }
        Ok(())
    }
}
