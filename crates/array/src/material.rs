use std::fmt;

use serde::Serialize;

use crate::ArrayError;

/// Identifies one of the three independent gain contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementFactor {
    /// Ag/SiO₂ Bragg reflector stack.
    Bragg,
    /// Graphene plasmonic coupling.
    Plasmonic,
    /// InGaAs/AlInAs hyperbolic superlattice.
    Hyperbolic,
}

impl fmt::Display for EnhancementFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnhancementFactor::Bragg => "bragg",
            EnhancementFactor::Plasmonic => "plasmonic",
            EnhancementFactor::Hyperbolic => "hyperbolic",
        };
        f.write_str(name)
    }
}

/// Multiplicative metamaterial gain applied to the base Casimir pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialEnhancement {
    bragg: f64,
    plasmonic: f64,
    hyperbolic: f64,
}

impl MaterialEnhancement {
    pub const REFERENCE_BRAGG: f64 = 850.0;
    pub const REFERENCE_PLASMONIC: f64 = 380.0;
    pub const REFERENCE_HYPERBOLIC: f64 = 3.7;

    /// Build an enhancement from its three factors, rejecting any that is not strictly positive.
    pub fn new(bragg: f64, plasmonic: f64, hyperbolic: f64) -> Result<Self, ArrayError> {
        for (factor, value) in [
            (EnhancementFactor::Bragg, bragg),
            (EnhancementFactor::Plasmonic, plasmonic),
            (EnhancementFactor::Hyperbolic, hyperbolic),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ArrayError::InvalidEnhancement { factor, value });
            }
        }
        Ok(Self {
            bragg,
            plasmonic,
            hyperbolic,
        })
    }

    /// The reference stack: 23-layer Bragg mirror, graphene, 50-period superlattice.
    pub fn reference() -> Self {
        Self {
            bragg: Self::REFERENCE_BRAGG,
            plasmonic: Self::REFERENCE_PLASMONIC,
            hyperbolic: Self::REFERENCE_HYPERBOLIC,
        }
    }

    pub fn bragg(&self) -> f64 {
        self.bragg
    }

    pub fn plasmonic(&self) -> f64 {
        self.plasmonic
    }

    pub fn hyperbolic(&self) -> f64 {
        self.hyperbolic
    }

    /// Total enhancement γ = γ₁·γ₂·γ₃.
    pub fn total(&self) -> f64 {
        self.bragg * self.plasmonic * self.hyperbolic
    }
}

impl Default for MaterialEnhancement {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_exact_product() {
        let m = MaterialEnhancement::new(900.0, 400.0, 4.0).unwrap();
        assert_eq!(m.total(), 900.0 * 400.0 * 4.0);

        let reference = MaterialEnhancement::reference();
        assert!((reference.total() - 1.1951e6).abs() < 1.0);
    }

    #[test]
    fn non_positive_factors_are_rejected() {
        let err = MaterialEnhancement::new(-1.0, 380.0, 3.7).unwrap_err();
        assert_eq!(
            err,
            ArrayError::InvalidEnhancement {
                factor: EnhancementFactor::Bragg,
                value: -1.0
            }
        );
        assert!(MaterialEnhancement::new(850.0, 0.0, 3.7).is_err());
        assert!(MaterialEnhancement::new(850.0, 380.0, f64::INFINITY).is_err());
        assert!(MaterialEnhancement::new(850.0, 380.0, f64::NAN).is_err());
    }
}
