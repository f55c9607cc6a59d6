//! Irrigation management actions.
//!
//! A management agent waters one plot at a time. The action space comes in
//! two flavours: a discrete one in whole litres and a continuous one. Queued
//! volumes are applied together with rain at the next step.

use crate::error::{SoilError, SoilResult};
use serde::{Deserialize, Serialize};

/// Largest discrete irrigation volume (L).
pub const DISCRETE_MAX_L: u8 = 15;
/// Largest continuous irrigation volume (L).
pub const CONTINUOUS_MAX_L: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IrrigationAction {
    /// Whole litres in `0..=15`.
    Discrete { x: u16, y: u16, amount_l: u8 },
    /// Any volume in `0.0..=20.0`.
    Continuous { x: u16, y: u16, amount_l: f64 },
}

impl IrrigationAction {
    #[must_use]
    pub fn plot(&self) -> (u16, u16) {
        match *self {
            Self::Discrete { x, y, .. } | Self::Continuous { x, y, .. } => (x, y),
        }
    }

    #[must_use]
    pub fn volume_l(&self) -> f64 {
        match *self {
            Self::Discrete { amount_l, .. } => f64::from(amount_l),
            Self::Continuous { amount_l, .. } => amount_l,
        }
    }

    pub fn validate(&self) -> SoilResult<()> {
        match *self {
            Self::Discrete { amount_l, .. } if amount_l > DISCRETE_MAX_L => {
                Err(SoilError::invalid_action(format!(
                    "discrete irrigation of {amount_l} L exceeds {DISCRETE_MAX_L} L"
                )))
            }
            Self::Continuous { amount_l, .. } if !amount_l.is_finite() => Err(
                SoilError::invalid_action("continuous irrigation volume is not finite"),
            ),
            Self::Continuous { amount_l, .. } if !(0.0..=CONTINUOUS_MAX_L).contains(&amount_l) => {
                Err(SoilError::invalid_action(format!(
                    "continuous irrigation of {amount_l} L is outside 0..={CONTINUOUS_MAX_L} L"
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete_bounds() {
        let ok = IrrigationAction::Discrete { x: 1, y: 2, amount_l: 15 };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.volume_l(), 15.0);
        assert_eq!(ok.plot(), (1, 2));

        let too_much = IrrigationAction::Discrete { x: 0, y: 0, amount_l: 16 };
        assert!(matches!(too_much.validate(), Err(SoilError::InvalidAction(_))));
    }

    #[test]
    fn test_continuous_bounds() {
        for amount_l in [0.0, 7.25, 20.0] {
            let action = IrrigationAction::Continuous { x: 0, y: 0, amount_l };
            assert!(action.validate().is_ok());
        }
        for amount_l in [-0.5, 20.5, f64::NAN, f64::INFINITY] {
            let action = IrrigationAction::Continuous { x: 0, y: 0, amount_l };
            assert!(action.validate().is_err());
        }
    }

    #[test]
    fn test_serde_tagging() {
        let action = IrrigationAction::Continuous { x: 3, y: 1, amount_l: 2.5 };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"kind\":\"continuous\""));
        let back: IrrigationAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
