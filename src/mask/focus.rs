//! Focus-region geometry and the shared fade law.
//!
//! Inside `core = 0.8 · radius` the image stays sharp; between the core and
//! the radius the blur amount ramps linearly from 0 to 1; beyond the radius
//! the pixel is fully blurred. Both geometries use [`fade_amount`] and differ
//! only in how the distance is measured (row distance vs. Euclidean).
use crate::error::{Result, TiltShiftError};
use serde::{Deserialize, Serialize};

/// Fraction of the radius that is kept perfectly sharp.
pub const CORE_FRACTION: f32 = 0.8;

/// Description of the sharp zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusRegion {
    /// Horizontal band of rows within `radius` of `center_row`, full width.
    Band { center_row: i32, radius: i32 },
    /// Disc of `radius` around `(center_x, center_y)`.
    Disc {
        center_x: i32,
        center_y: i32,
        radius: i32,
    },
}

impl FocusRegion {
    pub fn radius(&self) -> i32 {
        match *self {
            FocusRegion::Band { radius, .. } | FocusRegion::Disc { radius, .. } => radius,
        }
    }

    /// Radius of the no-blur core.
    pub fn core(&self) -> f32 {
        CORE_FRACTION * self.radius() as f32
    }

    pub fn validate(&self) -> Result<()> {
        let radius = self.radius();
        if radius <= 0 {
            return Err(TiltShiftError::invalid(format!(
                "focus radius must be positive, got {radius}"
            )));
        }
        let core = self.core();
        if core >= radius as f32 {
            return Err(TiltShiftError::invalid(format!(
                "focus core {core} must be smaller than radius {radius}"
            )));
        }
        Ok(())
    }
}

impl Default for FocusRegion {
    fn default() -> Self {
        FocusRegion::Band {
            center_row: 0,
            radius: 1,
        }
    }
}

/// Blur amount for a pixel `distance` away from the focus centre.
#[inline]
pub fn fade_amount(distance: f32, radius: f32, core: f32) -> f32 {
    if distance <= core {
        0.0
    } else if distance < radius {
        (distance - core) / (radius - core)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_law_ramps_between_core_and_radius() {
        assert_eq!(fade_amount(0.0, 10.0, 8.0), 0.0);
        assert_eq!(fade_amount(8.0, 10.0, 8.0), 0.0);
        assert!((fade_amount(9.0, 10.0, 8.0) - 0.5).abs() < 1e-6);
        assert_eq!(fade_amount(10.0, 10.0, 8.0), 1.0);
        assert_eq!(fade_amount(250.0, 10.0, 8.0), 1.0);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let band = FocusRegion::Band {
            center_row: 4,
            radius: 0,
        };
        assert!(band.validate().is_err());
        let disc = FocusRegion::Disc {
            center_x: 0,
            center_y: 0,
            radius: -3,
        };
        assert!(disc.validate().is_err());
    }

    #[test]
    fn deserializes_tagged_variants() {
        let disc: FocusRegion =
            serde_json::from_str(r#"{"kind":"disc","center_x":5,"center_y":6,"radius":7}"#)
                .unwrap();
        assert_eq!(
            disc,
            FocusRegion::Disc {
                center_x: 5,
                center_y: 6,
                radius: 7
            }
        );
        let band: FocusRegion =
            serde_json::from_str(r#"{"kind":"band","center_row":3,"radius":2}"#).unwrap();
        assert_eq!(band.core(), 1.6);
    }
}
