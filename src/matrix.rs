//! 4x4 transform matrix as stored in overlay profiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column-major 4x4 matrix (translation lives in elements 12..15)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4(pub [f32; 16]);

impl Matrix4 {
    /// All-zero matrix; marks a transform that was never set
    pub const ZERO: Matrix4 = Matrix4([0.0; 16]);

    pub const IDENTITY: Matrix4 = Matrix4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    pub fn translation(&self) -> [f32; 3] {
        [self.0[12], self.0[13], self.0[14]]
    }

    pub fn set_translation(&mut self, t: [f32; 3]) {
        self.0[12] = t[0];
        self.0[13] = t[1];
        self.0[14] = t[2];
    }

    /// Uniform scale, applied on the left (scales rows 0..3 of every column)
    pub fn scale(&mut self, s: f32) {
        for col in 0..4 {
            for row in 0..3 {
                self.0[col * 4 + row] *= s;
            }
        }
    }

    /// Length of the first basis vector
    pub fn basis_x_length(&self) -> f32 {
        let [x, y, z] = [self.0[0], self.0[1], self.0[2]];
        (x * x + y * y + z * z).sqrt()
    }

    /// Normalize a uniformly scaled transform, keeping rotation and translation.
    /// Returns the removed scale, or `None` when the matrix has no scale to
    /// measure (zero basis).
    pub fn remove_scale(&mut self) -> Option<f32> {
        let scale = self.basis_x_length();
        if scale == 0.0 {
            return None;
        }

        let translation = self.translation();
        self.set_translation([0.0, 0.0, 0.0]);
        self.scale(1.0 / scale);
        self.set_translation(translation);

        Some(scale)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Canonical profile encoding: 16 values separated by single spaces
impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMatrixError;

impl fmt::Display for ParseMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected 16 whitespace-separated numbers")
    }
}

impl std::error::Error for ParseMatrixError {}

impl FromStr for Matrix4 {
    type Err = ParseMatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0.0f32; 16];
        let mut parts = s.split_whitespace();

        for slot in values.iter_mut() {
            *slot = parts
                .next()
                .and_then(|p| p.parse::<f32>().ok())
                .ok_or(ParseMatrixError)?;
        }

        Ok(Matrix4(values))
    }
}
