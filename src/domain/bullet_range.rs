use std::fmt;

/// Inclusive bullet-count range requested from the model.
///
/// This is a prompt-level request only; the model may not comply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletRange {
    min: usize,
    max: usize,
}

impl BulletRange {
    pub fn new(min: usize, max: usize) -> Result<Self, BulletRangeError> {
        if min == 0 {
            return Err(BulletRangeError::ZeroMinimum);
        }
        if min > max {
            return Err(BulletRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for BulletRange {
    fn default() -> Self {
        Self { min: 10, max: 15 }
    }
}

impl fmt::Display for BulletRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BulletRangeError {
    #[error("bullet range minimum must be at least 1")]
    ZeroMinimum,
    #[error("bullet range minimum {min} exceeds maximum {max}")]
    Inverted { min: usize, max: usize },
}
