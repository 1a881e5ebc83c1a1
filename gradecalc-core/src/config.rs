use serde::{Deserialize, Serialize};

/// Credit weight every course carries when no override is configured.
pub const FIXED_CREDIT_VALUE_PER_COURSE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcOptions {
    /// Uniform credit weight applied to each graded course. Zero leaves the
    /// GPA uncomputable.
    pub credits_per_course: u32,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            credits_per_course: FIXED_CREDIT_VALUE_PER_COURSE,
        }
    }
}

impl CalcOptions {
    pub fn with_credits(credits_per_course: u32) -> Self {
        Self { credits_per_course }
    }

    pub fn credit_weight(&self) -> f64 {
        f64::from(self.credits_per_course)
    }
}
