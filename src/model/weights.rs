use crate::model::answers::ANSWER_COUNT;

pub const SCORE_MIN: u32 = 0;
pub const SCORE_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable {
    weights: [u32; ANSWER_COUNT],
}

impl WeightTable {
    pub const fn new(weights: [u32; ANSWER_COUNT]) -> Self {
        Self { weights }
    }

    pub const fn compliance_v1() -> Self {
        Self::new([15, 15, 15, 15, 15, 25])
    }

    pub fn weight(&self, index: usize) -> u32 {
        self.weights.get(index).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.weights.iter().sum()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::compliance_v1()
    }
}
