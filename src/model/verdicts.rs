use crate::model::profile::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictBand {
    // Inclusive upper bound of the band.
    pub max_score: u32,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictBands {
    bands: Vec<VerdictBand>,
    open_label: &'static str,
}

impl VerdictBands {
    pub fn new(bands: Vec<VerdictBand>, open_label: &'static str) -> Result<Self, ProfileError> {
        for pair in bands.windows(2) {
            if pair[1].max_score <= pair[0].max_score {
                return Err(ProfileError::UnorderedBands {
                    previous: pair[0].max_score,
                    next: pair[1].max_score,
                });
            }
        }
        if let Some(band) = bands.iter().find(|b| b.label.trim().is_empty()) {
            return Err(ProfileError::EmptyVerdict(band.max_score));
        }
        if open_label.trim().is_empty() {
            return Err(ProfileError::EmptyOpenVerdict);
        }
        Ok(Self { bands, open_label })
    }

    pub fn compliance_v1() -> Self {
        Self {
            bands: vec![
                VerdictBand {
                    max_score: 29,
                    label: "Foundational gaps present.",
                },
                VerdictBand {
                    max_score: 49,
                    label: "Policy-led, execution-constrained.",
                },
                VerdictBand {
                    max_score: 69,
                    label: "Operational, with blind spots.",
                },
                VerdictBand {
                    max_score: 84,
                    label: "Execution-driven and defensible.",
                },
            ],
            open_label: "Audit-resilient by design.",
        }
    }

    pub fn verdict_for(&self, score: u32) -> &'static str {
        self.bands
            .iter()
            .find(|band| score <= band.max_score)
            .map(|band| band.label)
            .unwrap_or(self.open_label)
    }

    pub fn bands(&self) -> &[VerdictBand] {
        &self.bands
    }

    pub fn open_label(&self) -> &'static str {
        self.open_label
    }
}
