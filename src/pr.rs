/// Whether a generator reseeds before every request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PredictionResistance {
    Enabled,
    #[default]
    Disabled,
}

impl PredictionResistance {
    pub fn is_pr(self) -> bool {
        matches!(self, PredictionResistance::Enabled)
    }
}

impl From<bool> for PredictionResistance {
    fn from(prediction_resistant: bool) -> Self {
        if prediction_resistant {
            PredictionResistance::Enabled
        } else {
            PredictionResistance::Disabled
        }
    }
}
