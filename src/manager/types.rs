use crate::model::ShiftTemplateId;
use thiserror::Error;

/// Constat relevé par le balayage du catalogue, jamais bloquant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Gabarit de planning propriétaire absent du catalogue.
    Orphan,
    /// `days == 0` alors que la fin ne suit pas strictement le début
    /// (écrit sans normalisation).
    EndsBeforeStart,
    /// `slots < 0`, stocké tel quel.
    NegativeSlots,
}

#[derive(Debug, Clone)]
pub struct Anomaly {
    pub shift_template: ShiftTemplateId,
    pub kind: AnomalyKind,
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("unknown schedule template: {0}")]
    UnknownScheduleTemplate(String),
    #[error("unknown shift template: {0}")]
    UnknownShiftTemplate(String),
    #[error("schedule template already present: {0}")]
    DuplicateScheduleTemplate(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
