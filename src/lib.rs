#![forbid(unsafe_code)]
//! Benevolat — gabarits de créneaux bénévoles, stockage local (sans BD).
//!
//! - Deux enregistrements persistés : ScheduleTemplate et ShiftTemplate.
//! - Normalisation du décalage de jours à chaque création / mise à jour.
//! - Durée et libellés dérivés à la demande.
//! - Stockage fichiers (JSON/CSV) ; entités organisation et traductions
//!   consommées comme contrats externes.

pub mod directory;
pub mod display;
pub mod io;
pub mod manager;
pub mod model;
pub mod storage;

pub use directory::{InMemoryDirectory, OrgDirectory};
pub use display::{
    display_ending_time, format_duration, schedule_template_label, shift_template_label,
    Localizer, TextLocalizer,
};
pub use io::TemplateBundle;
pub use manager::{Anomaly, AnomalyKind, TemplateError, TemplateManager};
pub use model::{
    Catalog, FacilityId, ScheduleTemplate, ScheduleTemplateId, ShiftTemplate, ShiftTemplateId,
    TaskId, WorkplaceId,
};
pub use storage::{JsonStorage, Storage};
