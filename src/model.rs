use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour ScheduleTemplate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleTemplateId(String);

impl ScheduleTemplateId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour ShiftTemplate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftTemplateId(String);

impl ShiftTemplateId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant d'une Facility (entité externe, jamais modélisée ici)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityId(String);

impl FacilityId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant d'une Task (entité externe)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant d'un Workplace (entité externe)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkplaceId(String);

impl WorkplaceId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Gabarit de planning : groupe nommé de créneaux pour une facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub id: ScheduleTemplateId,
    pub name: String,
    pub facility: FacilityId,
}

impl ScheduleTemplate {
    pub fn new<N: Into<String>>(name: N, facility: FacilityId) -> Self {
        Self {
            id: ScheduleTemplateId::random(),
            name: name.into(),
            facility,
        }
    }
}

/// Gabarit de créneau récurrent (heures du jour, sans date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: ShiftTemplateId,
    pub schedule_template: ScheduleTemplateId,
    pub task: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workplace: Option<WorkplaceId>,
    /// Nombre de bénévoles attendus. Champ signé : une valeur négative
    /// est stockée telle quelle, jamais rejetée.
    pub slots: i32,
    pub starting_time: NaiveTime,
    pub ending_time: NaiveTime,
    /// Décalage de jours entre le début et la fin (créneaux de nuit).
    #[serde(default)]
    pub days: u32,
}

impl ShiftTemplate {
    /// Crée un gabarit de créneau (sans workplace, décalage 0).
    pub fn new(
        schedule_template: ScheduleTemplateId,
        task: TaskId,
        slots: i32,
        starting_time: NaiveTime,
        ending_time: NaiveTime,
    ) -> Self {
        Self {
            id: ShiftTemplateId::random(),
            schedule_template,
            task,
            workplace: None,
            slots,
            starting_time,
            ending_time,
            days: 0,
        }
    }

    /// Corrige `days` : un créneau « même jour » dont la fin ne suit pas
    /// strictement le début bascule au lendemain. Retourne `true` si la
    /// valeur a été corrigée. Aucune autre combinaison n'est vérifiée.
    pub fn normalize_days(&mut self) -> bool {
        if self.days == 0 && self.starting_time >= self.ending_time {
            self.days = 1;
            true
        } else {
            false
        }
    }

    /// Durée du créneau : de l'heure de début à l'heure de fin posée
    /// `days` jours plus tard, en valeur absolue. Les fractions de
    /// seconde des heures sont conservées.
    pub fn duration(&self) -> Duration {
        let span = Duration::days(i64::from(self.days))
            + self.ending_time.signed_duration_since(self.starting_time);
        span.abs()
    }
}

/// Catalogue complet : les deux « tables » persistées.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub schedule_templates: Vec<ScheduleTemplate>,
    pub shift_templates: Vec<ShiftTemplate>,
}

impl Catalog {
    pub fn find_schedule_template(&self, id: &ScheduleTemplateId) -> Option<&ScheduleTemplate> {
        self.schedule_templates.iter().find(|t| &t.id == id)
    }
    pub fn find_schedule_template_mut(
        &mut self,
        id: &ScheduleTemplateId,
    ) -> Option<&mut ScheduleTemplate> {
        self.schedule_templates.iter_mut().find(|t| &t.id == id)
    }
    pub fn find_shift_template(&self, id: &ShiftTemplateId) -> Option<&ShiftTemplate> {
        self.shift_templates.iter().find(|t| &t.id == id)
    }
    pub fn find_shift_template_mut(&mut self, id: &ShiftTemplateId) -> Option<&mut ShiftTemplate> {
        self.shift_templates.iter_mut().find(|t| &t.id == id)
    }
}
