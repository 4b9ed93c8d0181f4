mod mutate;
mod queries;
mod types;

pub use types::{Anomaly, AnomalyKind, TemplateError};

use crate::io::TemplateBundle;
use crate::model::{
    Catalog, FacilityId, ScheduleTemplate, ScheduleTemplateId, ShiftTemplate, ShiftTemplateId,
};

/// TemplateManager : encapsule un Catalog et applique la normalisation du
/// décalage de jours sur chaque création / mise à jour.
#[derive(Debug, Default)]
pub struct TemplateManager {
    catalog: Catalog,
}

impl TemplateManager {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
        }
    }

    /// Reprend un catalogue déjà chargé (voir `storage`).
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Accès mutable direct. Ce chemin contourne la normalisation :
    /// `duration()` reste défini malgré tout, et `detect_anomalies`
    /// signale ce qui est passé par là.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Crée un gabarit de planning pour une facility.
    pub fn create_schedule_template(
        &mut self,
        name: &str,
        facility: FacilityId,
    ) -> ScheduleTemplateId {
        mutate::create_schedule_template(self, name, facility)
    }

    /// Édite un gabarit de planning ; l'identifiant reste stable.
    pub fn update_schedule_template<F>(
        &mut self,
        id: &ScheduleTemplateId,
        edit: F,
    ) -> Result<(), TemplateError>
    where
        F: FnOnce(&mut ScheduleTemplate),
    {
        mutate::update_schedule_template(self, id, edit)
    }

    /// Supprime un gabarit de planning et, en cascade, ses créneaux.
    /// Retourne le nombre de créneaux emportés.
    pub fn remove_schedule_template(
        &mut self,
        id: &ScheduleTemplateId,
    ) -> Result<usize, TemplateError> {
        mutate::remove_schedule_template(self, id)
    }

    /// Insère un gabarit de créneau après normalisation de `days`.
    pub fn create_shift_template(
        &mut self,
        template: ShiftTemplate,
    ) -> Result<ShiftTemplateId, TemplateError> {
        mutate::create_shift_template(self, template)
    }

    /// Insertion en masse (import CSV) : tout ou rien, chaque gabarit
    /// est normalisé.
    pub fn add_shift_templates(
        &mut self,
        templates: Vec<ShiftTemplate>,
    ) -> Result<usize, TemplateError> {
        mutate::add_shift_templates(self, templates)
    }

    /// Édite un gabarit de créneau puis re-normalise `days` ;
    /// l'identifiant reste stable.
    pub fn update_shift_template<F>(
        &mut self,
        id: &ShiftTemplateId,
        edit: F,
    ) -> Result<(), TemplateError>
    where
        F: FnOnce(&mut ShiftTemplate),
    {
        mutate::update_shift_template(self, id, edit)
    }

    pub fn remove_shift_template(&mut self, id: &ShiftTemplateId) -> Result<(), TemplateError> {
        mutate::remove_shift_template(self, id)
    }

    /// Installe un bundle exporté (gabarit de planning + ses créneaux).
    pub fn import_bundle(
        &mut self,
        bundle: TemplateBundle,
    ) -> Result<ScheduleTemplateId, TemplateError> {
        mutate::import_bundle(self, bundle)
    }

    /// Gabarits de planning dans l'ordre des facilities.
    pub fn schedule_templates_by_facility(&self) -> Vec<&ScheduleTemplate> {
        queries::schedule_templates_by_facility(self)
    }

    /// Créneaux d'un gabarit de planning, triés par heures de début puis
    /// de fin.
    pub fn shift_templates_for(
        &self,
        id: &ScheduleTemplateId,
    ) -> Result<Vec<&ShiftTemplate>, TemplateError> {
        queries::shift_templates_for(self, id)
    }

    /// Balayage en lecture seule du catalogue.
    pub fn detect_anomalies(&self) -> Vec<Anomaly> {
        queries::detect_anomalies(self)
    }
}
