use crate::directory::OrgDirectory;
use crate::model::{Catalog, ScheduleTemplate, ShiftTemplate};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveTime, Timelike};

/// Service de localisation des libellés (heures, pluriels). Le mécanisme de
/// traduction lui-même vit ailleurs ; ici on ne consomme que ce contrat.
pub trait Localizer {
    /// Rendu d'une heure du jour.
    fn localize_time(&self, time: NaiveTime) -> String;
    /// Qualificatif de fin décalée, appelé seulement pour `days >= 1`.
    fn days_qualifier(&self, days: u32) -> String;
}

/// Localisation texte par défaut (anglais, heures `HH:MM`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLocalizer;

impl Localizer for TextLocalizer {
    fn localize_time(&self, time: NaiveTime) -> String {
        if time.second() == 0 && time.nanosecond() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S%.f").to_string()
        }
    }

    fn days_qualifier(&self, days: u32) -> String {
        if days == 1 {
            "the next day".to_string()
        } else {
            format!("after {days} days")
        }
    }
}

/// Heure de fin localisée, suivie du qualificatif quand le créneau déborde
/// sur un ou plusieurs jours. Aucun suffixe pour `days == 0`.
pub fn display_ending_time(shift: &ShiftTemplate, locale: &dyn Localizer) -> String {
    let time = locale.localize_time(shift.ending_time);
    if shift.days == 0 {
        time
    } else {
        format!("{} {}", time, locale.days_qualifier(shift.days))
    }
}

/// Libellé d'un gabarit de planning : `nom / facility`. Un nom de facility
/// absent de l'annuaire retombe sur l'identifiant brut.
pub fn schedule_template_label(template: &ScheduleTemplate, directory: &dyn OrgDirectory) -> String {
    let facility = directory
        .facility_name(&template.facility)
        .unwrap_or(template.facility.as_str());
    format!("{} / {}", template.name, facility)
}

/// Libellé complet d'un gabarit de créneau :
/// `planning: slots x task[/workplace] from début to fin[ qualificatif]`.
/// Échoue uniquement si le gabarit de planning propriétaire manque au
/// catalogue ; les noms inconnus de l'annuaire retombent sur l'identifiant.
pub fn shift_template_label(
    shift: &ShiftTemplate,
    catalog: &Catalog,
    directory: &dyn OrgDirectory,
    locale: &dyn Localizer,
) -> Result<String> {
    let schedule = catalog
        .find_schedule_template(&shift.schedule_template)
        .with_context(|| {
            format!(
                "unknown schedule template: {}",
                shift.schedule_template.as_str()
            )
        })?;

    let task = directory
        .task_name(&shift.task)
        .unwrap_or(shift.task.as_str());
    let workplace = shift
        .workplace
        .as_ref()
        .map(|id| format!("/{}", directory.workplace_name(id).unwrap_or(id.as_str())))
        .unwrap_or_default();

    Ok(format!(
        "{}: {} x {}{} from {} to {}",
        schedule_template_label(schedule, directory),
        shift.slots,
        task,
        workplace,
        locale.localize_time(shift.starting_time),
        display_ending_time(shift, locale),
    ))
}

/// Durée en clair pour la CLI : `8h00`, avec les secondes si besoin.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    let mut out = format!("{}h{:02}", minutes / 60, minutes % 60);
    let seconds = duration.num_seconds() % 60;
    if seconds != 0 {
        out.push_str(&format!(" {seconds}s"));
    }
    out
}
