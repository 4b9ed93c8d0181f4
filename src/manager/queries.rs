use super::types::{Anomaly, AnomalyKind, TemplateError};
use super::TemplateManager;
use crate::model::{ScheduleTemplate, ScheduleTemplateId, ShiftTemplate};

pub(super) fn schedule_templates_by_facility(
    manager: &TemplateManager,
) -> Vec<&ScheduleTemplate> {
    let mut out: Vec<&ScheduleTemplate> = manager.catalog.schedule_templates.iter().collect();
    // Tri stable : l'ordre d'insertion départage au sein d'une facility.
    out.sort_by(|a, b| a.facility.cmp(&b.facility));
    out
}

pub(super) fn shift_templates_for<'a>(
    manager: &'a TemplateManager,
    id: &ScheduleTemplateId,
) -> Result<Vec<&'a ShiftTemplate>, TemplateError> {
    if manager.catalog.find_schedule_template(id).is_none() {
        return Err(TemplateError::UnknownScheduleTemplate(
            id.as_str().to_string(),
        ));
    }
    let mut out: Vec<&ShiftTemplate> = manager
        .catalog
        .shift_templates
        .iter()
        .filter(|t| &t.schedule_template == id)
        .collect();
    out.sort_by_key(|t| (t.starting_time, t.ending_time));
    Ok(out)
}

pub(super) fn detect_anomalies(manager: &TemplateManager) -> Vec<Anomaly> {
    let mut out = Vec::new();

    for shift in &manager.catalog.shift_templates {
        if manager
            .catalog
            .find_schedule_template(&shift.schedule_template)
            .is_none()
        {
            out.push(Anomaly {
                shift_template: shift.id.clone(),
                kind: AnomalyKind::Orphan,
            });
        }

        if shift.days == 0 && shift.starting_time >= shift.ending_time {
            out.push(Anomaly {
                shift_template: shift.id.clone(),
                kind: AnomalyKind::EndsBeforeStart,
            });
        }

        if shift.slots < 0 {
            out.push(Anomaly {
                shift_template: shift.id.clone(),
                kind: AnomalyKind::NegativeSlots,
            });
        }
    }

    out
}
