use super::{types::TemplateError, TemplateManager};
use crate::io::TemplateBundle;
use crate::model::{
    FacilityId, ScheduleTemplate, ScheduleTemplateId, ShiftTemplate, ShiftTemplateId,
};

/// Normalise `days` sur place. Seul point d'application de la règle pour
/// tous les chemins de création / mise à jour.
fn apply_normalization(template: &mut ShiftTemplate) -> bool {
    let adjusted = template.normalize_days();
    #[cfg(feature = "logging")]
    if adjusted {
        tracing::debug!(
            shift_template = template.id.as_str(),
            "days ajusté à 1 : la fin ne suit pas le début sur le même jour"
        );
    }
    adjusted
}

pub(super) fn create_schedule_template(
    manager: &mut TemplateManager,
    name: &str,
    facility: FacilityId,
) -> ScheduleTemplateId {
    let template = ScheduleTemplate::new(name, facility);
    let id = template.id.clone();
    manager.catalog.schedule_templates.push(template);
    id
}

pub(super) fn update_schedule_template<F>(
    manager: &mut TemplateManager,
    id: &ScheduleTemplateId,
    edit: F,
) -> Result<(), TemplateError>
where
    F: FnOnce(&mut ScheduleTemplate),
{
    let Some(template) = manager.catalog.find_schedule_template_mut(id) else {
        return Err(TemplateError::UnknownScheduleTemplate(
            id.as_str().to_string(),
        ));
    };
    let stable = template.id.clone();
    edit(template);
    template.id = stable;
    Ok(())
}

pub(super) fn remove_schedule_template(
    manager: &mut TemplateManager,
    id: &ScheduleTemplateId,
) -> Result<usize, TemplateError> {
    let Some(pos) = manager
        .catalog
        .schedule_templates
        .iter()
        .position(|t| &t.id == id)
    else {
        return Err(TemplateError::UnknownScheduleTemplate(
            id.as_str().to_string(),
        ));
    };
    manager.catalog.schedule_templates.remove(pos);

    let before = manager.catalog.shift_templates.len();
    manager
        .catalog
        .shift_templates
        .retain(|t| &t.schedule_template != id);
    let removed = before - manager.catalog.shift_templates.len();
    #[cfg(feature = "logging")]
    tracing::debug!(
        schedule_template = id.as_str(),
        removed,
        "suppression en cascade"
    );
    Ok(removed)
}

pub(super) fn create_shift_template(
    manager: &mut TemplateManager,
    mut template: ShiftTemplate,
) -> Result<ShiftTemplateId, TemplateError> {
    if manager
        .catalog
        .find_schedule_template(&template.schedule_template)
        .is_none()
    {
        return Err(TemplateError::UnknownScheduleTemplate(
            template.schedule_template.as_str().to_string(),
        ));
    }
    apply_normalization(&mut template);
    let id = template.id.clone();
    manager.catalog.shift_templates.push(template);
    Ok(id)
}

pub(super) fn add_shift_templates(
    manager: &mut TemplateManager,
    templates: Vec<ShiftTemplate>,
) -> Result<usize, TemplateError> {
    // Tout ou rien : on vérifie chaque propriétaire avant d'insérer quoi
    // que ce soit.
    for template in &templates {
        if manager
            .catalog
            .find_schedule_template(&template.schedule_template)
            .is_none()
        {
            return Err(TemplateError::UnknownScheduleTemplate(
                template.schedule_template.as_str().to_string(),
            ));
        }
    }
    let count = templates.len();
    for mut template in templates {
        apply_normalization(&mut template);
        manager.catalog.shift_templates.push(template);
    }
    Ok(count)
}

pub(super) fn update_shift_template<F>(
    manager: &mut TemplateManager,
    id: &ShiftTemplateId,
    edit: F,
) -> Result<(), TemplateError>
where
    F: FnOnce(&mut ShiftTemplate),
{
    let Some(current) = manager.catalog.find_shift_template(id).cloned() else {
        return Err(TemplateError::UnknownShiftTemplate(id.as_str().to_string()));
    };

    let mut edited = current;
    edit(&mut edited);
    edited.id = id.clone();

    // Re-cibler un gabarit de planning inconnu est refusé, rien n'est écrit.
    if manager
        .catalog
        .find_schedule_template(&edited.schedule_template)
        .is_none()
    {
        return Err(TemplateError::UnknownScheduleTemplate(
            edited.schedule_template.as_str().to_string(),
        ));
    }
    apply_normalization(&mut edited);

    if let Some(slot) = manager.catalog.find_shift_template_mut(id) {
        *slot = edited;
    }
    Ok(())
}

pub(super) fn remove_shift_template(
    manager: &mut TemplateManager,
    id: &ShiftTemplateId,
) -> Result<(), TemplateError> {
    let Some(pos) = manager
        .catalog
        .shift_templates
        .iter()
        .position(|t| &t.id == id)
    else {
        return Err(TemplateError::UnknownShiftTemplate(id.as_str().to_string()));
    };
    manager.catalog.shift_templates.remove(pos);
    Ok(())
}

pub(super) fn import_bundle(
    manager: &mut TemplateManager,
    bundle: TemplateBundle,
) -> Result<ScheduleTemplateId, TemplateError> {
    let id = bundle.schedule_template.id.clone();
    if manager.catalog.find_schedule_template(&id).is_some() {
        return Err(TemplateError::DuplicateScheduleTemplate(
            id.as_str().to_string(),
        ));
    }
    manager
        .catalog
        .schedule_templates
        .push(bundle.schedule_template);

    for mut template in bundle.shift_templates {
        // Un bundle retouché à la main peut pointer ailleurs : on ré-ancre
        // chaque créneau sur le gabarit importé.
        template.schedule_template = id.clone();
        apply_normalization(&mut template);
        manager.catalog.shift_templates.push(template);
    }
    Ok(id)
}
