use crate::directory::InMemoryDirectory;
use crate::model::{
    Catalog, FacilityId, ScheduleTemplate, ScheduleTemplateId, ShiftTemplate, TaskId, WorkplaceId,
};
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Import de gabarits de créneaux depuis CSV: header
/// `schedule_template,task,workplace,slots,starting_time,ending_time,days`
/// (`workplace` et `days` peuvent rester vides). Les enregistrements sont
/// bruts : la normalisation de `days` s'applique à l'insertion via le
/// manager.
pub fn import_shift_templates_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftTemplate>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let schedule = rec.get(0).context("missing schedule_template")?.trim();
        let task = rec.get(1).context("missing task")?.trim();
        if schedule.is_empty() || task.is_empty() {
            bail!("invalid shift template row (empty schedule_template or task)");
        }
        let slots_raw = rec.get(3).context("missing slots")?.trim();
        let slots: i32 = slots_raw
            .parse()
            .with_context(|| format!("invalid slots value: {slots_raw}"))?;
        let starting = parse_time(rec.get(4).context("missing starting_time")?.trim())?;
        let ending = parse_time(rec.get(5).context("missing ending_time")?.trim())?;

        let mut template = ShiftTemplate::new(
            ScheduleTemplateId::new(schedule),
            TaskId::new(task),
            slots,
            starting,
            ending,
        );
        if let Some(workplace) = rec.get(2) {
            let workplace = workplace.trim();
            if !workplace.is_empty() {
                template.workplace = Some(WorkplaceId::new(workplace));
            }
        }
        if let Some(days) = rec.get(6) {
            let days = days.trim();
            if !days.is_empty() {
                template.days = days
                    .parse()
                    .with_context(|| format!("invalid days value: {days}"))?;
            }
        }
        out.push(template);
    }
    Ok(out)
}

/// Heure du jour `HH:MM[:SS[.frac]]`.
pub fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S%.f") {
        return Ok(time);
    }
    NaiveTime::parse_from_str(raw, "%H:%M").with_context(|| format!("invalid time: {raw}"))
}

/// Annuaire CSV annexe: header `kind,id,name`, kind ∈ facility|task|workplace.
pub fn load_directory_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<InMemoryDirectory> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut directory = InMemoryDirectory::new();
    for rec in rdr.records() {
        let rec = rec?;
        let kind = rec.get(0).context("missing kind")?.trim();
        let id = rec.get(1).context("missing id")?.trim();
        let name = rec.get(2).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid directory row (empty id or name)");
        }
        match kind.to_ascii_lowercase().as_str() {
            "facility" => directory.insert_facility(FacilityId::new(id), name),
            "task" => directory.insert_task(TaskId::new(id), name),
            "workplace" => directory.insert_workplace(WorkplaceId::new(id), name),
            other => bail!("unknown directory kind: {other}"),
        }
    }
    Ok(directory)
}

/// Export JSON du catalogue (jolie mise en forme)
pub fn export_catalog_json<P: AsRef<Path>>(path: P, catalog: &Catalog) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(catalog)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des gabarits de créneaux, mêmes colonnes que l'import
/// précédées de `id`.
pub fn export_shift_templates_csv<P: AsRef<Path>>(path: P, catalog: &Catalog) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "schedule_template",
        "task",
        "workplace",
        "slots",
        "starting_time",
        "ending_time",
        "days",
    ])?;
    let mut slots_buf = itoa::Buffer::new();
    let mut days_buf = itoa::Buffer::new();
    for t in &catalog.shift_templates {
        let starting = t.starting_time.format("%H:%M:%S%.f").to_string();
        let ending = t.ending_time.format("%H:%M:%S%.f").to_string();
        let workplace = t
            .workplace
            .as_ref()
            .map(|wp| wp.as_str())
            .unwrap_or("");
        w.write_record([
            t.id.as_str(),
            t.schedule_template.as_str(),
            t.task.as_str(),
            workplace,
            slots_buf.format(t.slots),
            starting.as_str(),
            ending.as_str(),
            days_buf.format(t.days),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export autonome d'un gabarit de planning avec ses créneaux, pour le
/// partager entre catalogues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateBundle {
    pub exported_at: DateTime<Utc>,
    pub schedule_template: ScheduleTemplate,
    #[serde(default)]
    pub shift_templates: Vec<ShiftTemplate>,
}

pub fn export_schedule_template_json<P: AsRef<Path>>(
    path: P,
    catalog: &Catalog,
    id: &ScheduleTemplateId,
) -> anyhow::Result<()> {
    let schedule = catalog
        .find_schedule_template(id)
        .with_context(|| format!("unknown schedule template: {}", id.as_str()))?;
    let bundle = TemplateBundle {
        exported_at: Utc::now(),
        schedule_template: schedule.clone(),
        shift_templates: catalog
            .shift_templates
            .iter()
            .filter(|t| &t.schedule_template == id)
            .cloned()
            .collect(),
    };
    let json = serde_json::to_string_pretty(&bundle)?;
    fs::write(&path, json)
        .with_context(|| format!("writing bundle {}", path.as_ref().display()))?;
    Ok(())
}

pub fn load_bundle_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<TemplateBundle> {
    let data = fs::read(&path)
        .with_context(|| format!("reading bundle {}", path.as_ref().display()))?;
    let bundle: TemplateBundle = serde_json::from_slice(&data)
        .with_context(|| format!("parsing bundle {}", path.as_ref().display()))?;
    Ok(bundle)
}
