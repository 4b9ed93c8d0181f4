#![forbid(unsafe_code)]
use benevolat::model::{FacilityId, ScheduleTemplateId, ShiftTemplate, TaskId};
use benevolat::{AnomalyKind, TemplateError, TemplateManager};
use chrono::{Duration, NaiveTime};

#[test]
fn same_day_shift_keeps_days_zero() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Matin", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(17, 0), 0))
        .unwrap();
    assert_eq!(manager.catalog().find_shift_template(&id).unwrap().days, 0);
}

#[test]
fn overnight_shift_gets_days_one() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Nuit", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(22, 0), hm(6, 0), 0))
        .unwrap();
    assert_eq!(manager.catalog().find_shift_template(&id).unwrap().days, 1);
}

#[test]
fn equal_times_get_days_one() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Garde", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(8, 0), hm(8, 0), 0))
        .unwrap();
    assert_eq!(manager.catalog().find_shift_template(&id).unwrap().days, 1);
}

#[test]
fn explicit_days_left_alone() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Week-end", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(10, 0), hm(10, 0), 2))
        .unwrap();
    assert_eq!(manager.catalog().find_shift_template(&id).unwrap().days, 2);
}

#[test]
fn update_renormalizes_days() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Soir", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(17, 0), 0))
        .unwrap();

    manager
        .update_shift_template(&id, |t| t.ending_time = hm(8, 0))
        .unwrap();

    assert_eq!(manager.catalog().find_shift_template(&id).unwrap().days, 1);
}

#[test]
fn stored_days_zero_always_means_ordered_times() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Mixte", FacilityId::new("refuge-nord"));
    let bounds = [
        (hm(6, 0), hm(14, 0)),
        (hm(12, 0), hm(12, 0)),
        (hm(23, 30), hm(4, 0)),
        (hm(18, 0), hm(2, 15)),
    ];
    for (start, end) in bounds {
        manager
            .create_shift_template(sample_shift(&schedule, start, end, 0))
            .unwrap();
    }

    for shift in manager.shift_templates_for(&schedule).unwrap() {
        if shift.days == 0 {
            assert!(shift.starting_time < shift.ending_time);
        }
    }
}

#[test]
fn duration_same_day() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Jour", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(17, 0), 0))
        .unwrap();
    let stored = manager.catalog().find_shift_template(&id).unwrap();
    assert_eq!(stored.duration(), Duration::hours(8));
}

#[test]
fn duration_spans_midnight_after_normalization() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Nuit", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(22, 0), hm(6, 0), 0))
        .unwrap();
    let stored = manager.catalog().find_shift_template(&id).unwrap();
    assert_eq!(stored.days, 1);
    assert_eq!(stored.duration(), Duration::hours(8));
}

#[test]
fn duration_counts_extra_days() {
    let template = sample_shift(&ScheduleTemplateId::new("s-1"), hm(8, 0), hm(8, 0), 3);
    assert_eq!(template.duration(), Duration::days(3));
}

#[test]
fn duration_keeps_subsecond_precision() {
    let start = NaiveTime::from_hms_milli_opt(9, 0, 0, 500).unwrap();
    let end = NaiveTime::from_hms_milli_opt(9, 0, 1, 250).unwrap();
    let template = sample_shift(&ScheduleTemplateId::new("s-1"), start, end, 0);
    assert_eq!(template.duration(), Duration::milliseconds(750));
}

#[test]
fn duration_stays_positive_on_raw_rows() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Brut", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(17, 0), 0))
        .unwrap();

    // écrit directement, sans passer par la normalisation
    {
        let raw = manager.catalog_mut().find_shift_template_mut(&id).unwrap();
        raw.starting_time = hm(22, 0);
        raw.ending_time = hm(6, 0);
    }

    let stored = manager.catalog().find_shift_template(&id).unwrap();
    assert_eq!(stored.days, 0);
    assert_eq!(stored.duration(), Duration::hours(16));
}

#[test]
fn removing_schedule_cascades_to_shift_templates() {
    let mut manager = TemplateManager::new();
    let kept = manager.create_schedule_template("Gardé", FacilityId::new("refuge-nord"));
    let dropped = manager.create_schedule_template("Retiré", FacilityId::new("refuge-sud"));
    manager
        .create_shift_template(sample_shift(&kept, hm(9, 0), hm(12, 0), 0))
        .unwrap();
    manager
        .create_shift_template(sample_shift(&dropped, hm(9, 0), hm(12, 0), 0))
        .unwrap();
    manager
        .create_shift_template(sample_shift(&dropped, hm(14, 0), hm(18, 0), 0))
        .unwrap();

    let removed = manager.remove_schedule_template(&dropped).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(manager.catalog().shift_templates.len(), 1);
    assert!(manager.shift_templates_for(&dropped).is_err());
    assert_eq!(manager.shift_templates_for(&kept).unwrap().len(), 1);
}

#[test]
fn schedule_rename_keeps_id_stable() {
    let mut manager = TemplateManager::new();
    let id = manager.create_schedule_template("Matin", FacilityId::new("refuge-nord"));
    manager
        .update_schedule_template(&id, |s| {
            s.name = "Matinée".to_string();
            // tentative d'écrasement : ignorée
            s.id = ScheduleTemplateId::new("forcé");
        })
        .unwrap();
    let stored = manager.catalog().find_schedule_template(&id).unwrap();
    assert_eq!(stored.name, "Matinée");
}

#[test]
fn remove_single_shift_template() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Matin", FacilityId::new("refuge-nord"));
    let first = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(12, 0), 0))
        .unwrap();
    manager
        .create_shift_template(sample_shift(&schedule, hm(14, 0), hm(18, 0), 0))
        .unwrap();

    manager.remove_shift_template(&first).unwrap();
    assert_eq!(manager.catalog().shift_templates.len(), 1);

    let err = manager.remove_shift_template(&first).unwrap_err();
    assert!(matches!(err, TemplateError::UnknownShiftTemplate(_)));
}

#[test]
fn bulk_add_is_all_or_nothing() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Matin", FacilityId::new("refuge-nord"));
    let batch = vec![
        sample_shift(&schedule, hm(9, 0), hm(12, 0), 0),
        sample_shift(&ScheduleTemplateId::new("absent"), hm(14, 0), hm(18, 0), 0),
    ];

    let err = manager.add_shift_templates(batch).unwrap_err();
    assert!(matches!(err, TemplateError::UnknownScheduleTemplate(_)));
    assert!(manager.catalog().shift_templates.is_empty());
}

#[test]
fn unknown_owner_is_rejected() {
    let mut manager = TemplateManager::new();
    let err = manager
        .create_shift_template(sample_shift(
            &ScheduleTemplateId::new("absent"),
            hm(9, 0),
            hm(12, 0),
            0,
        ))
        .unwrap_err();
    assert!(matches!(err, TemplateError::UnknownScheduleTemplate(_)));
}

#[test]
fn retargeting_to_unknown_schedule_is_rejected() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Matin", FacilityId::new("refuge-nord"));
    let id = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(12, 0), 0))
        .unwrap();

    let err = manager
        .update_shift_template(&id, |t| {
            t.schedule_template = ScheduleTemplateId::new("absent");
        })
        .unwrap_err();
    assert!(matches!(err, TemplateError::UnknownScheduleTemplate(_)));

    // l'écriture n'a pas eu lieu
    let stored = manager.catalog().find_shift_template(&id).unwrap();
    assert_eq!(stored.schedule_template, schedule);
}

#[test]
fn schedules_listed_by_facility() {
    let mut manager = TemplateManager::new();
    manager.create_schedule_template("Z", FacilityId::new("refuge-sud"));
    manager.create_schedule_template("A", FacilityId::new("refuge-nord"));
    manager.create_schedule_template("M", FacilityId::new("refuge-ouest"));

    let facilities: Vec<&str> = manager
        .schedule_templates_by_facility()
        .into_iter()
        .map(|s| s.facility.as_str())
        .collect();
    assert_eq!(facilities, vec!["refuge-nord", "refuge-ouest", "refuge-sud"]);
}

#[test]
fn shift_templates_listed_by_starting_time() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Journée", FacilityId::new("refuge-nord"));
    manager
        .create_shift_template(sample_shift(&schedule, hm(14, 0), hm(18, 0), 0))
        .unwrap();
    manager
        .create_shift_template(sample_shift(&schedule, hm(6, 0), hm(10, 0), 0))
        .unwrap();
    manager
        .create_shift_template(sample_shift(&schedule, hm(6, 0), hm(9, 0), 0))
        .unwrap();

    let listed: Vec<(NaiveTime, NaiveTime)> = manager
        .shift_templates_for(&schedule)
        .unwrap()
        .into_iter()
        .map(|t| (t.starting_time, t.ending_time))
        .collect();
    assert_eq!(
        listed,
        vec![
            (hm(6, 0), hm(9, 0)),
            (hm(6, 0), hm(10, 0)),
            (hm(14, 0), hm(18, 0)),
        ]
    );
}

#[test]
fn negative_slots_accepted_then_flagged() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Tri", FacilityId::new("refuge-nord"));
    let mut template = sample_shift(&schedule, hm(9, 0), hm(12, 0), 0);
    template.slots = -3;
    let id = manager.create_shift_template(template).unwrap();

    let anomalies = manager.detect_anomalies();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].shift_template, id);
    assert_eq!(anomalies[0].kind, AnomalyKind::NegativeSlots);
}

#[test]
fn raw_writes_show_up_as_anomalies() {
    let mut manager = TemplateManager::new();
    let schedule = manager.create_schedule_template("Brut", FacilityId::new("refuge-nord"));
    let inverted = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(17, 0), 0))
        .unwrap();
    let orphan = manager
        .create_shift_template(sample_shift(&schedule, hm(9, 0), hm(17, 0), 0))
        .unwrap();

    // contourne le gestionnaire
    {
        let catalog = manager.catalog_mut();
        let raw = catalog.find_shift_template_mut(&inverted).unwrap();
        raw.starting_time = hm(20, 0);
        raw.ending_time = hm(5, 0);
        let raw = catalog.find_shift_template_mut(&orphan).unwrap();
        raw.schedule_template = ScheduleTemplateId::new("absent");
    }

    let anomalies = manager.detect_anomalies();
    assert_eq!(anomalies.len(), 2);
    assert!(anomalies.iter().any(|a| a.kind == AnomalyKind::EndsBeforeStart));
    assert!(anomalies.iter().any(|a| a.kind == AnomalyKind::Orphan));
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_shift(
    schedule: &ScheduleTemplateId,
    start: NaiveTime,
    end: NaiveTime,
    days: u32,
) -> ShiftTemplate {
    let mut template = ShiftTemplate::new(schedule.clone(), TaskId::new("cuisine"), 2, start, end);
    template.days = days;
    template
}
