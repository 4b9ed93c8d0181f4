#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use benevolat::{
    directory::InMemoryDirectory,
    display::{format_duration, schedule_template_label, shift_template_label, TextLocalizer},
    io,
    manager::{AnomalyKind, TemplateManager},
    model::{FacilityId, ScheduleTemplateId, ShiftTemplate, ShiftTemplateId, TaskId, WorkplaceId},
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste des gabarits de créneaux bénévoles (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du catalogue
    #[arg(long, global = true, default_value = "templates.json")]
    catalog: String,

    /// Annuaire CSV des noms (`kind,id,name`), facultatif
    #[arg(long, global = true)]
    directory: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un gabarit de planning
    CreateSchedule {
        #[arg(long)]
        name: String,
        /// Identifiant de la facility (entité externe)
        #[arg(long)]
        facility: String,
    },

    /// Créer un gabarit de créneau
    CreateShift {
        #[arg(long)]
        schedule: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        workplace: Option<String>,
        /// Nombre de bénévoles attendus
        #[arg(long, allow_negative_numbers = true)]
        slots: i32,
        /// Heure de début (HH:MM ou HH:MM:SS)
        #[arg(long)]
        start: String,
        /// Heure de fin (HH:MM ou HH:MM:SS)
        #[arg(long)]
        end: String,
        /// Décalage de jours quand la fin déborde du jour de début
        #[arg(long, default_value_t = 0)]
        days: u32,
    },

    /// Modifier un gabarit de créneau (le décalage est re-normalisé)
    UpdateShift {
        #[arg(long)]
        id: String,
        #[arg(long)]
        schedule: Option<String>,
        #[arg(long)]
        task: Option<String>,
        /// Chaîne vide pour effacer le workplace
        #[arg(long)]
        workplace: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        slots: Option<i32>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },

    /// Supprimer un gabarit de planning et, en cascade, ses créneaux
    DeleteSchedule {
        #[arg(long)]
        id: String,
    },

    /// Supprimer un gabarit de créneau
    DeleteShift {
        #[arg(long)]
        id: String,
    },

    /// Lister par facility et optionnellement exporter
    List {
        /// Restreindre à une facility
        #[arg(long)]
        facility: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher un gabarit de créneau (libellé et durée)
    Show {
        #[arg(long)]
        id: String,
    },

    /// Balayer le catalogue à la recherche d'anomalies
    Check {
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Importer des gabarits de créneaux depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Exporter un gabarit de planning avec ses créneaux (JSON autonome)
    ExportSchedule {
        #[arg(long)]
        id: String,
        #[arg(long)]
        out: String,
    },

    /// Importer un gabarit de planning exporté
    ImportSchedule {
        #[arg(long)]
        json: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }
    #[cfg(not(feature = "logging"))]
    if cli.log {
        eprintln!("--log sans effet : binaire compilé sans la feature `logging`");
    }

    let storage = JsonStorage::open(&cli.catalog)?;
    let mut manager = TemplateManager::from_catalog(storage.load_or_default()?);

    let directory = match &cli.directory {
        Some(path) => io::load_directory_csv(path)?,
        None => InMemoryDirectory::new(),
    };
    let locale = TextLocalizer;

    let code = match cli.cmd {
        Commands::CreateSchedule { name, facility } => {
            let id = manager.create_schedule_template(&name, FacilityId::new(facility));
            storage.save(manager.catalog())?;
            println!("{}", id.as_str());
            0
        }
        Commands::CreateShift {
            schedule,
            task,
            workplace,
            slots,
            start,
            end,
            days,
        } => {
            let mut template = ShiftTemplate::new(
                ScheduleTemplateId::new(schedule),
                TaskId::new(task),
                slots,
                io::parse_time(&start)?,
                io::parse_time(&end)?,
            );
            template.workplace = workplace.filter(|w| !w.is_empty()).map(WorkplaceId::new);
            template.days = days;
            let id = manager.create_shift_template(template)?;
            let stored = manager
                .catalog()
                .find_shift_template(&id)
                .map(|t| t.days)
                .unwrap_or(days);
            if days == 0 && stored == 1 {
                eprintln!("days ajusté à 1 : la fin ne suit pas le début sur le même jour");
            }
            storage.save(manager.catalog())?;
            println!("{}", id.as_str());
            0
        }
        Commands::UpdateShift {
            id,
            schedule,
            task,
            workplace,
            slots,
            start,
            end,
            days,
        } => {
            let id = ShiftTemplateId::new(id);
            let start = start.map(|s| io::parse_time(&s)).transpose()?;
            let end = end.map(|s| io::parse_time(&s)).transpose()?;
            let before = manager
                .catalog()
                .find_shift_template(&id)
                .map(|t| t.days)
                .with_context(|| format!("unknown shift template: {}", id.as_str()))?;

            manager.update_shift_template(&id, |t| {
                if let Some(schedule) = schedule {
                    t.schedule_template = ScheduleTemplateId::new(schedule);
                }
                if let Some(task) = task {
                    t.task = TaskId::new(task);
                }
                if let Some(workplace) = workplace {
                    t.workplace = if workplace.is_empty() {
                        None
                    } else {
                        Some(WorkplaceId::new(workplace))
                    };
                }
                if let Some(slots) = slots {
                    t.slots = slots;
                }
                if let Some(start) = start {
                    t.starting_time = start;
                }
                if let Some(end) = end {
                    t.ending_time = end;
                }
                if let Some(days) = days {
                    t.days = days;
                }
            })?;

            let stored = manager
                .catalog()
                .find_shift_template(&id)
                .map(|t| t.days)
                .unwrap_or(before);
            if stored == 1 && days.unwrap_or(before) == 0 {
                eprintln!("days ajusté à 1 : la fin ne suit pas le début sur le même jour");
            }
            storage.save(manager.catalog())?;
            0
        }
        Commands::DeleteSchedule { id } => {
            let id = ScheduleTemplateId::new(id);
            let removed = manager.remove_schedule_template(&id)?;
            storage.save(manager.catalog())?;
            println!("{removed} créneau(x) supprimé(s) en cascade");
            0
        }
        Commands::DeleteShift { id } => {
            manager.remove_shift_template(&ShiftTemplateId::new(id))?;
            storage.save(manager.catalog())?;
            0
        }
        Commands::List {
            facility,
            out_json,
            out_csv,
        } => {
            if let Some(path) = out_json {
                io::export_catalog_json(path, manager.catalog())?;
            }
            if let Some(path) = out_csv {
                io::export_shift_templates_csv(path, manager.catalog())?;
            }
            // impression compacte, une facility après l'autre
            let wanted = facility.map(FacilityId::new);
            for schedule in manager.schedule_templates_by_facility() {
                if let Some(f) = &wanted {
                    if &schedule.facility != f {
                        continue;
                    }
                }
                println!(
                    "{} | {}",
                    schedule.id.as_str(),
                    schedule_template_label(schedule, &directory)
                );
                for shift in manager.shift_templates_for(&schedule.id)? {
                    let label = shift_template_label(shift, manager.catalog(), &directory, &locale)?;
                    println!(
                        "  {} | {} | {}",
                        shift.id.as_str(),
                        label,
                        format_duration(shift.duration())
                    );
                }
            }
            0
        }
        Commands::Show { id } => {
            let id = ShiftTemplateId::new(id);
            let shift = manager
                .catalog()
                .find_shift_template(&id)
                .with_context(|| format!("unknown shift template: {}", id.as_str()))?;
            let label = shift_template_label(shift, manager.catalog(), &directory, &locale)?;
            println!("{label}");
            println!("durée : {}", format_duration(shift.duration()));
            0
        }
        Commands::Check { report } => {
            let anomalies = manager.detect_anomalies();
            if anomalies.is_empty() {
                println!("OK: no anomalies");
                0
            } else {
                eprintln!("Found {} anomaly(ies)", anomalies.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["shift_template", "kind"])?;
                    for a in &anomalies {
                        w.write_record([
                            a.shift_template.as_str(),
                            match a.kind {
                                AnomalyKind::Orphan => "orphan",
                                AnomalyKind::EndsBeforeStart => "ends_before_start",
                                AnomalyKind::NegativeSlots => "negative_slots",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::ImportShifts { csv } => {
            let templates = io::import_shift_templates_csv(csv)?;
            let count = manager.add_shift_templates(templates)?;
            storage.save(manager.catalog())?;
            println!("{count} gabarit(s) importé(s)");
            0
        }
        Commands::ExportSchedule { id, out } => {
            io::export_schedule_template_json(out, manager.catalog(), &ScheduleTemplateId::new(id))?;
            0
        }
        Commands::ImportSchedule { json } => {
            let bundle = io::load_bundle_from_file(json)?;
            let id = manager.import_bundle(bundle)?;
            storage.save(manager.catalog())?;
            println!("{}", id.as_str());
            0
        }
    };

    std::process::exit(code);
}
