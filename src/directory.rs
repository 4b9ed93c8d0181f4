use crate::model::{FacilityId, TaskId, WorkplaceId};
use std::collections::HashMap;

/// Annuaire en lecture seule des entités organisation (Facility, Task,
/// Workplace). Ces entités vivent ailleurs ; ici on ne résout que des noms.
pub trait OrgDirectory {
    fn facility_name(&self, id: &FacilityId) -> Option<&str>;
    fn task_name(&self, id: &TaskId) -> Option<&str>;
    fn workplace_name(&self, id: &WorkplaceId) -> Option<&str>;
}

/// Annuaire en mémoire, rempli à la main ou depuis un CSV annexe (voir `io`).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    facilities: HashMap<FacilityId, String>,
    tasks: HashMap<TaskId, String>,
    workplaces: HashMap<WorkplaceId, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_facility<N: Into<String>>(&mut self, id: FacilityId, name: N) {
        self.facilities.insert(id, name.into());
    }

    pub fn insert_task<N: Into<String>>(&mut self, id: TaskId, name: N) {
        self.tasks.insert(id, name.into());
    }

    pub fn insert_workplace<N: Into<String>>(&mut self, id: WorkplaceId, name: N) {
        self.workplaces.insert(id, name.into());
    }
}

impl OrgDirectory for InMemoryDirectory {
    fn facility_name(&self, id: &FacilityId) -> Option<&str> {
        self.facilities.get(id).map(String::as_str)
    }
    fn task_name(&self, id: &TaskId) -> Option<&str> {
        self.tasks.get(id).map(String::as_str)
    }
    fn workplace_name(&self, id: &WorkplaceId) -> Option<&str> {
        self.workplaces.get(id).map(String::as_str)
    }
}
