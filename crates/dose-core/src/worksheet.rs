//! Worksheet: the document holding every task of one job.
//!
//! All mutations go through methods that leave each touched task
//! recomputed. The worksheet also remembers which reference table its
//! limits were copied from.

use std::collections::BTreeSet;

use dose_model::{
    ExtremityId, FieldEdit, IdCounter, ModelError, NuclideLookup, RadionuclideId, SyncError, Task,
    TaskId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::edit::{EditError, EditOutcome, apply_edit};
use crate::engine::{recompute, recompute_in_place};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorksheetError {
    #[error("no task with id {0}")]
    UnknownTask(TaskId),

    #[error("worksheet holds task id {0} more than once")]
    DuplicateTask(TaskId),

    #[error("no task identifiers left in this worksheet")]
    TaskIdsExhausted,

    #[error("worksheet holds {id} but its task counter is at {next}")]
    StaleTaskCounter { id: TaskId, next: u32 },

    #[error("{task}: {source}")]
    Edit {
        task: TaskId,
        #[source]
        source: EditError,
    },

    #[error("{task}: {source}")]
    Sync {
        task: TaskId,
        #[source]
        source: SyncError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// How a loaded table relates to the one recorded in the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceCheck {
    /// No table was recorded; the given one is now.
    Recorded,
    Matched,
    /// A different table was recorded; the given one replaces it.
    Replaced { previous: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Work control document number.
    #[serde(default)]
    pub wcd_number: String,
    /// Radiological work permit number.
    #[serde(default)]
    pub rwp_number: String,
    /// SHA-256 of the reference table nuclide limits were copied from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_fingerprint: Option<String>,
    tasks: Vec<Task>,
    next_task: IdCounter,
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Worksheet {
    /// An empty worksheet.
    pub fn new() -> Self {
        Self {
            wcd_number: String::new(),
            rwp_number: String::new(),
            reference_fingerprint: None,
            tasks: Vec::new(),
            next_task: IdCounter::default(),
        }
    }

    /// A worksheet with one default task, as a new job starts.
    pub fn with_default_task() -> Self {
        let (first, next_task) = IdCounter::with_first();
        Self {
            tasks: vec![recompute(&Task::new(TaskId::new(first), "New Task 1"))],
            next_task,
            ..Self::new()
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn reference_fingerprint(&self) -> Option<&str> {
        self.reference_fingerprint.as_deref()
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, WorksheetError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(WorksheetError::UnknownTask(id))
    }

    /// Appends a recomputed default task. Without a title it is named
    /// `New Task <n>` after the resulting task count.
    pub fn add_task(&mut self, title: Option<&str>) -> Result<TaskId, WorksheetError> {
        let id = self
            .next_task
            .allocate()
            .map(TaskId::new)
            .ok_or(WorksheetError::TaskIdsExhausted)?;
        let title = match title {
            Some(title) => title.to_string(),
            None => format!("New Task {}", self.tasks.len() + 1),
        };
        let task = recompute(&Task::new(id, title));
        info!(task = %id, title = %task.title, "added task");
        self.tasks.push(task);
        Ok(id)
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, WorksheetError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(WorksheetError::UnknownTask(id))?;
        let task = self.tasks.remove(index);
        info!(task = %id, remaining = self.tasks.len(), "removed task");
        Ok(task)
    }

    /// Job total: the sum of task effective doses, uncomputed counted as 0.
    pub fn total_effective_dose(&self) -> f64 {
        self.tasks
            .iter()
            .map(|task| task.summary.effective_dose.unwrap_or(0.0))
            .fold(0.0, |total, dose| total + dose)
    }

    /// Applies one field edit to a task. Returns whether the task changed.
    pub fn apply_edit<L>(
        &mut self,
        task_id: TaskId,
        edit: &FieldEdit,
        table: &L,
    ) -> Result<bool, WorksheetError>
    where
        L: NuclideLookup + ?Sized,
    {
        let task = self.task_mut(task_id)?;
        let outcome = apply_edit(task, edit, table).map_err(|source| WorksheetError::Edit {
            task: task_id,
            source,
        })?;
        match outcome {
            EditOutcome::Changed(next) => {
                *task = next;
                Ok(true)
            }
            EditOutcome::Unchanged => Ok(false),
        }
    }

    pub fn add_radionuclide(&mut self, task_id: TaskId) -> Result<RadionuclideId, WorksheetError> {
        let task = self.task_mut(task_id)?;
        let id = task
            .add_radionuclide()
            .map_err(|source| WorksheetError::Sync {
                task: task_id,
                source,
            })?;
        recompute_in_place(task);
        info!(task = %task_id, radionuclide = %id, "added radionuclide");
        Ok(id)
    }

    pub fn remove_radionuclide(
        &mut self,
        task_id: TaskId,
        id: RadionuclideId,
    ) -> Result<(), WorksheetError> {
        let task = self.task_mut(task_id)?;
        if let Err(source) = task.remove_radionuclide(id) {
            warn!(task = %task_id, radionuclide = %id, %source, "rejected radionuclide removal");
            return Err(WorksheetError::Sync {
                task: task_id,
                source,
            });
        }
        recompute_in_place(task);
        info!(task = %task_id, radionuclide = %id, "removed radionuclide");
        Ok(())
    }

    pub fn add_extremity(&mut self, task_id: TaskId) -> Result<ExtremityId, WorksheetError> {
        let task = self.task_mut(task_id)?;
        let id = task.add_extremity().map_err(|source| WorksheetError::Sync {
            task: task_id,
            source,
        })?;
        recompute_in_place(task);
        info!(task = %task_id, extremity = %id, "added extremity entry");
        Ok(id)
    }

    pub fn remove_extremity(
        &mut self,
        task_id: TaskId,
        id: ExtremityId,
    ) -> Result<(), WorksheetError> {
        let task = self.task_mut(task_id)?;
        if let Err(source) = task.remove_extremity(id) {
            warn!(task = %task_id, extremity = %id, %source, "rejected extremity removal");
            return Err(WorksheetError::Sync {
                task: task_id,
                source,
            });
        }
        recompute_in_place(task);
        info!(task = %task_id, extremity = %id, "removed extremity entry");
        Ok(())
    }

    /// Recomputes every task, e.g. after loading a document.
    pub fn recompute_all(&mut self) {
        for task in &mut self.tasks {
            recompute_in_place(task);
        }
    }

    /// Records `fingerprint` as the worksheet's reference table, warning
    /// when a different table was recorded before.
    pub fn check_reference(&mut self, fingerprint: &str) -> ReferenceCheck {
        match self.reference_fingerprint.replace(fingerprint.to_string()) {
            None => ReferenceCheck::Recorded,
            Some(previous) if previous == fingerprint => ReferenceCheck::Matched,
            Some(previous) => {
                warn!(
                    recorded = %previous,
                    loaded = %fingerprint,
                    "worksheet was prepared against a different nuclide table; \
                     limits already copied into it are kept"
                );
                ReferenceCheck::Replaced { previous }
            }
        }
    }

    /// Checks every task and the task identifiers of a loaded document.
    pub fn validate(&self) -> Result<(), WorksheetError> {
        let mut seen = BTreeSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id) {
                return Err(WorksheetError::DuplicateTask(task.id));
            }
            if task.id.get() >= self.next_task.peek() {
                return Err(WorksheetError::StaleTaskCounter {
                    id: task.id,
                    next: self.next_task.peek(),
                });
            }
            task.validate()?;
        }
        Ok(())
    }
}
