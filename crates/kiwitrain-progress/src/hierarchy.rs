//! Hierarchy index.
//!
//! [`HierarchyIndex::build`] turns the flat department, phase, module and
//! task rows of one snapshot into ordered groups and numbers every module
//! with a day index.
//!
//! Ordering is always by `sort_order` ascending with a stable sort, so rows
//! sharing a `sort_order` keep their input order on every run.
//!
//! Day indices are assigned per department: the modules of each phase, phases
//! in order, numbered from 1; then the department's unassigned modules,
//! continuing the same counter.
//!
//! ```text
//! Phase 1:  Module A (D1)  Module B (D2)
//! Phase 2:  Module C (D3)  Module D (D4)
//! Unassigned:              Module E (D5)
//! ```
//!
//! A module is unassigned when it has no `phase_id`, or when its `phase_id`
//! names no known phase of its own department. The index holds unassigned
//! modules with `phase_id` cleared. Rows with ids repeated in the
//! input are kept once (first occurrence wins).

use kiwitrain_models::{
    Department, DepartmentId, ModuleId, PhaseId, TaskId, TrainingModule, TrainingPhase,
    TrainingTask,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Keep the first row for every id.
fn dedup_by_id<'a, T, K>(rows: &'a [T], id: impl Fn(&T) -> &K) -> Vec<&'a T>
where
    K: Eq + Hash + 'a,
{
    let mut seen: HashSet<&K> = HashSet::with_capacity(rows.len());
    rows.iter().filter(|row| seen.insert(id(*row))).collect()
}

fn next_sort_order(existing: impl Iterator<Item = i64>) -> i64 {
    existing.fold(0, i64::max) + 1
}

/// Module and task counts for one phase, or for the unassigned bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    /// `None` for the unassigned bucket
    pub phase_id: Option<PhaseId>,
    pub name: String,
    pub module_count: usize,
    pub task_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    departments: Vec<Department>,
    phases: HashMap<DepartmentId, Vec<TrainingPhase>>,
    phased_modules: HashMap<PhaseId, Vec<TrainingModule>>,
    unassigned: HashMap<DepartmentId, Vec<TrainingModule>>,
    tasks: HashMap<ModuleId, Vec<TrainingTask>>,
    day_order: HashMap<DepartmentId, Vec<TrainingModule>>,
    day_index: HashMap<ModuleId, u32>,
    department_tasks: HashMap<DepartmentId, Vec<TaskId>>,
}

impl HierarchyIndex {
    pub fn build(
        departments: &[Department],
        phases: &[TrainingPhase],
        modules: &[TrainingModule],
        tasks: &[TrainingTask],
    ) -> Self {
        let mut index = HierarchyIndex::default();

        index.departments = dedup_by_id(departments, |d| &d.id)
            .into_iter()
            .cloned()
            .collect();
        index.departments.sort_by_key(Department::sort_key);

        let mut phase_owner: HashMap<PhaseId, DepartmentId> = HashMap::new();
        for phase in dedup_by_id(phases, |p| &p.id) {
            phase_owner.insert(phase.id.clone(), phase.department_id.clone());
            index
                .phases
                .entry(phase.department_id.clone())
                .or_default()
                .push(phase.clone());
        }
        for group in index.phases.values_mut() {
            group.sort_by_key(TrainingPhase::sort_key);
        }

        for module in dedup_by_id(modules, |m| &m.id) {
            let phase = module
                .phase_id
                .as_ref()
                .filter(|pid| phase_owner.get(*pid) == Some(&module.department_id));

            match phase {
                Some(pid) => index
                    .phased_modules
                    .entry(pid.clone())
                    .or_default()
                    .push(module.clone()),
                None => index
                    .unassigned
                    .entry(module.department_id.clone())
                    .or_default()
                    .push(TrainingModule {
                        phase_id: None,
                        ..module.clone()
                    }),
            }
        }
        for group in index.phased_modules.values_mut() {
            group.sort_by_key(TrainingModule::sort_key);
        }
        for group in index.unassigned.values_mut() {
            group.sort_by_key(TrainingModule::sort_key);
        }

        for task in dedup_by_id(tasks, |t| &t.id) {
            index
                .tasks
                .entry(task.module_id.clone())
                .or_default()
                .push(task.clone());
        }
        for group in index.tasks.values_mut() {
            group.sort_by_key(TrainingTask::sort_key);
        }

        index.assign_day_indices();

        debug!(
            departments = index.departments.len(),
            modules = index.day_index.len(),
            tasks = index.department_tasks.values().map(Vec::len).sum::<usize>(),
            "Built training hierarchy index"
        );

        index
    }

    fn assign_day_indices(&mut self) {
        for dept in &self.departments {
            let mut order: Vec<TrainingModule> = Vec::new();
            for phase in self.phases_of(&dept.id) {
                order.extend_from_slice(self.modules_of_phase(&phase.id));
            }
            order.extend_from_slice(self.unassigned_modules(&dept.id));

            // Tasks are already unique by id, and each module appears once.
            let task_ids: Vec<TaskId> = order
                .iter()
                .flat_map(|m| self.tasks_of(&m.id))
                .map(|t| t.id.clone())
                .collect();

            for (position, module) in order.iter().enumerate() {
                self.day_index.insert(module.id.clone(), position as u32 + 1);
            }
            self.department_tasks.insert(dept.id.clone(), task_ids);
            self.day_order.insert(dept.id.clone(), order);
        }
    }

    /// Departments ordered by `sort_order`.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn department(&self, id: &DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| &d.id == id)
    }

    pub fn phases_of(&self, department_id: &DepartmentId) -> &[TrainingPhase] {
        self.phases
            .get(department_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn modules_of_phase(&self, phase_id: &PhaseId) -> &[TrainingModule] {
        self.phased_modules
            .get(phase_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn unassigned_modules(&self, department_id: &DepartmentId) -> &[TrainingModule] {
        self.unassigned
            .get(department_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All modules of a known department, in day-index order.
    pub fn modules_in_day_order(&self, department_id: &DepartmentId) -> &[TrainingModule] {
        self.day_order
            .get(department_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn tasks_of(&self, module_id: &ModuleId) -> &[TrainingTask] {
        self.tasks.get(module_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 1-based day index. `None` for modules outside every known department.
    pub fn day_index(&self, module_id: &ModuleId) -> Option<u32> {
        self.day_index.get(module_id).copied()
    }

    /// Display label such as `"D3"`.
    pub fn day_label(&self, module_id: &ModuleId) -> Option<String> {
        self.day_index(module_id).map(|day| format!("D{day}"))
    }

    /// Every task reachable from the department through its modules, phased
    /// and unassigned, each id once.
    pub fn task_ids_of_department(&self, department_id: &DepartmentId) -> &[TaskId] {
        self.department_tasks
            .get(department_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Per-phase counts in phase order, followed by the unassigned bucket
    /// when it holds any module.
    pub fn phase_stats(&self, department_id: &DepartmentId) -> Vec<PhaseStats> {
        let count_tasks = |modules: &[TrainingModule]| -> usize {
            modules.iter().map(|m| self.tasks_of(&m.id).len()).sum()
        };

        let mut stats: Vec<PhaseStats> = self
            .phases_of(department_id)
            .iter()
            .map(|phase| {
                let modules = self.modules_of_phase(&phase.id);
                PhaseStats {
                    phase_id: Some(phase.id.clone()),
                    name: phase.name.clone(),
                    module_count: modules.len(),
                    task_count: count_tasks(modules),
                }
            })
            .collect();

        let unassigned = self.unassigned_modules(department_id);
        if !unassigned.is_empty() {
            stats.push(PhaseStats {
                phase_id: None,
                name: String::from("Unassigned"),
                module_count: unassigned.len(),
                task_count: count_tasks(unassigned),
            });
        }

        stats
    }

    /// `sort_order` for a new phase appended to the department.
    pub fn next_phase_sort_order(&self, department_id: &DepartmentId) -> i64 {
        next_sort_order(self.phases_of(department_id).iter().map(|p| p.sort_key()))
    }

    /// `sort_order` for a new module appended to the department.
    pub fn next_module_sort_order(&self, department_id: &DepartmentId) -> i64 {
        next_sort_order(
            self.modules_in_day_order(department_id)
                .iter()
                .map(|m| m.sort_key()),
        )
    }

    /// `sort_order` for a new task appended to the module.
    pub fn next_task_sort_order(&self, module_id: &ModuleId) -> i64 {
        next_sort_order(self.tasks_of(module_id).iter().map(|t| t.sort_key()))
    }
}
