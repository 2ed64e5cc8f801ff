//! Training plan generation.
//!
//! Ids are sequential integers rendered as text, computed from each row's
//! position so departments can be generated in parallel.

use fake::Fake;
use fake::faker::company::en::{CatchPhrase, Industry};
use fake::faker::lorem::en::Words;
use kiwitrain_models::{
    Department, DepartmentId, PhaseId, TaskType, TrainingModule, TrainingPhase, TrainingTask,
};
use rayon::prelude::*;

use super::models::HierarchyPerDepartment;

const TASK_TYPES: [TaskType; 4] = [
    TaskType::Team,
    TaskType::Homework,
    TaskType::SelfStudy,
    TaskType::Quiz,
];

/// One department with its whole training plan.
#[derive(Debug, Clone)]
pub struct DepartmentTree {
    pub department: Department,
    pub phases: Vec<TrainingPhase>,
    pub modules: Vec<TrainingModule>,
    pub tasks: Vec<TrainingTask>,
}

fn title_case(words: Vec<String>) -> String {
    words
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_department(dept_idx: usize, shape: &HierarchyPerDepartment) -> DepartmentTree {
    let department_id = DepartmentId::from((dept_idx + 1).to_string());
    let industry: String = Industry().fake();
    let department = Department::new(department_id.clone(), industry, dept_idx as i64 + 1);

    let phases: Vec<TrainingPhase> = (0..shape.phases)
        .map(|p| {
            let mut phase = TrainingPhase::new(
                (dept_idx * shape.phases + p + 1).to_string(),
                department_id.clone(),
                format!("Phase {}", p + 1),
                p as i64 + 1,
            );
            phase.description = Some(CatchPhrase().fake());
            phase
        })
        .collect();

    let module_base = dept_idx * shape.modules();
    let modules: Vec<TrainingModule> = (0..shape.modules())
        .map(|m| {
            let phase_idx = m / shape.modules_per_phase.max(1);
            let phase_id = (m < shape.phases * shape.modules_per_phase)
                .then(|| phases[phase_idx].id.clone());
            let sort_order = match &phase_id {
                Some(_) => (m % shape.modules_per_phase.max(1)) as i64 + 1,
                None => (m - shape.phases * shape.modules_per_phase) as i64 + 1,
            };
            TrainingModule::new(
                (module_base + m + 1).to_string(),
                department_id.clone(),
                phase_id,
                CatchPhrase().fake::<String>(),
                sort_order,
            )
        })
        .collect();

    let tasks: Vec<TrainingTask> = modules
        .iter()
        .enumerate()
        .flat_map(|(m, module)| {
            (0..shape.tasks_per_module).map(move |t| {
                let id = (module_base + m) * shape.tasks_per_module + t + 1;
                let mut task = TrainingTask::new(
                    id.to_string(),
                    module.id.clone(),
                    title_case(Words(2..5).fake()),
                    t as i64 + 1,
                );
                task.task_type = TASK_TYPES[t % TASK_TYPES.len()].clone();
                task
            })
        })
        .collect();

    DepartmentTree {
        department,
        phases,
        modules,
        tasks,
    }
}

/// Generates the training plan for `num_departments` departments.
pub fn generate_training(
    num_departments: usize,
    shape: &HierarchyPerDepartment,
) -> Vec<DepartmentTree> {
    (0..num_departments)
        .into_par_iter()
        .map(|dept_idx| generate_department(dept_idx, shape))
        .collect()
}
