//! Configuration for generating fake training snapshots.

/// Shape of the training plan generated for every department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyPerDepartment {
    pub phases: usize,
    pub modules_per_phase: usize,
    /// Modules left outside every phase
    pub unassigned_modules: usize,
    pub tasks_per_module: usize,
}

impl Default for HierarchyPerDepartment {
    fn default() -> Self {
        Self {
            phases: 3,
            modules_per_phase: 4,
            unassigned_modules: 1,
            tasks_per_module: 5,
        }
    }
}

impl HierarchyPerDepartment {
    pub fn modules(&self) -> usize {
        self.phases * self.modules_per_phase + self.unassigned_modules
    }

    pub fn tasks(&self) -> usize {
        self.modules() * self.tasks_per_module
    }
}

/// Complete configuration for snapshot seeding.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    pub num_departments: usize,
    pub hierarchy: HierarchyPerDepartment,
    /// Users per department, the first of which is the team leader
    pub users_per_department: usize,
    /// Chance that any one task is completed by any one user
    pub completion_ratio: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_departments: 3,
            hierarchy: HierarchyPerDepartment::default(),
            users_per_department: 8,
            completion_ratio: 0.6,
        }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of departments.
    pub fn new(num_departments: usize) -> Self {
        Self {
            num_departments,
            ..Default::default()
        }
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyPerDepartment) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_users(mut self, users_per_department: usize) -> Self {
        self.users_per_department = users_per_department;
        self
    }

    /// Sets the completion ratio, clamped to `0.0..=1.0`.
    pub fn with_completion_ratio(mut self, ratio: f64) -> Self {
        self.completion_ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    pub fn total_tasks(&self) -> usize {
        self.num_departments * self.hierarchy.tasks()
    }

    /// Department users plus the organisation-wide admin and admin staff.
    pub fn total_users(&self) -> usize {
        self.num_departments * self.users_per_department + 2
    }
}
