use std::time::Instant;

/// Forward status of a step in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Step started but has not finished.
    Running,
    /// Step executed successfully.
    Executed,
    /// Step failed during execution.
    Failed,
}

/// Outcome of a step's compensation, when the rollback walk reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationStatus {
    /// The previous step was undone.
    Succeeded,
    /// The compensation failed; the walk stopped here.
    Failed,
}

/// Record of a step's execution in the saga.
#[derive(Debug)]
pub struct StepRecord {
    /// Name of the step.
    pub name: String,
    /// Forward status.
    pub status: StepStatus,
    /// Compensation outcome, if the step's compensation was invoked.
    pub compensation: Option<CompensationStatus>,
    /// When the step started executing.
    pub started_at: Instant,
    /// When the step last changed state (execution or compensation).
    pub completed_at: Option<Instant>,
}

/// Audit log tracking all step executions in a saga.
#[derive(Debug, Default)]
pub struct SagaAuditLog {
    records: Vec<StepRecord>,
}

impl SagaAuditLog {
    /// Create a new empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Running,
            compensation: None,
            started_at: Instant::now(),
            completed_at: None,
        });
    }

    pub(crate) fn record_failure(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Failed;
            record.completed_at = Some(Instant::now());
        }
    }

    pub(crate) fn record_success(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Executed;
            record.completed_at = Some(Instant::now());
        }
    }

    pub(crate) fn record_compensated(&mut self, index: usize) {
        self.set_compensation(index, CompensationStatus::Succeeded);
    }

    pub(crate) fn record_compensation_failed(&mut self, index: usize) {
        self.set_compensation(index, CompensationStatus::Failed);
    }

    fn set_compensation(&mut self, index: usize, status: CompensationStatus) {
        if let Some(record) = self.records.get_mut(index) {
            record.compensation = Some(status);
            record.completed_at = Some(Instant::now());
        }
    }

    /// Get all records in the audit log.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Number of compensations that were invoked.
    #[must_use]
    pub fn compensations_invoked(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.compensation.is_some())
            .count()
    }

    /// Get a summary of the saga execution for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                StepStatus::Running => "…",
                StepStatus::Executed => "✓",
                StepStatus::Failed => "✗",
            };
            let line = match record.compensation {
                None => format!("{status} {}", record.name),
                Some(CompensationStatus::Succeeded) => {
                    format!("{status} {} (↩ previous step undone)", record.name)
                }
                Some(CompensationStatus::Failed) => {
                    format!("{status} {} (⚠ rollback failed)", record.name)
                }
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}
