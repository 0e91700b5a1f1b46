use std::fmt::Debug;

use crate::audit::SagaAuditLog;
use crate::error::{CompensationError, SagaError};
use crate::step::SagaStep;

pub(crate) type BoxedStep<Ctx, Err> = Box<dyn SagaStep<Context = Ctx, Error = Err>>;

/// Structural description of one step in a saga.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutline {
    /// Name of the step.
    pub name: &'static str,
    /// Whether the step carries a compensation for the step before it.
    pub compensates_previous: bool,
}

/// A compiled saga ready for execution.
///
/// Steps execute strictly in order. If the step at index `i` fails, the
/// compensations of steps `i, i-1, ..., 0` are invoked in that order until a
/// step without a compensation is reached. A compensation that fails ends
/// the walk.
pub struct Saga<Ctx, Err> {
    steps: Vec<BoxedStep<Ctx, Err>>,
    rollback_failure_message: String,
}

impl<Ctx, Err> Saga<Ctx, Err>
where
    Err: Debug,
{
    pub(crate) fn from_steps(
        steps: Vec<BoxedStep<Ctx, Err>>,
        rollback_failure_message: String,
    ) -> Self {
        Self {
            steps,
            rollback_failure_message,
        }
    }

    /// Number of steps in the saga.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; the builder refuses to build an empty saga.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The annotation reported when a compensation fails.
    #[must_use]
    pub fn rollback_failure_message(&self) -> &str {
        &self.rollback_failure_message
    }

    /// Ordered outline of the saga's steps.
    #[must_use]
    pub fn outline(&self) -> Vec<StepOutline> {
        self.steps
            .iter()
            .map(|step| StepOutline {
                name: step.name(),
                compensates_previous: step.has_compensation(),
            })
            .collect()
    }

    /// Execute the saga.
    ///
    /// On failure, runs the rollback walk described on [`Saga`].
    ///
    /// # Errors
    ///
    /// Returns `SagaError::StepFailed` if a step fails and no compensation was reached.
    /// Returns `SagaError::RolledBack` if a step fails and all compensations succeed.
    /// Returns `SagaError::RollbackFailed` if a compensation fails as well.
    pub fn execute(&self, ctx: &Ctx) -> Result<(), SagaError<Err>> {
        let (result, _audit_log) = self.execute_internal(ctx);
        result
    }

    /// Execute the saga and return both the result and an audit log.
    pub fn execute_with_audit(&self, ctx: &Ctx) -> (Result<(), SagaError<Err>>, SagaAuditLog) {
        self.execute_internal(ctx)
    }

    fn execute_internal(&self, ctx: &Ctx) -> (Result<(), SagaError<Err>>, SagaAuditLog) {
        let mut audit_log = SagaAuditLog::new();

        for (index, step) in self.steps.iter().enumerate() {
            audit_log.record_start(step.name());

            if let Err(error) = step.execute(ctx) {
                audit_log.record_failure(index);
                let saga_error = self.compensate(ctx, &mut audit_log, index, error);
                return (Err(saga_error), audit_log);
            }

            audit_log.record_success(index);
        }

        (Ok(()), audit_log)
    }

    fn compensate(
        &self,
        ctx: &Ctx,
        audit_log: &mut SagaAuditLog,
        failed_index: usize,
        step_error: Err,
    ) -> SagaError<Err> {
        let failed_step = self.steps[failed_index].name().to_string();
        let mut compensated = Vec::new();

        for index in (0..=failed_index).rev() {
            let step = &self.steps[index];
            if !step.has_compensation() {
                break;
            }

            match step.compensate_previous(ctx) {
                Ok(()) => {
                    audit_log.record_compensated(index);
                    compensated.push(step.name().to_string());
                }
                Err(error) => {
                    audit_log.record_compensation_failed(index);
                    return SagaError::RollbackFailed {
                        failed_step,
                        step_error,
                        compensation_error: CompensationError {
                            step: step.name().to_string(),
                            description: step.compensation_description(),
                            error,
                        },
                        message: self.rollback_failure_message.clone(),
                    };
                }
            }
        }

        if compensated.is_empty() {
            SagaError::StepFailed {
                step: failed_step,
                source: step_error,
            }
        } else {
            SagaError::RolledBack {
                step: failed_step,
                compensated,
                source: step_error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::audit::{CompensationStatus, StepStatus};
    use crate::builder::SagaBuilder;

    struct TestContext {
        log: RefCell<Vec<String>>,
    }

    impl TestContext {
        fn new() -> Self {
            Self {
                log: RefCell::new(Vec::new()),
            }
        }

        fn entries(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("{0}")]
    struct TestError(String);

    struct RecordingStep {
        name: &'static str,
        fail: bool,
        compensation: Option<bool>,
    }

    impl RecordingStep {
        fn ok(name: &'static str) -> Self {
            Self {
                name,
                fail: false,
                compensation: None,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                fail: true,
                compensation: None,
            }
        }

        fn compensating(mut self, succeeds: bool) -> Self {
            self.compensation = Some(succeeds);
            self
        }
    }

    impl SagaStep for RecordingStep {
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &'static str {
            self.name
        }

        fn execute(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
            ctx.log.borrow_mut().push(format!("execute {}", self.name));
            if self.fail {
                Err(TestError(format!("{} failed", self.name)))
            } else {
                Ok(())
            }
        }

        fn has_compensation(&self) -> bool {
            self.compensation.is_some()
        }

        fn compensate_previous(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
            ctx.log
                .borrow_mut()
                .push(format!("compensate {}", self.name));
            match self.compensation {
                Some(false) => Err(TestError(format!("{} compensation failed", self.name))),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn all_steps_run_in_order_without_compensation() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let saga = SagaBuilder::new("rollback failed")
            .first_step(RecordingStep::ok("a"))
            .then(RecordingStep::ok("b").compensating(true))
            .then(RecordingStep::ok("c"))
            .build();

        saga.execute(&ctx)?;

        assert_eq!(ctx.entries(), ["execute a", "execute b", "execute c"]);
        Ok(())
    }

    #[test]
    fn failing_step_stops_forward_progress() {
        let ctx = TestContext::new();
        let saga = SagaBuilder::new("rollback failed")
            .first_step(RecordingStep::failing("a"))
            .then(RecordingStep::ok("b"))
            .build();

        let err = saga.execute(&ctx).expect_err("first step fails");

        assert!(matches!(err, SagaError::StepFailed { ref step, .. } if step == "a"));
        assert_eq!(ctx.entries(), ["execute a"]);
    }

    #[test]
    fn compensation_of_failing_step_runs_first() {
        let ctx = TestContext::new();
        let saga = SagaBuilder::new("rollback failed")
            .first_step(RecordingStep::ok("a"))
            .then(RecordingStep::ok("b").compensating(true))
            .then(RecordingStep::failing("c").compensating(true))
            .build();

        let err = saga.execute(&ctx).expect_err("third step fails");

        assert_eq!(
            ctx.entries(),
            ["execute a", "execute b", "execute c", "compensate c", "compensate b"]
        );
        match err {
            SagaError::RolledBack {
                step,
                compensated,
                source,
            } => {
                assert_eq!(step, "c");
                assert_eq!(compensated, ["c", "b"]);
                assert_eq!(source, TestError("c failed".to_string()));
            }
            other => panic!("expected RolledBack, got {other:?}"),
        }
    }

    #[test]
    fn walk_stops_at_first_step_without_compensation() {
        let ctx = TestContext::new();
        let saga = SagaBuilder::new("rollback failed")
            .first_step(RecordingStep::ok("a").compensating(true))
            .then(RecordingStep::ok("b"))
            .then(RecordingStep::failing("c").compensating(true))
            .build();

        let _ = saga.execute(&ctx);

        assert_eq!(
            ctx.entries(),
            ["execute a", "execute b", "execute c", "compensate c"]
        );
    }

    #[test]
    fn failing_compensation_abandons_walk_and_reports_annotation() {
        let ctx = TestContext::new();
        let saga = SagaBuilder::new("manual inspection required")
            .first_step(RecordingStep::ok("a").compensating(true))
            .then(RecordingStep::ok("b").compensating(false))
            .then(RecordingStep::failing("c").compensating(true))
            .build();

        let err = saga.execute(&ctx).expect_err("third step fails");

        assert_eq!(
            ctx.entries(),
            ["execute a", "execute b", "execute c", "compensate c", "compensate b"]
        );
        match err {
            SagaError::RollbackFailed {
                failed_step,
                step_error,
                compensation_error,
                message,
            } => {
                assert_eq!(failed_step, "c");
                assert_eq!(step_error, TestError("c failed".to_string()));
                assert_eq!(compensation_error.step, "b");
                assert_eq!(
                    compensation_error.error,
                    TestError("b compensation failed".to_string())
                );
                assert_eq!(message, "manual inspection required");
            }
            other => panic!("expected RollbackFailed, got {other:?}"),
        }
    }

    #[test]
    fn audit_log_tracks_forward_and_compensation_status() {
        let ctx = TestContext::new();
        let saga = SagaBuilder::new("rollback failed")
            .first_step(RecordingStep::ok("a"))
            .then(RecordingStep::failing("b").compensating(true))
            .build();

        let (result, audit_log) = saga.execute_with_audit(&ctx);

        assert!(result.is_err());
        let records = audit_log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, StepStatus::Executed);
        assert_eq!(records[0].compensation, None);
        assert_eq!(records[1].status, StepStatus::Failed);
        assert_eq!(records[1].compensation, Some(CompensationStatus::Succeeded));
    }

    #[test]
    fn outline_reports_compensation_wiring() {
        let saga: Saga<TestContext, TestError> = SagaBuilder::new("rollback failed")
            .first_step(RecordingStep::ok("a"))
            .then(RecordingStep::ok("b").compensating(true))
            .build();

        assert_eq!(
            saga.outline(),
            [
                StepOutline {
                    name: "a",
                    compensates_previous: false
                },
                StepOutline {
                    name: "b",
                    compensates_previous: true
                },
            ]
        );
        assert!(!saga.is_empty());
    }
}
