/// A step in a saga: one forward operation and an optional compensation.
///
/// Unlike a classic saga, the compensation of a step does not undo the step
/// itself. It undoes the cumulative effect of the step *before* it, and runs
/// only when this step's forward operation fails (or when a later step fails
/// and the rollback walk reaches this step). A failed forward operation is
/// presumed to have had no effect of its own.
///
/// # Type Parameters
///
/// - `Context`: Shared dependencies (injected, not owned by the step)
/// - `Error`: The error type for step failures
pub trait SagaStep {
    /// Shared context providing dependencies.
    type Context;

    /// Error type for step failures.
    type Error;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Execute the forward operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails to complete.
    fn execute(&self, ctx: &Self::Context) -> Result<(), Self::Error>;

    /// Whether this step carries a compensation for the previous step.
    ///
    /// A step without a compensation terminates the rollback walk.
    fn has_compensation(&self) -> bool {
        false
    }

    /// Undo the effect of the previous step.
    ///
    /// Only called during rollback, and only if [`has_compensation`]
    /// returns `true`. The default implementation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails.
    ///
    /// [`has_compensation`]: SagaStep::has_compensation
    fn compensate_previous(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let _ = ctx;
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo the step before {}", self.name())
    }
}
