use std::fmt::Debug;
use std::marker::PhantomData;

use crate::saga::{BoxedStep, Saga};
use crate::step::SagaStep;

/// Marker type for a builder with no steps.
pub struct Empty;

/// Marker type for a builder with at least one step.
pub struct HasSteps;

/// Type-state builder for constructing sagas.
///
/// The rollback-failure annotation is fixed at construction and reported
/// whenever a compensation fails during rollback.
///
/// An empty saga (without calling `first_step()`) cannot be built:
///
/// ```compile_fail
/// use zdd_saga::SagaBuilder;
///
/// // Cannot build an empty saga - `build()` is only available after `first_step()`
/// let saga = SagaBuilder::<(), ()>::new("rollback failed").build();
/// ```
///
/// All steps share the builder's context and error types:
///
/// ```compile_fail
/// use zdd_saga::{FnStep, SagaBuilder};
///
/// let saga = SagaBuilder::<(), String>::new("rollback failed")
///     .first_step(FnStep::new("a", |_: &()| Ok::<(), String>(())))
///     .then(FnStep::new("b", |_: &u32| Ok::<(), String>(())))
///     .build();
/// ```
pub struct SagaBuilder<Ctx, Err, State = Empty> {
    steps: Vec<BoxedStep<Ctx, Err>>,
    rollback_failure_message: String,
    _phantom: PhantomData<State>,
}

impl<Ctx, Err> SagaBuilder<Ctx, Err, Empty> {
    /// Create a new saga builder in the empty state.
    #[must_use]
    pub fn new(rollback_failure_message: impl Into<String>) -> Self {
        Self {
            steps: Vec::new(),
            rollback_failure_message: rollback_failure_message.into(),
            _phantom: PhantomData,
        }
    }

    /// Add the first step to the saga.
    #[must_use]
    pub fn first_step<S>(self, step: S) -> SagaBuilder<Ctx, Err, HasSteps>
    where
        S: SagaStep<Context = Ctx, Error = Err> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(step));
        SagaBuilder {
            steps,
            rollback_failure_message: self.rollback_failure_message,
            _phantom: PhantomData,
        }
    }
}

impl<Ctx, Err> SagaBuilder<Ctx, Err, HasSteps> {
    /// Add another step to the saga.
    #[must_use]
    pub fn then<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Context = Ctx, Error = Err> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Build the saga from the accumulated steps.
    #[must_use]
    pub fn build(self) -> Saga<Ctx, Err>
    where
        Err: Debug,
    {
        Saga::from_steps(self.steps, self.rollback_failure_message)
    }
}
