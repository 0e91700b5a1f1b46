use crate::step::SagaStep;

type Operation<Ctx, Err> = Box<dyn Fn(&Ctx) -> Result<(), Err>>;

/// A step assembled from closures.
///
/// ```
/// use zdd_saga::{FnStep, SagaBuilder};
///
/// let saga = SagaBuilder::<(), String, _>::new("rollback failed")
///     .first_step(FnStep::new("first", |_: &()| Ok(())))
///     .then(
///         FnStep::new("second", |_: &()| Err("boom".to_string()))
///             .with_compensation(|_: &()| Ok(())),
///     )
///     .build();
///
/// assert!(saga.execute(&()).is_err());
/// ```
pub struct FnStep<Ctx, Err> {
    name: &'static str,
    forward: Operation<Ctx, Err>,
    compensation: Option<Operation<Ctx, Err>>,
    description: Option<String>,
}

impl<Ctx, Err> FnStep<Ctx, Err> {
    /// Create a step with a forward operation and no compensation.
    #[must_use]
    pub fn new<F>(name: &'static str, forward: F) -> Self
    where
        F: Fn(&Ctx) -> Result<(), Err> + 'static,
    {
        Self {
            name,
            forward: Box::new(forward),
            compensation: None,
            description: None,
        }
    }

    /// Attach a compensation that undoes the previous step.
    #[must_use]
    pub fn with_compensation<F>(mut self, compensation: F) -> Self
    where
        F: Fn(&Ctx) -> Result<(), Err> + 'static,
    {
        self.compensation = Some(Box::new(compensation));
        self
    }

    /// Override the default compensation description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl<Ctx, Err> SagaStep for FnStep<Ctx, Err> {
    type Context = Ctx;
    type Error = Err;

    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self, ctx: &Ctx) -> Result<(), Err> {
        (self.forward)(ctx)
    }

    fn has_compensation(&self) -> bool {
        self.compensation.is_some()
    }

    fn compensate_previous(&self, ctx: &Ctx) -> Result<(), Err> {
        match &self.compensation {
            Some(compensation) => compensation(ctx),
            None => Ok(()),
        }
    }

    fn compensation_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("undo the step before {}", self.name))
    }
}
