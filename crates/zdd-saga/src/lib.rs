//! Ordered compensating-action executor.
//!
//! A [`Saga`] runs its steps strictly in order. A step may carry a
//! compensation that undoes the effect of the step *before* it; when a step
//! fails, compensations are walked backwards from the failing step until a
//! step without one is reached.

mod audit;
mod builder;
mod error;
mod fn_step;
mod saga;
mod step;

pub use audit::{CompensationStatus, SagaAuditLog, StepRecord, StepStatus};
pub use builder::{Empty, HasSteps, SagaBuilder};
pub use error::{CompensationError, SagaError};
pub use fn_step::FnStep;
pub use saga::{Saga, StepOutline};
pub use step::SagaStep;
