use crate::traits::ControlPlane;

/// Dependencies shared by every step of a deployment saga.
pub struct DeployContext<C> {
    control_plane: C,
}

impl<C> DeployContext<C>
where
    C: ControlPlane,
{
    pub fn new(control_plane: C) -> Self {
        Self { control_plane }
    }

    pub fn control_plane(&self) -> &C {
        &self.control_plane
    }
}
