use crate::world::ColliderHandle;

/// A pair reported by detection during the last `World::update`.
///
/// `a` precedes `b` in registration order, which is also the order
/// resolution was invoked in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub a: ColliderHandle,
    pub b: ColliderHandle,
    /// Either side is a trigger; no response was applied.
    pub is_trigger: bool,
}
