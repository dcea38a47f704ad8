use bevy::prelude::*;

#[derive(Component)]
pub struct Ball;

/// Monotonic per-axis wall-contact counters. Each lane increments exactly
/// once per bound contact per frame, never decrements. Parity always matches
/// the current travel direction on that axis (even = positive).
#[derive(Component, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AxisBounces(pub UVec3);

/// Signed per-axis travel direction, components are exactly +1.0 or -1.0.
/// Flipped on wall contact, in lock-step with the matching counter lane.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct BounceDirection(pub Vec3);

impl BounceDirection {
    /// Direction implied by counter parity: even counts travel positive.
    pub fn from_parity(bounces: AxisBounces) -> Self {
        let signed = |n: u32| if n % 2 == 0 { 1.0 } else { -1.0 };
        Self(Vec3::new(
            signed(bounces.0.x),
            signed(bounces.0.y),
            signed(bounces.0.z),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_counter_parity() {
        let even = BounceDirection::from_parity(AxisBounces(UVec3::new(0, 2, 4)));
        assert_eq!(even.0, Vec3::ONE);
        let odd = BounceDirection::from_parity(AxisBounces(UVec3::new(1, 3, 5)));
        assert_eq!(odd.0, Vec3::NEG_ONE);
        let mixed = BounceDirection::from_parity(AxisBounces(UVec3::new(0, 1, 0)));
        assert_eq!(mixed.0, Vec3::new(1.0, -1.0, 1.0));
    }
}
