use glam::Vec3;

/// A capsule-shaped kinematic body, approximated for collision as a vertical
/// cylinder. `position` is the capsule center; the feet sit at
/// `position.y - height / 2`.
///
/// `velocity` is stored in the actor's locomotion frame (local to `yaw`), so
/// steering input maps straight onto its x/z components. World-space motion
/// goes through `world_velocity` and `apply_world_delta_velocity`.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Heading around the vertical axis, in radians.
    pub yaw: f32,
    pub height: f32,
    pub radius: f32,
    /// Horizontal speed in blocks/sec at full steering input.
    pub move_speed: f32,
    /// Vertical takeoff speed in blocks/sec.
    pub jump_force: f32,
    pub on_ground: bool,
}

impl Actor {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            height: 1.8,
            radius: 0.4,
            move_speed: 5.0,
            jump_force: 8.0,
            on_ground: false,
        }
    }

    pub fn feet_y(&self) -> f32 {
        self.position.y - self.height / 2.0
    }

    /// Velocity rotated from the locomotion frame into world space.
    pub fn world_velocity(&self) -> Vec3 {
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(
            self.velocity.x * cos + self.velocity.z * sin,
            self.velocity.y,
            -self.velocity.x * sin + self.velocity.z * cos,
        )
    }

    /// Adds a world-space velocity change, rotating it back into the
    /// locomotion frame first.
    pub fn apply_world_delta_velocity(&mut self, delta: Vec3) {
        let (sin, cos) = self.yaw.sin_cos();
        self.velocity.x += delta.x * cos - delta.z * sin;
        self.velocity.y += delta.y;
        self.velocity.z += delta.x * sin + delta.z * cos;
    }

    /// Launches upward if standing on something; ignored mid-air.
    pub fn jump(&mut self) {
        if self.on_ground {
            self.velocity.y = self.jump_force;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_world_velocity_identity_at_zero_yaw() {
        let mut actor = Actor::new(Vec3::ZERO);
        actor.velocity = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(actor.world_velocity(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_world_velocity_rotates_with_yaw() {
        let mut actor = Actor::new(Vec3::ZERO);
        actor.yaw = FRAC_PI_2;
        actor.velocity = Vec3::new(1.0, 0.0, 0.0);

        let world = actor.world_velocity();
        assert_relative_eq!(world.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(world.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_apply_world_delta_velocity_inverts_rotation() {
        let mut actor = Actor::new(Vec3::ZERO);
        actor.yaw = 0.73;
        actor.velocity = Vec3::new(2.0, -1.0, 0.5);
        let before = actor.world_velocity();

        actor.apply_world_delta_velocity(Vec3::new(-0.4, 1.2, 3.0));
        let after = actor.world_velocity();

        let delta = after - before;
        assert_relative_eq!(delta.x, -0.4, epsilon = 1e-5);
        assert_relative_eq!(delta.y, 1.2, epsilon = 1e-5);
        assert_relative_eq!(delta.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_jump_requires_ground_contact() {
        let mut actor = Actor::new(Vec3::ZERO);
        actor.jump();
        assert_eq!(actor.velocity.y, 0.0);

        actor.on_ground = true;
        actor.jump();
        assert_eq!(actor.velocity.y, actor.jump_force);
    }

    #[test]
    fn test_feet_offset() {
        let actor = Actor::new(Vec3::new(0.0, 5.9, 0.0));
        assert_relative_eq!(actor.feet_y(), 5.0, epsilon = 1e-6);
    }
}
