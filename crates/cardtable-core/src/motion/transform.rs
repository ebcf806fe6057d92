use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn euler_xyz(&self) -> (f32, f32, f32) {
        self.rotation.to_euler(EulerRot::XYZ)
    }

    pub fn set_euler_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Replaces the X Euler component, keeping Y and Z.
    pub fn set_euler_x(&mut self, x: f32) {
        let (_, y, z) = self.euler_xyz();
        self.set_euler_xyz(x, y, z);
    }

    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = Vec3::splat(factor);
    }

    /// Turns the local +Z axis toward `target` with +Y as up.
    ///
    /// Leaves the rotation untouched when `target` coincides with the position.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let right = Vec3::Y
            .cross(forward)
            .try_normalize()
            .unwrap_or_else(|| Vec3::X.cross(forward).normalize());
        let up = forward.cross(right);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use glam::{Quat, Vec3};

    const EPS: f32 = 1e-4;

    #[test]
    fn look_at_points_local_z_at_target() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let target = Vec3::new(4.0, -1.0, 9.0);
        transform.look_at(target);

        let forward = transform.rotation * Vec3::Z;
        let expected = (target - transform.position).normalize();
        assert!(forward.abs_diff_eq(expected, EPS), "{forward:?} vs {expected:?}");
    }

    #[test]
    fn look_at_straight_up_does_not_produce_nan() {
        let mut transform = Transform::IDENTITY;
        transform.look_at(Vec3::new(0.0, 10.0, 0.0));
        assert!(transform.rotation.is_finite());
        let forward = transform.rotation * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn look_at_own_position_is_ignored() {
        let mut transform = Transform::from_position(Vec3::ONE);
        transform.rotation = Quat::from_rotation_y(0.3);
        transform.look_at(Vec3::ONE);
        assert!(transform.rotation.abs_diff_eq(Quat::from_rotation_y(0.3), EPS));
    }

    #[test]
    fn set_euler_x_keeps_other_components() {
        let mut transform = Transform::IDENTITY;
        transform.set_euler_xyz(0.2, 0.4, -0.1);
        transform.set_euler_x(-1.0);
        let (x, y, z) = transform.euler_xyz();
        assert!((x + 1.0).abs() < EPS);
        assert!((y - 0.4).abs() < EPS);
        assert!((z + 0.1).abs() < EPS);
    }
}
