use bevy::prelude::*;

/// Distance along the ray to a box of `size` centred on `xf`, tested in the
/// box's local space so rotation and scale are honoured.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let direction = ray_direction[axis];

        if direction == 0.0 {
            // Parallel to this slab: a miss unless the origin lies inside it.
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let (mut t0, mut t1) = ((min[axis] - origin) * inv, (max[axis] - origin) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_box_straight_ahead() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn misses_box_beside_the_ray_and_behind_it() {
        let beside = ray_aabb_hit_t(Vec3::new(3.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(beside, None);

        let behind = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(behind, None);
    }

    #[test]
    fn origin_inside_box_reports_exit_distance() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn obb_respects_translation_and_scale() {
        let door = GlobalTransform::from(
            Transform::from_xyz(3.0, 0.0, 0.0).with_scale(Vec3::new(1.1, 1.1, 1.0)),
        );
        let size = Vec3::new(1.5, 2.5, 0.2);

        // Just outside the unscaled half width but inside the scaled one.
        let edge = Vec3::new(3.0 + 0.8, 0.0, 10.0);
        assert!(ray_hits_obb(edge, Vec3::NEG_Z, &door, size).is_some());
        assert!(ray_hits_obb(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, &door, size).is_none());
    }
}
