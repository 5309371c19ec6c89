use sillycraft_geom::{IVec3, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_add_sub() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));

    let d = c - a;
    assert!(vec3_approx_eq(d, b, 1e-6));
}

#[test]
fn vec3_cross_follows_right_hand_rule() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn vec3_length_and_scale() {
    let v = Vec3::new(3.0, 4.0, 0.0) * 2.0;
    assert!(approx_eq(v.length(), 10.0, 1e-6));
    assert_eq!(v.to_array(), [6.0, 8.0, 0.0]);
}

#[test]
fn ivec3_to_world_has_no_offset() {
    assert_eq!(IVec3::ZERO.to_world(100.0), Vec3::ZERO);
    assert_eq!(
        IVec3::new(1, 2, 16).to_world(100.0),
        Vec3::new(100.0, 200.0, 1600.0)
    );
}

#[test]
fn ivec3_from_tuple_and_add_assign() {
    let mut a: IVec3 = (1, 2, 3).into();
    a += IVec3::new(1, 0, -3);
    assert_eq!(a, IVec3::new(2, 2, 0));
}
