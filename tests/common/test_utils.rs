use airdrop::{
    cgmath::{InnerSpace, Vector3},
    config::TerrainConfig,
    data_structures::{model::Mesh, terrain::HeightField},
};

pub const EPS: f32 = 1e-4;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Ground at elevation 0 everywhere.
pub fn flat_ground() -> HeightField {
    HeightField::flat(0.0, TerrainConfig::default())
}

pub fn vec3(v: [f32; 3]) -> Vector3<f32> {
    Vector3::from(v)
}

pub fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < EPS, "{} != {}", a, b);
}

pub fn assert_vec_close(a: Vector3<f32>, b: Vector3<f32>) {
    assert!((a - b).magnitude() < EPS, "{:?} != {:?}", a, b);
}

pub fn assert_indices_in_bounds(mesh: &Mesh) {
    let count = mesh.vertex_count() as u32;
    for &i in &mesh.indices {
        assert!(i < count, "{} index {} out of {} vertices", mesh.name, i, count);
    }
}

/// Every non-degenerate triangle must face the same way as its vertex normals.
pub fn assert_outward_winding(mesh: &Mesh) {
    for (t, [a, b, c]) in mesh.triangles().enumerate() {
        let (pa, pb, pc) = (vec3(a.position), vec3(b.position), vec3(c.position));
        let face = (pb - pa).cross(pc - pa);
        if face.magnitude() < 1e-6 {
            continue;
        }
        let normals = vec3(a.normal) + vec3(b.normal) + vec3(c.normal);
        assert!(
            face.dot(normals) > 0.0,
            "{} triangle {} winds inwards: face {:?}, normals {:?}",
            mesh.name,
            t,
            face,
            normals
        );
    }
}

/// Unit normal, tangent in the surface plane, `tangent × bitangent == normal`.
pub fn assert_tangent_frames(mesh: &Mesh) {
    for (i, v) in mesh.vertices.iter().enumerate() {
        let (n, t, b) = (vec3(v.normal), vec3(v.tangent), vec3(v.bitangent));
        assert!((n.magnitude() - 1.0).abs() < EPS, "{} vertex {} normal {:?}", mesh.name, i, n);
        assert!((t.magnitude() - 1.0).abs() < EPS, "{} vertex {} tangent {:?}", mesh.name, i, t);
        assert!(n.dot(t).abs() < EPS, "{} vertex {} tangent not in plane", mesh.name, i);
        assert!(
            (t.cross(b) - n).magnitude() < EPS,
            "{} vertex {} frame is not right-handed",
            mesh.name,
            i
        );
    }
}

/// Unit normal and tangent with `bitangent == normal × tangent`. The tangent
/// may lean out of the surface plane.
pub fn assert_loose_tangent_frames(mesh: &Mesh) {
    for (i, v) in mesh.vertices.iter().enumerate() {
        let (n, t, b) = (vec3(v.normal), vec3(v.tangent), vec3(v.bitangent));
        assert!((n.magnitude() - 1.0).abs() < EPS, "{} vertex {} normal {:?}", mesh.name, i, n);
        assert!((t.magnitude() - 1.0).abs() < EPS, "{} vertex {} tangent {:?}", mesh.name, i, t);
        assert!(
            (n.cross(t) - b).magnitude() < EPS,
            "{} vertex {} bitangent is not normal × tangent",
            mesh.name,
            i
        );
    }
}
