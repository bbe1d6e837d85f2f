use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::model::{Material, Mesh, ModelVertex},
    error::GeometryError,
};

/**
 * Procedural generators for the primitive solids the scene is built from.
 *
 * Normals and tangents are computed analytically per primitive instead of
 * being averaged over neighbouring faces, so hard edges stay hard. Wherever
 * a position needs two different normals (cube edges, cylinder rims, cone
 * base) the vertex is duplicated. All closed solids wind counter-clockwise
 * seen from outside.
 */

/// How often the ground texture repeats across the terrain grid.
pub const TERRAIN_UV_TILING: f32 = 10.0;

fn positive(primitive: &'static str, name: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidDimension {
            primitive,
            name,
            value,
        })
    }
}

fn at_least(
    primitive: &'static str,
    what: &'static str,
    min: u32,
    got: u32,
) -> Result<u32, GeometryError> {
    if got >= min {
        Ok(got)
    } else {
        Err(GeometryError::TooFewSubdivisions {
            primitive,
            what,
            min,
            got,
        })
    }
}

/// Vertex count that still fits a `u32` index buffer. `None` means the
/// count overflowed while it was being computed.
fn addressable(primitive: &'static str, count: Option<u64>) -> Result<u32, GeometryError> {
    count
        .and_then(|c| u32::try_from(c).ok())
        .ok_or(GeometryError::TooManyVertices { primitive })
}

/// Outward normal and in-plane tangent of every cube face. The bitangent is
/// `normal × tangent`, which makes `tangent × bitangent` point outwards.
const CUBE_FACES: [([f32; 3], [f32; 3]); 6] = [
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
];

/// Axis-aligned cube centred on the origin: 24 vertices, 36 indices.
pub fn cube(size: f32, material: Material) -> Result<Mesh, GeometryError> {
    let half = positive("cube", "size", size)? / 2.0;

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, tangent) in CUBE_FACES {
        let normal = Vector3::from(normal);
        let tangent = Vector3::from(tangent);
        let bitangent = normal.cross(tangent);
        let base = vertices.len() as u32;
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let position =
                (normal + tangent * (2.0 * u - 1.0) + bitangent * (2.0 * v - 1.0)) * half;
            vertices.push(ModelVertex::new(position, normal, [u, v], tangent));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Ok(Mesh {
        name: "cube".to_string(),
        vertices,
        indices,
        material,
    })
}

/// Cone standing on the XZ plane with its apex at `(0, height, 0)`.
///
/// Layout: base centre, apex, then per segment a base-rim vertex followed by a
/// side vertex at the same position.
///
/// Side normals use the unit-circle direction `normalize(cos θ, r/h, sin θ)`
/// rather than the radius-scaled rim position, so the tilt from horizontal is
/// exactly `atan2(radius, height)` for any radius.
pub fn cone(radius: f32, height: f32, segments: u32, material: Material) -> Result<Mesh, GeometryError> {
    let radius = positive("cone", "radius", radius)?;
    let height = positive("cone", "height", height)?;
    let segments = at_least("cone", "segments", 3, segments)?;
    let count = addressable("cone", (segments as u64).checked_mul(2).and_then(|n| n.checked_add(2)))?;
    let step = TAU / segments as f32;
    let up = Vector3::unit_y();
    let down = -Vector3::unit_y();

    let mut vertices = Vec::with_capacity(count as usize);
    vertices.push(ModelVertex::new(Vector3::new(0.0, 0.0, 0.0), down, [0.5, 0.5], Vector3::unit_x()));
    vertices.push(ModelVertex::new(Vector3::new(0.0, height, 0.0), up, [0.5, 0.5], Vector3::unit_x()));

    // Side normals lean outwards from horizontal by atan2(radius, height).
    let slope = radius / height;
    for i in 0..segments {
        let (sin, cos) = (i as f32 * step).sin_cos();
        let rim = Vector3::new(radius * cos, 0.0, radius * sin);
        vertices.push(ModelVertex::new(
            rim,
            down,
            [(cos + 1.0) * 0.5, (sin + 1.0) * 0.5],
            Vector3::unit_x(),
        ));
        vertices.push(ModelVertex::new(
            rim,
            Vector3::new(cos, slope, sin).normalize(),
            [i as f32 / segments as f32, 0.0],
            Vector3::new(-sin, 0.0, cos),
        ));
    }

    let mut indices = Vec::with_capacity(6 * segments as usize);
    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[0, 2 + i * 2, 2 + next * 2]);
    }
    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[1, 2 + next * 2 + 1, 2 + i * 2 + 1]);
    }

    Ok(Mesh {
        name: "cone".to_string(),
        vertices,
        indices,
        material,
    })
}

/// Capped cylinder standing on the XZ plane.
///
/// Layout: bottom centre, top centre, then per segment bottom rim, top rim,
/// bottom side and top side. Rim and side vertices share positions but not
/// normals.
pub fn cylinder(
    radius: f32,
    height: f32,
    segments: u32,
    material: Material,
) -> Result<Mesh, GeometryError> {
    let radius = positive("cylinder", "radius", radius)?;
    let height = positive("cylinder", "height", height)?;
    let segments = at_least("cylinder", "segments", 3, segments)?;
    let count = addressable(
        "cylinder",
        (segments as u64).checked_mul(4).and_then(|n| n.checked_add(2)),
    )?;
    let step = TAU / segments as f32;
    let up = Vector3::unit_y();
    let down = -Vector3::unit_y();

    let mut vertices = Vec::with_capacity(count as usize);
    vertices.push(ModelVertex::new(Vector3::new(0.0, 0.0, 0.0), down, [0.5, 0.5], Vector3::unit_x()));
    vertices.push(ModelVertex::new(Vector3::new(0.0, height, 0.0), up, [0.5, 0.5], Vector3::unit_x()));

    for i in 0..segments {
        let (sin, cos) = (i as f32 * step).sin_cos();
        let bottom = Vector3::new(radius * cos, 0.0, radius * sin);
        let top = Vector3::new(radius * cos, height, radius * sin);
        let cap_uv = [(cos + 1.0) * 0.5, (sin + 1.0) * 0.5];
        let radial = Vector3::new(cos, 0.0, sin);
        let around = Vector3::new(-sin, 0.0, cos);
        let u = i as f32 / segments as f32;

        vertices.push(ModelVertex::new(bottom, down, cap_uv, Vector3::unit_x()));
        vertices.push(ModelVertex::new(top, up, cap_uv, Vector3::unit_x()));
        vertices.push(ModelVertex::new(bottom, radial, [u, 1.0], around));
        vertices.push(ModelVertex::new(top, radial, [u, 0.0], around));
    }

    let mut indices = Vec::with_capacity(12 * segments as usize);
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (ring, next_ring) = (2 + i * 4, 2 + next * 4);
        indices.extend_from_slice(&[0, ring, next_ring]);
        indices.extend_from_slice(&[1, next_ring + 1, ring + 1]);

        let (bl, tl) = (ring + 2, ring + 3);
        let (br, tr) = (next_ring + 2, next_ring + 3);
        indices.extend_from_slice(&[bl, tl, tr, bl, tr, br]);
    }

    Ok(Mesh {
        name: "cylinder".to_string(),
        vertices,
        indices,
        material,
    })
}

/// Ellipsoid centred on the origin with semi-axes `rx`, `ry`, `rz`.
///
/// `stacks + 1` rings from the north pole (+Y) down, each with `slices + 1`
/// vertices; the first and last vertex of a ring coincide so the texture can
/// wrap. The tangent is `normalize(-sin θ, 0, cos θ)`, the longitude
/// direction of the unit sphere; it is only orthogonal to the normal when
/// `rx == rz`.
pub fn ellipsoid(
    rx: f32,
    ry: f32,
    rz: f32,
    slices: u32,
    stacks: u32,
    material: Material,
) -> Result<Mesh, GeometryError> {
    let rx = positive("ellipsoid", "rx", rx)?;
    let ry = positive("ellipsoid", "ry", ry)?;
    let rz = positive("ellipsoid", "rz", rz)?;
    let slices = at_least("ellipsoid", "slices", 1, slices)?;
    let stacks = at_least("ellipsoid", "stacks", 1, stacks)?;

    let count = addressable(
        "ellipsoid",
        (slices as u64 + 1).checked_mul(stacks as u64 + 1),
    )?;
    let ring = slices + 1;
    let mut vertices = Vec::with_capacity(count as usize);
    for i in 0..=stacks {
        let (sin_phi, cos_phi) = (PI * i as f32 / stacks as f32).sin_cos();
        for j in 0..=slices {
            let (sin_theta, cos_theta) = (TAU * j as f32 / slices as f32).sin_cos();
            let position = Vector3::new(
                rx * cos_theta * sin_phi,
                ry * cos_phi,
                rz * sin_theta * sin_phi,
            );
            // Gradient of x²/rx² + y²/ry² + z²/rz²
            let normal = Vector3::new(
                position.x / (rx * rx),
                position.y / (ry * ry),
                position.z / (rz * rz),
            )
            .normalize();
            let tangent = Vector3::new(-sin_theta, 0.0, cos_theta);
            vertices.push(ModelVertex::new(
                position,
                normal,
                [j as f32 / slices as f32, i as f32 / stacks as f32],
                tangent,
            ));
        }
    }

    let mut indices = Vec::with_capacity(6 * stacks as usize * slices as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let first = i * ring + j;
            let second = first + ring;
            indices.extend_from_slice(&[first, first + 1, second]);
            indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    Ok(Mesh {
        name: "ellipsoid".to_string(),
        vertices,
        indices,
        material,
    })
}

/// Flat ground grid of `width × depth` unit cells centred on the origin, with
/// the texture repeated [`TERRAIN_UV_TILING`] times.
pub fn terrain(width: u32, depth: u32, material: Material) -> Result<Mesh, GeometryError> {
    terrain_tiled(width, depth, TERRAIN_UV_TILING, material)
}

/// Flat ground grid with a custom texture repeat. Heights are left at zero;
/// the renderer displaces vertices by sampling the height map at `uv / tiling`,
/// which lands on the same texel as [`crate::data_structures::terrain::HeightField::sample`]
/// for the matching world position.
pub fn terrain_tiled(
    width: u32,
    depth: u32,
    tiling: f32,
    material: Material,
) -> Result<Mesh, GeometryError> {
    let width = at_least("terrain", "columns", 1, width)?;
    let depth = at_least("terrain", "rows", 1, depth)?;
    let tiling = positive("terrain", "tiling", tiling)?;
    let count = addressable(
        "terrain",
        (width as u64 + 1).checked_mul(depth as u64 + 1),
    )?;
    let (half_w, half_d) = (width as f32 / 2.0, depth as f32 / 2.0);

    let mut vertices = Vec::with_capacity(count as usize);
    for z in 0..=depth {
        for x in 0..=width {
            let u = x as f32 / width as f32;
            let v = z as f32 / depth as f32;
            vertices.push(ModelVertex::new(
                Vector3::new(x as f32 - half_w, 0.0, z as f32 - half_d),
                Vector3::unit_y(),
                [u * tiling, v * tiling],
                Vector3::unit_x(),
            ));
        }
    }

    let mut indices = Vec::with_capacity(6 * width as usize * depth as usize);
    for z in 0..depth {
        for x in 0..width {
            let top_left = z * (width + 1) + x;
            let top_right = top_left + 1;
            let bottom_left = top_left + width + 1;
            let bottom_right = bottom_left + 1;
            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    Ok(Mesh {
        name: "terrain".to_string(),
        vertices,
        indices,
        material,
    })
}
