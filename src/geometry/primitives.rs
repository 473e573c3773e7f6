//! 程序化几何体
//!
//! 盒子、球（可截取经纬范围）、圆柱（可开口）、圆锥和平面。
//! 所有几何体以原点为中心，Y 轴向上，三角形为逆时针绕序。

use std::f32::consts::{PI, TAU};

use super::mesh::MeshData;
use super::vertex::Vertex;
use crate::core::error::GeometryError;
use crate::core::math::Vector3;

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

fn invalid(primitive: &'static str, reason: impl Into<String>) -> GeometryError {
    GeometryError::InvalidParameter { primitive, reason: reason.into() }
}

fn require_positive(primitive: &'static str, field: &str, value: f32) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(primitive, format!("{} must be positive, got {}", field, value)))
    }
}

fn require_vertex_budget(count: u64) -> GeometryResult<()> {
    if count > u32::MAX as u64 {
        return Err(GeometryError::TooManyVertices(count as usize));
    }
    Ok(())
}

// ========== 盒子 ==========

/// 创建以原点为中心的盒子（每个面 4 个顶点，共 24 个）
pub fn create_box(width: f32, height: f32, depth: f32) -> GeometryResult<MeshData> {
    require_positive("box", "width", width)?;
    require_positive("box", "height", height)?;
    require_positive("box", "depth", depth)?;

    let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);

    // (法线, u 轴, v 轴)，u × v = 法线
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [w, 0.0, 0.0], [0.0, h, 0.0]),   // +Z
        ([0.0, 0.0, -1.0], [-w, 0.0, 0.0], [0.0, h, 0.0]), // -Z
        ([0.0, 1.0, 0.0], [w, 0.0, 0.0], [0.0, 0.0, -d]),  // +Y
        ([0.0, -1.0, 0.0], [w, 0.0, 0.0], [0.0, 0.0, d]),  // -Y
        ([1.0, 0.0, 0.0], [0.0, 0.0, -d], [0.0, h, 0.0]),  // +X
        ([-1.0, 0.0, 0.0], [0.0, 0.0, d], [0.0, h, 0.0]),  // -X
    ];

    let mut mesh = MeshData::with_capacity(24, 36);
    for (normal, u, v) in faces {
        let n = Vector3::from(normal);
        let center = Vector3::new(n.x * w, n.y * h, n.z * d);
        let (u, v) = (Vector3::from(u), Vector3::from(v));

        let base = mesh.vertices.len() as u32;
        for corner in [center - u - v, center + u - v, center + u + v, center - u + v] {
            mesh.vertices.push(Vertex::new(corner.into(), normal));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Ok(mesh)
}

// ========== 球 ==========

/// 球体参数
///
/// `phi` 是绕 Y 轴的经度范围，`theta` 是从北极 (+Y) 开始的纬度范围。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

impl SphereOptions {
    pub fn with_radius(radius: f32) -> Self {
        Self { radius, ..Self::default() }
    }

    pub fn segments(mut self, width: u32, height: u32) -> Self {
        self.width_segments = width;
        self.height_segments = height;
        self
    }

    pub fn phi(mut self, start: f32, length: f32) -> Self {
        self.phi_start = start;
        self.phi_length = length;
        self
    }

    pub fn theta(mut self, start: f32, length: f32) -> Self {
        self.theta_start = start;
        self.theta_length = length;
        self
    }
}

pub fn create_sphere(options: SphereOptions) -> GeometryResult<MeshData> {
    require_positive("sphere", "radius", options.radius)?;
    require_positive("sphere", "phi_length", options.phi_length)?;
    require_positive("sphere", "theta_length", options.theta_length)?;
    if options.width_segments < 3 {
        return Err(invalid("sphere", "width_segments must be at least 3"));
    }
    if options.height_segments < 2 {
        return Err(invalid("sphere", "height_segments must be at least 2"));
    }

    let SphereOptions { radius, width_segments: ws, height_segments: hs, .. } = options;
    require_vertex_budget((ws as u64 + 1) * (hs as u64 + 1))?;

    let theta_end = (options.theta_start + options.theta_length).min(PI);
    let mut mesh = MeshData::with_capacity((ws as usize + 1) * (hs as usize + 1), ws as usize * hs as usize * 6);

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = options.theta_start + v * options.theta_length;

        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = options.phi_start + u * options.phi_length;

            let normal = Vector3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex::new((normal * radius).into(), normal.into()));
        }
    }

    let stride = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            // 两极处的三角形退化，跳过
            if iy != 0 || options.theta_start > 0.0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 || theta_end < PI {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Ok(mesh)
}

// ========== 圆柱与圆锥 ==========

/// 圆柱参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    /// 不生成上下底面
    pub open_ended: bool,
}

impl CylinderOptions {
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
        }
    }

    pub fn open_ended(mut self, open: bool) -> Self {
        self.open_ended = open;
        self
    }

    pub fn radial_segments(mut self, segments: u32) -> Self {
        self.radial_segments = segments;
        self
    }
}

pub fn create_cylinder(options: CylinderOptions) -> GeometryResult<MeshData> {
    let CylinderOptions { radius_top, radius_bottom, height, radial_segments: rs, height_segments: hs, open_ended } = options;

    require_positive("cylinder", "height", height)?;
    for (field, r) in [("radius_top", radius_top), ("radius_bottom", radius_bottom)] {
        if !r.is_finite() || r < 0.0 {
            return Err(invalid("cylinder", format!("{} must be non-negative, got {}", field, r)));
        }
    }
    if radius_top == 0.0 && radius_bottom == 0.0 {
        return Err(invalid("cylinder", "at least one radius must be positive"));
    }
    if rs < 3 {
        return Err(invalid("cylinder", "radial_segments must be at least 3"));
    }
    if hs < 1 {
        return Err(invalid("cylinder", "height_segments must be at least 1"));
    }
    require_vertex_budget((rs as u64 + 1) * (hs as u64 + 1) + 2 * (2 * rs as u64 + 1))?;

    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut mesh = MeshData::new();

    // 侧面
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;

        for ix in 0..=rs {
            let theta = ix as f32 / rs as f32 * TAU;
            let (sin, cos) = theta.sin_cos();

            let position = [radius * sin, -v * height + half_height, radius * cos];
            let normal = Vector3::new(sin, slope, cos).normalize();
            mesh.vertices.push(Vertex::new(position, normal.into()));
        }
    }

    let stride = rs + 1;
    for iy in 0..hs {
        for ix in 0..rs {
            let a = iy * stride + ix;
            let b = (iy + 1) * stride + ix;
            let c = (iy + 1) * stride + ix + 1;
            let d = iy * stride + ix + 1;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    if !open_ended {
        if radius_top > 0.0 {
            push_cap(&mut mesh, radius_top, half_height, rs, true);
        }
        if radius_bottom > 0.0 {
            push_cap(&mut mesh, radius_bottom, -half_height, rs, false);
        }
    }

    Ok(mesh)
}

fn push_cap(mesh: &mut MeshData, radius: f32, y: f32, segments: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = [0.0, sign, 0.0];

    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::new([0.0, y, 0.0], normal));

    let ring = mesh.vertices.len() as u32;
    for ix in 0..=segments {
        let theta = ix as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(Vertex::new([radius * sin, y, radius * cos], normal));
    }

    for ix in 0..segments {
        let i = ring + ix;
        if top {
            mesh.indices.extend_from_slice(&[i, i + 1, center]);
        } else {
            mesh.indices.extend_from_slice(&[i + 1, i, center]);
        }
    }
}

/// 圆锥：顶部半径为 0 的圆柱
pub fn create_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryResult<MeshData> {
    require_positive("cone", "radius", radius)?;
    create_cylinder(CylinderOptions::new(0.0, radius, height).radial_segments(radial_segments))
}

// ========== 平面 ==========

/// XY 平面上的矩形，法线 +Z
pub fn create_plane(width: f32, height: f32) -> GeometryResult<MeshData> {
    require_positive("plane", "width", width)?;
    require_positive("plane", "height", height)?;

    let (w, h) = (width / 2.0, height / 2.0);
    let normal = [0.0, 0.0, 1.0];

    let mut mesh = MeshData::with_capacity(4, 6);
    mesh.vertices.extend_from_slice(&[
        Vertex::new([-w, h, 0.0], normal),
        Vertex::new([w, h, 0.0], normal),
        Vertex::new([-w, -h, 0.0], normal),
        Vertex::new([w, -h, 0.0], normal),
    ]);
    mesh.indices.extend_from_slice(&[0, 2, 1, 2, 3, 1]);

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &MeshData, tri: usize) -> Vector3 {
        let p = |i: usize| Vector3::from(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position);
        (p(1) - p(0)).cross(&(p(2) - p(0)))
    }

    #[test]
    fn test_box_counts_and_bounds() {
        let mesh = create_box(0.5, 0.6, 0.25).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate().is_ok());

        let (min, max) = mesh.bounds().unwrap();
        assert!((min - Vector3::new(-0.25, -0.3, -0.125)).norm() < 1e-6);
        assert!((max - Vector3::new(0.25, 0.3, 0.125)).norm() < 1e-6);
    }

    #[test]
    fn test_box_winding_faces_outward() {
        let mesh = create_box(1.0, 2.0, 3.0).unwrap();
        for tri in 0..mesh.triangle_count() {
            let n = Vector3::from(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(triangle_normal(&mesh, tri).dot(&n) > 0.0, "triangle {} faces inward", tri);
        }
    }

    #[test]
    fn test_box_rejects_zero_size() {
        let err = create_box(0.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter { primitive: "box", .. }));
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = create_sphere(SphereOptions::with_radius(0.25)).unwrap();
        assert!(mesh.validate().is_ok());
        for v in &mesh.vertices {
            assert!((Vector3::from(v.position).norm() - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn test_half_sphere_by_phi_stays_on_one_side() {
        // phi ∈ [0, π] 覆盖 z >= 0 的半球
        let mesh = create_sphere(SphereOptions::with_radius(0.05).phi(0.0, PI)).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.position[2] >= -1e-6));
    }

    #[test]
    fn test_upper_hemisphere_by_theta() {
        let mesh = create_sphere(SphereOptions::with_radius(0.055).theta(0.0, PI / 2.0)).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.position[1] >= -1e-6));
        assert!(mesh.triangle_count() > 0);
    }

    #[test]
    fn test_sphere_rejects_few_segments() {
        assert!(create_sphere(SphereOptions::default().segments(2, 8)).is_err());
        assert!(create_sphere(SphereOptions::default().segments(8, 1)).is_err());
    }

    #[test]
    fn test_cylinder_closed_and_open() {
        let closed = create_cylinder(CylinderOptions::new(0.12, 0.12, 0.05).radial_segments(8)).unwrap();
        let open = create_cylinder(CylinderOptions::new(0.12, 0.12, 0.05).radial_segments(8).open_ended(true)).unwrap();

        assert_eq!(open.vertex_count(), 9 * 2);
        assert_eq!(open.triangle_count(), 16);
        assert_eq!(closed.vertex_count(), 18 + 2 * 10);
        assert_eq!(closed.triangle_count(), 16 + 16);
        assert!(closed.validate().is_ok());
    }

    #[test]
    fn test_cylinder_tapers_top_to_bottom() {
        let mesh = create_cylinder(CylinderOptions::new(0.08, 0.07, 0.3).open_ended(true)).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!((max.y - 0.15).abs() < 1e-6);
        assert!((min.y + 0.15).abs() < 1e-6);
        assert!((max.x - 0.08).abs() < 1e-3);
    }

    #[test]
    fn test_cylinder_caps_face_outward() {
        let mesh = create_cylinder(CylinderOptions::new(1.0, 1.0, 1.0).radial_segments(6)).unwrap();
        let side_triangles = 12;
        for tri in side_triangles..mesh.triangle_count() {
            let n = Vector3::from(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(triangle_normal(&mesh, tri).dot(&n) > 0.0);
        }
    }

    #[test]
    fn test_cone_has_point_top() {
        let mesh = create_cone(0.05, 0.1, 16).unwrap();
        let (_, max) = mesh.bounds().unwrap();
        assert!((max.y - 0.05).abs() < 1e-6);
        let apex_ring_width = mesh.vertices.iter()
            .filter(|v| (v.position[1] - 0.05).abs() < 1e-6)
            .map(|v| v.position[0].abs())
            .fold(0.0f32, f32::max);
        assert!(apex_ring_width < 1e-6);
    }

    #[test]
    fn test_cylinder_rejects_invalid() {
        assert!(create_cylinder(CylinderOptions::new(0.0, 0.0, 1.0)).is_err());
        assert!(create_cylinder(CylinderOptions::new(1.0, -1.0, 1.0)).is_err());
        assert!(create_cylinder(CylinderOptions::new(1.0, 1.0, 1.0).radial_segments(2)).is_err());
        assert!(create_cone(-1.0, 1.0, 8).is_err());
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = create_plane(50.0, 50.0).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        for tri in 0..2 {
            assert!(triangle_normal(&mesh, tri).z > 0.0);
        }
    }
}
