use crate::wave::wave_height;
use backdrop_common::{MeshConfig, PaletteConfig, WaveConfig};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// GPU-uploadable vertex: position, normal, color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// A regular grid of vertices laid out in the horizontal XZ plane.
///
/// The grid is centered on the origin and offset vertically by
/// `mesh.offset_y`. Heights are recomputed in place by [`GridMesh::displace`];
/// everything else is immutable after construction.
pub struct GridMesh {
    cols: u32,
    rows: u32,
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    offset_y: f32,
}

impl GridMesh {
    /// Build the grid with per-vertex colors from the palette gradient plus
    /// bounded deterministic jitter.
    pub fn new(mesh: &MeshConfig, palette: &PaletteConfig) -> Self {
        let cols = mesh.cols;
        let rows = mesh.rows;
        let vertex_count = ((cols + 1) * (rows + 1)) as usize;

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut jitter_state = palette.seed;

        for row in 0..=rows {
            // Gradient runs along the depth axis, far edge toward `top`.
            let depth_t = row as f32 / rows as f32;
            let base = palette.bottom.lerp(palette.top, 1.0 - depth_t);
            for col in 0..=cols {
                let x = (col as f32 / cols as f32 - 0.5) * mesh.plane_width;
                let z = (depth_t - 0.5) * mesh.plane_depth;

                jitter_state = splitmix64(jitter_state);
                let t = unit_f32(jitter_state) * palette.jitter;

                vertices.push(TerrainVertex {
                    position: [x, mesh.offset_y, z],
                    normal: [0.0, 1.0, 0.0],
                    color: [base.r + t, base.g + t, base.b + t],
                });
            }
        }

        let mut indices = Vec::with_capacity((cols * rows * 6) as usize);
        let stride = cols + 1;
        for row in 0..rows {
            for col in 0..cols {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self {
            cols,
            rows,
            vertices,
            indices,
            offset_y: mesh.offset_y,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Recompute every vertex height from the wave field at `phase`.
    ///
    /// Heights are independent per vertex; x/z are never touched.
    pub fn displace(&mut self, phase: f32, wave: &WaveConfig) {
        for v in &mut self.vertices {
            let [x, _, z] = v.position;
            v.position[1] = self.offset_y + wave_height(x, z, phase, wave);
        }
    }

    /// Rebuild per-vertex normals from the displaced positions.
    ///
    /// Face normals are accumulated per vertex and normalized, which weights
    /// by face area and matches what the lighting pass expects.
    pub fn recompute_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = [0.0, 0.0, 0.0];
        }
        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from_array(self.vertices[i0].position);
            let p1 = Vec3::from_array(self.vertices[i1].position);
            let p2 = Vec3::from_array(self.vertices[i2].position);
            let face = (p1 - p0).cross(p2 - p0);
            for &i in &[i0, i1, i2] {
                let n = &mut self.vertices[i].normal;
                n[0] += face.x;
                n[1] += face.y;
                n[2] += face.z;
            }
        }
        for v in &mut self.vertices {
            let n = Vec3::from_array(v.normal);
            v.normal = if n.length_squared() > 0.0 {
                n.normalize().to_array()
            } else {
                [0.0, 1.0, 0.0]
            };
        }
    }
}

/// Splitmix64 step, used for the deterministic color jitter sequence.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Map a u64 to [0, 1).
fn unit_f32(bits: u64) -> f32 {
    (bits >> 40) as f32 / (1u64 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_common::BackdropConfig;

    fn small_mesh() -> (GridMesh, BackdropConfig) {
        let mut config = BackdropConfig::default();
        config.mesh.cols = 8;
        config.mesh.rows = 6;
        let mesh = GridMesh::new(&config.mesh, &config.palette);
        (mesh, config)
    }

    #[test]
    fn vertex_and_index_counts() {
        let (mesh, _) = small_mesh();
        assert_eq!(mesh.vertex_count(), 9 * 7);
        assert_eq!(mesh.indices().len(), 8 * 6 * 6);
    }

    #[test]
    fn full_resolution_vertex_count() {
        let config = BackdropConfig::default();
        let mesh = GridMesh::new(&config.mesh, &config.palette);
        assert_eq!(mesh.vertex_count(), config.vertex_count());
    }

    #[test]
    fn colors_defined_at_creation() {
        let (mesh, config) = small_mesh();
        let bound = 1.0 + config.palette.jitter + 1e-5;
        for v in mesh.vertices() {
            for c in v.color {
                assert!(c.is_finite());
                assert!((0.0..=bound).contains(&c), "color channel {c} out of range");
            }
        }
    }

    #[test]
    fn construction_deterministic_under_seed() {
        let (a, config) = small_mesh();
        let b = GridMesh::new(&config.mesh, &config.palette);
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn different_seeds_change_jitter() {
        let (a, mut config) = small_mesh();
        config.palette.seed = config.palette.seed.wrapping_add(1);
        let b = GridMesh::new(&config.mesh, &config.palette);
        assert_ne!(a.vertices(), b.vertices());
    }

    #[test]
    fn displace_leaves_horizontal_positions() {
        let (mut mesh, config) = small_mesh();
        let before: Vec<(f32, f32)> = mesh
            .vertices()
            .iter()
            .map(|v| (v.position[0], v.position[2]))
            .collect();

        let mut phase = 0.0;
        for _ in 0..50 {
            phase += config.wave.phase_increment;
            mesh.displace(phase, &config.wave);
            mesh.recompute_normals();
        }

        let after: Vec<(f32, f32)> = mesh
            .vertices()
            .iter()
            .map(|v| (v.position[0], v.position[2]))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn displace_changes_heights() {
        let (mut mesh, config) = small_mesh();
        mesh.displace(1.0, &config.wave);
        let first: Vec<f32> = mesh.vertices().iter().map(|v| v.position[1]).collect();
        mesh.displace(2.0, &config.wave);
        let second: Vec<f32> = mesh.vertices().iter().map(|v| v.position[1]).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn displaced_heights_offset_from_baseline() {
        let (mut mesh, config) = small_mesh();
        mesh.displace(0.37, &config.wave);
        let bound = config.wave.amp_x + config.wave.amp_z + 1e-4;
        for v in mesh.vertices() {
            let h = v.position[1] - config.mesh.offset_y;
            assert!(h.abs() <= bound);
        }
    }

    #[test]
    fn normals_unit_length_after_recompute() {
        let (mut mesh, config) = small_mesh();
        mesh.displace(3.3, &config.wave);
        mesh.recompute_normals();
        for v in mesh.vertices() {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    #[test]
    fn flat_mesh_normals_point_up() {
        let mut config = BackdropConfig::default();
        config.mesh.cols = 4;
        config.mesh.rows = 4;
        config.wave.amp_x = 0.0;
        config.wave.amp_z = 0.0;
        let mut mesh = GridMesh::new(&config.mesh, &config.palette);
        mesh.displace(1.0, &config.wave);
        mesh.recompute_normals();
        for v in mesh.vertices() {
            assert!(v.normal[1] > 0.999, "normal {:?} not up", v.normal);
        }
    }
}
