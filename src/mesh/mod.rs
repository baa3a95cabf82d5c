//! Mesh topology and assembly.
//!
//! Triangulates the grid and merges positions, colors and indices into the
//! buffers handed to a rendering or physics backend. Normals and tangents are
//! left to that backend.

mod assembly;
mod triangles;

pub use assembly::{MeshError, TerrainMesh, TerrainVertex, assemble_mesh};
pub use triangles::{build_triangles, triangle_count};
