//! A CPU scanline renderer with Phong shading.
//!
//! Turns a camera, a triangle mesh and a single point light into an RGBA
//! image: world → camera → projection → window transforms, smoothed vertex
//! normals, flat-top/flat-bottom scan conversion with a z-buffer, and a
//! Phong reflection model evaluated per pixel.
//!
//! # Quick Start
//!
//! ```no_run
//! use rustline::prelude::*;
//!
//! let scene = Scene::demo();
//! let renderer = Renderer::new(Viewport::new(400, 400));
//! let (frame, _stats) = scene.render(&renderer)?;
//! frame.save("cube.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod space;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use config::{ConfigError, RenderConfig};
pub use error::RenderError;
pub use light::Light;
pub use mesh::{Mesh, MeshError};
pub use render::{FrameBuffer, RenderStats, Renderer};
pub use scene::Scene;
pub use space::{SpaceConverter, Viewport};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rustline::prelude::*;
/// ```
pub mod prelude {
    // Scene inputs
    pub use crate::camera::Camera;
    pub use crate::light::Light;
    pub use crate::mesh::{Face, Mesh};
    pub use crate::scene::Scene;

    // Configuration
    pub use crate::config::RenderConfig;

    // Math
    pub use crate::math::{Mat3, Vec2, Vec3, VectorKind};

    // Rendering
    pub use crate::colors::Color;
    pub use crate::render::{FrameBuffer, RenderStats, Renderer};
    pub use crate::space::{SpaceConverter, Viewport};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        build_render_triangles, DepthBuffer, FrameBuffer, PhongShader, Rasterizer,
        RenderTarget, RenderTriangle, ScanlineRasterizer,
    };
}
