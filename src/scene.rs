//! The inputs of a render pass, bundled.
//!
//! A [`Scene`] owns the camera, mesh and light. The pipeline only borrows
//! them, so "reloading" is just calling [`Scene::render`] again after
//! changing any of the three.

use crate::camera::Camera;
use crate::error::RenderError;
use crate::light::Light;
use crate::math::Vec3;
use crate::mesh::Mesh;
use crate::render::{FrameBuffer, Rasterizer, RenderStats, Renderer};

/// Direction from a framed mesh's center to the eye, before scaling.
const FRAMING_OFFSET: Vec3 = Vec3::direction(0.8, 0.6, -1.0);

/// Eye distance as a multiple of the bounding radius.
const FRAMING_DISTANCE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub mesh: Mesh,
    pub light: Light,
}

impl Scene {
    pub fn new(camera: Camera, mesh: Mesh, light: Light) -> Self {
        Self {
            camera,
            mesh,
            light,
        }
    }

    /// The unit cube seen from above, in front and to the right.
    pub fn demo() -> Self {
        Self::framed(Mesh::cube(), Light::default())
    }

    /// Places a camera so the whole of `mesh` is in view.
    ///
    /// The eye looks at the center of the bounding box from
    /// [`FRAMING_DISTANCE`] bounding radii away. An empty mesh gets a camera
    /// looking at the origin.
    pub fn framed(mesh: Mesh, light: Light) -> Self {
        let (center, radius) = match mesh.bounds() {
            Some((min, max)) => {
                let center = (min + max) / 2.0;
                let radius = ((max - min).norm() / 2.0).max(f64::EPSILON);
                (center, radius)
            }
            None => (Vec3::ORIGIN, 1.0),
        };

        let offset = FRAMING_OFFSET.normalize() * (FRAMING_DISTANCE * radius);
        let camera = Camera::looking_at(
            center + offset,
            center,
            Vec3::direction(0.0, 1.0, 0.0),
            1.0,
            1.0,
            1.0,
        );
        Self::new(camera, mesh, light)
    }

    /// Runs one full pass over the scene.
    pub fn render<R: Rasterizer>(
        &self,
        renderer: &Renderer<R>,
    ) -> Result<(FrameBuffer, RenderStats), RenderError> {
        renderer.render(&self.camera, &self.mesh, &self.light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::space::{SpaceConverter, Viewport};
    use approx::assert_relative_eq;

    #[test]
    fn framed_camera_looks_at_the_mesh_center() {
        let scene = Scene::demo();
        let cvt = SpaceConverter::build(&scene.camera).unwrap();
        let center = cvt.to_camera(Vec3::ORIGIN);
        assert_relative_eq!(center.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(center.y(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(center.z(), 3.0 * 3.0_f64.sqrt(), epsilon = 1e-12);

        // Every cube corner is in front of the eye.
        for v in scene.mesh.vertices() {
            assert!(cvt.to_camera(*v).z() > 0.0);
        }
    }

    #[test]
    fn demo_scene_renders_something() {
        let scene = Scene::demo();
        let (frame, stats) = scene.render(&Renderer::new(Viewport::new(80, 60))).unwrap();
        assert!(stats.pixels_written > 0);
        assert_ne!(frame.get_pixel(40, 30), Some(BLACK));
    }

    #[test]
    fn reload_after_moving_the_camera() {
        let mut scene = Scene::demo();
        let renderer = Renderer::new(Viewport::new(40, 40));
        let (before, _) = scene.render(&renderer).unwrap();

        scene.camera.position = scene.camera.position * 2.0;
        let (after, _) = scene.render(&renderer).unwrap();
        assert_ne!(before, after);
    }
}
