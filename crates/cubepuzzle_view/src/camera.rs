use cubemath::cgmath::{
    Deg, InnerSpace, Point2, Quaternion, Rad, Rotation, Rotation3, Vector2, Vector3, point2, vec3,
};

/// Distance from the camera to the near clipping plane. Points closer than
/// this (or behind the camera) cannot be projected.
const NEAR_PLANE: f32 = 0.1;

const DEFAULT_DISTANCE: f32 = 8.0;
const DEFAULT_FOV: Deg<f32> = Deg(45.0);
const DEFAULT_YAW: Deg<f32> = Deg(-35.0);
const DEFAULT_PITCH: Deg<f32> = Deg(25.0);

/// Perspective camera looking at the center of the cube.
///
/// The camera sits on the +Z axis of view space looking toward the origin.
/// Screen coordinates are in pixels with the origin at the top left and Y
/// pointing down.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Width and height of the draw target in pixels.
    pub target_size: [u32; 2],
    /// Rotation from cube space to view space.
    pub rot: Quaternion<f32>,
    /// Distance from the camera to the center of the cube.
    pub distance: f32,
    /// Vertical field of view.
    pub fov: Deg<f32>,
}
impl Default for Camera {
    fn default() -> Self {
        let rot = Quaternion::from_angle_x(DEFAULT_PITCH) * Quaternion::from_angle_y(DEFAULT_YAW);
        Self {
            rot,
            ..Self::front()
        }
    }
}
impl Camera {
    /// Constructs a camera looking straight at the front face.
    pub fn front() -> Self {
        Self {
            target_size: [800, 600],
            rot: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            distance: DEFAULT_DISTANCE,
            fov: DEFAULT_FOV,
        }
    }

    fn center(&self) -> Point2<f32> {
        let [w, h] = self.target_size;
        point2(w as f32 / 2.0, h as f32 / 2.0)
    }
    /// Returns the number of pixels per unit at unit distance.
    fn focal_length(&self) -> f32 {
        let half_height = self.target_size[1] as f32 / 2.0;
        half_height / (Rad::from(self.fov) / 2.0).0.tan()
    }

    /// Projects a point in cube space to screen space. Returns `None` if the
    /// point is behind the camera.
    pub fn project_point_to_screen_space(&self, p: Vector3<f32>) -> Option<Point2<f32>> {
        let p = self.rot.rotate_vector(p);
        let depth = self.distance - p.z;
        if depth < NEAR_PLANE {
            return None;
        }
        let f = self.focal_length();
        let c = self.center();
        Some(point2(c.x + f * p.x / depth, c.y - f * p.y / depth))
    }
    /// Projects a vector `v` in cube space to screen space. Because the
    /// perspective projection is nonlinear, this also requires an initial point
    /// `p` where the vector `v` originates.
    pub fn project_vector_to_screen_space(
        &self,
        p: Vector3<f32>,
        v: Vector3<f32>,
    ) -> Option<Vector2<f32>> {
        let a = self.project_point_to_screen_space(p)?;
        let b = self.project_point_to_screen_space(p + v)?;
        Some(b - a)
    }

    /// Returns the ray through a pixel, as an origin and a unit direction in
    /// cube space.
    pub fn ray_through_pixel(&self, pixel: Point2<f32>) -> (Vector3<f32>, Vector3<f32>) {
        let f = self.focal_length();
        let c = self.center();
        let dir_view = vec3((pixel.x - c.x) / f, -(pixel.y - c.y) / f, -1.0).normalize();
        let origin_view = vec3(0.0, 0.0, self.distance);
        let inv = self.rot.conjugate();
        (inv.rotate_vector(origin_view), inv.rotate_vector(dir_view))
    }

    /// Rotates the cube on screen by a drag of `delta` pixels. Horizontal
    /// drags spin around the vertical screen axis and vertical drags tilt
    /// around the horizontal screen axis.
    pub fn orbit(&mut self, delta: Vector2<f32>, degrees_per_pixel: f32) {
        let yaw = Quaternion::from_angle_y(Deg(delta.x * degrees_per_pixel));
        let pitch = Quaternion::from_angle_x(Deg(delta.y * degrees_per_pixel));
        self.rot = (yaw * pitch * self.rot).normalize();
    }
}
