//! Texture space is two-dimensional: a lookup position is a
//! **Point2f** in `[0,1]^2`, the footprint of a screen-space pixel is
//! given by two **Vector2f** derivatives, and image resolutions are
//! **Point2i** values.

// std
use std::ops;
// pbrt
use crate::core::pbrt::Float;

// see geometry.h

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector2f {
    pub x: Float,
    pub y: Float,
}

impl Vector2f {
    pub fn new(x: Float, y: Float) -> Self {
        Vector2f { x, y }
    }
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Largest absolute value of both components.
    pub fn max_abs_component(&self) -> Float {
        self.x.abs().max(self.y.abs())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2f {
    pub x: Float,
    pub y: Float,
}

impl Point2f {
    pub fn new(x: Float, y: Float) -> Self {
        Point2f { x, y }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub fn new(x: i32, y: i32) -> Self {
        Point2i { x, y }
    }
    /// Number of pixels covered by a resolution.
    pub fn area(&self) -> i64 {
        self.x as i64 * self.y as i64
    }
}

impl_op!(*= |a: &mut Vector2f, b: Float| {
    a.x *= b;
    a.y *= b;
});

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vector2f_length() {
        let v = Vector2f::new(3.0, -4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.max_abs_component(), 4.0);
    }

    #[test]
    fn vector2f_scale_in_place() {
        let mut v = Vector2f::new(0.25, 0.5);
        v *= 4.0;
        assert_eq!(v, Vector2f::new(1.0, 2.0));
    }

    #[test]
    fn point2i_area() {
        assert_eq!(Point2i::new(3, 5).area(), 15);
        assert_eq!(Point2i::new(65536, 65536).area(), 1_i64 << 32);
    }
}
