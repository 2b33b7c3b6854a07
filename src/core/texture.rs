//! Filter kernels used while building textures.

// std
use std::f32::consts::PI;
// pbrt
use crate::core::pbrt::Float;

// see texture.h

/// Windowed sinc on `[-1, 1]`; *tau* is the number of sinc lobes
/// inside the window.
pub fn lanczos(x: Float, tau: Float) -> Float {
    let mut x: Float = x;
    x = x.abs();
    if x < 1e-5 as Float {
        return 1.0 as Float;
    }
    if x > 1.0 as Float {
        return 0.0 as Float;
    }
    x *= PI;
    let s: Float = (x * tau).sin() / (x * tau);
    let lanczos: Float = x.sin() / x;
    s * lanczos
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lanczos_window() {
        assert_eq!(lanczos(0.0, 2.0), 1.0);
        assert_eq!(lanczos(1.5, 2.0), 0.0);
        assert_eq!(lanczos(-1.5, 2.0), 0.0);
        assert!(lanczos(1.0, 2.0).abs() < 1e-6);
        assert_eq!(lanczos(0.3, 2.0), lanczos(-0.3, 2.0));
    }

    #[test]
    fn lanczos_has_negative_lobe() {
        // sinc(2x) changes sign at x = 0.5
        assert!(lanczos(0.75, 2.0) < 0.0);
        assert!(lanczos(0.25, 2.0) > 0.0);
    }
}
