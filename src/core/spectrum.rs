//! Texels of color images are stored as **RGBSpectrum** values, three
//! linear coefficients which can be accumulated, scaled and clamped
//! by the MIP map without knowing anything about color.

// std
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul};
// others
use num::Zero;
// pbrt
use crate::core::pbrt::Float;

// see spectrum.h

#[derive(Debug, Default, Copy, Clone)]
pub struct RGBSpectrum {
    pub c: [Float; 3],
}

impl RGBSpectrum {
    pub fn new(v: Float) -> Self {
        RGBSpectrum { c: [v, v, v] }
    }
    pub fn rgb(r: Float, g: Float, b: Float) -> RGBSpectrum {
        RGBSpectrum { c: [r, g, b] }
    }
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0 as Float)
    }
}

impl PartialEq for RGBSpectrum {
    fn eq(&self, rhs: &RGBSpectrum) -> bool {
        self.c == rhs.c
    }
}

impl Add for RGBSpectrum {
    type Output = RGBSpectrum;
    fn add(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum {
            c: [
                self.c[0] + rhs.c[0],
                self.c[1] + rhs.c[1],
                self.c[2] + rhs.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: RGBSpectrum) {
        self.c[0] += rhs.c[0];
        self.c[1] += rhs.c[1];
        self.c[2] += rhs.c[2];
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = RGBSpectrum;
    fn mul(self, rhs: Float) -> RGBSpectrum {
        RGBSpectrum {
            c: [self.c[0] * rhs, self.c[1] * rhs, self.c[2] * rhs],
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = RGBSpectrum;
    fn div(self, rhs: Float) -> RGBSpectrum {
        assert_ne!(rhs, 0.0 as Float);
        assert!(!rhs.is_nan(), "rhs is NaN");
        let inv: Float = 1.0 as Float / rhs;
        RGBSpectrum {
            c: [self.c[0] * inv, self.c[1] * inv, self.c[2] * inv],
        }
    }
}

impl Zero for RGBSpectrum {
    fn zero() -> RGBSpectrum {
        RGBSpectrum::new(0.0 as Float)
    }

    fn is_zero(&self) -> bool {
        self.is_black()
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        match index {
            0 => &self.c[0],
            1 => &self.c[1],
            2 => &self.c[2],
            _ => panic!("Check failed: i >= 0 && i <= 2"),
        }
    }
}

impl IndexMut<usize> for RGBSpectrum {
    fn index_mut(&mut self, index: usize) -> &mut Float {
        match index {
            0 => &mut self.c[0],
            1 => &mut self.c[1],
            2 => &mut self.c[2],
            _ => panic!("Check failed: i >= 0 && i <= 2"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accumulate_and_scale() {
        let mut s = RGBSpectrum::zero();
        assert!(s.is_zero());
        s += RGBSpectrum::rgb(1.0, 2.0, 4.0);
        s += RGBSpectrum::rgb(1.0, 2.0, 4.0) * 0.5;
        assert_eq!(s, RGBSpectrum::rgb(1.5, 3.0, 6.0));
        assert_eq!(s / 2.0, RGBSpectrum::rgb(0.75, 1.5, 3.0));
    }

    #[test]
    fn channels_by_index() {
        let mut s = RGBSpectrum::new(0.5);
        s[2] = 2.0;
        assert_eq!(s, RGBSpectrum::rgb(0.5, 0.5, 2.0));
        assert_eq!(s[1], 0.5);
        assert!(!s.is_black());
    }
}
