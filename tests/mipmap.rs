use approx::assert_abs_diff_eq;

use rs_mipmap::core::geometry::{Point2f, Point2i, Vector2f};
use rs_mipmap::core::mipmap::{ImageWrap, MipMap};
use rs_mipmap::core::pbrt::{Float, Spectrum};

fn checkerboard(n: i32) -> Vec<Float> {
    let mut img: Vec<Float> = Vec::with_capacity((n * n) as usize);
    for t in 0..n {
        for s in 0..n {
            img.push(((s + t) % 2) as Float);
        }
    }
    img
}

#[test]
fn constant_three_by_three_rounds_up_to_four_by_four() {
    let img: Vec<Float> = vec![1.0; 9];
    let mipmap = MipMap::new(Point2i::new(3, 3), &img, false, 8.0, ImageWrap::Repeat);
    assert_eq!(mipmap.width(), 4);
    assert_eq!(mipmap.height(), 4);
    // 4x4, 2x2, 1x1
    assert_eq!(mipmap.levels(), 3);
    for t in 0..4 {
        for s in 0..4 {
            assert_abs_diff_eq!(*mipmap.texel(0, s, t), 1.0, epsilon = 1e-5);
        }
    }
    for t in 0..2 {
        for s in 0..2 {
            assert_abs_diff_eq!(*mipmap.texel(1, s, t), 1.0, epsilon = 1e-5);
        }
    }
    assert_abs_diff_eq!(*mipmap.texel(2, 0, 0), 1.0, epsilon = 1e-5);
}

#[test]
fn ewa_over_checkerboard_averages_to_one_half() {
    let img = checkerboard(4);
    let mipmap = MipMap::new(Point2i::new(4, 4), &img, false, 8.0, ImageWrap::Repeat);
    // a texel corner in the middle of the image
    let st = Point2f::new(0.5, 0.5);
    for &r in &[0.25 as Float, 0.5, 0.75, 2.0] {
        let v = mipmap.lookup_pnt_vec_vec(st, Vector2f::new(r, 0.0), Vector2f::new(0.0, r));
        assert_abs_diff_eq!(v, 0.5, epsilon = 1e-5);
    }
}

#[test]
fn ewa_with_degenerate_minor_axis_matches_bilinear_level_zero() {
    let img = checkerboard(8);
    let mipmap = MipMap::new(Point2i::new(8, 8), &img, false, 8.0, ImageWrap::Clamp);
    for &(s, t) in &[(0.1 as Float, 0.2 as Float), (0.5, 0.5), (0.93, 0.07)] {
        let st = Point2f::new(s, t);
        assert_eq!(
            mipmap.lookup_pnt_vec_vec(st, Vector2f::new(0.3, -0.1), Vector2f::default()),
            mipmap.lookup_pnt_flt(st, 0.0)
        );
    }
}

#[test]
fn huge_isotropic_footprint_returns_coarsest_texel() {
    let img: Vec<Float> = (0..64).map(|i| (i % 3) as Float).collect();
    let mipmap = MipMap::new(Point2i::new(8, 8), &img, false, 8.0, ImageWrap::Repeat);
    let coarsest: Float = *mipmap.texel(mipmap.levels() - 1, 0, 0);
    for &(s, t) in &[(0.0 as Float, 0.0 as Float), (0.3, 0.9), (1.0, 1.0)] {
        assert_eq!(mipmap.lookup_pnt_flt(Point2f::new(s, t), 1e6), coarsest);
    }
    let mean: Float = img.iter().sum::<Float>() / 64.0;
    assert_abs_diff_eq!(coarsest, mean, epsilon = 1e-5);
}

#[test]
fn concurrent_readers_see_the_same_values() {
    let res = Point2i::new(24, 10);
    let img: Vec<Spectrum> = (0..res.area())
        .map(|i| Spectrum::rgb((i % 7) as Float, (i % 5) as Float, (i % 3) as Float))
        .collect();
    let mipmap = MipMap::new(res, &img, false, 8.0, ImageWrap::Repeat);
    let st = Point2f::new(0.37, 0.61);
    let dst0 = Vector2f::new(0.04, 0.01);
    let dst1 = Vector2f::new(-0.005, 0.02);
    let expected = mipmap.lookup_pnt_vec_vec(st, dst0, dst1);
    let mipmap = &mipmap;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || mipmap.lookup_pnt_vec_vec(st, dst0, dst1)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
