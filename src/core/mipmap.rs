//! To limit the potential number of texels that need to be accessed,
//! filtering methods use an image pyramid of increasingly lower
//! resolution prefiltered versions of the original image to
//! accelerate their operation.
//!
//! A **MipMap** is built once from a raster image and is read-only
//! afterwards, so any number of threads can filter it at the same
//! time. Two lookups are offered:
//!
//! - `lookup_pnt_flt` filters an isotropic (square) footprint by
//!   trilinear interpolation between two pyramid levels.
//! - `lookup_pnt_vec_vec` filters the elliptical footprint given by
//!   two texture-space derivatives with an elliptically weighted
//!   average (EWA) of Gaussian weights.

// std
use std::fmt;
use std::ops::{AddAssign, Div, Mul};
use std::str::FromStr;
use std::sync::atomic::Ordering;
// others
use num;
use tracing::{debug, trace};
// pbrt
use crate::core::error::{MipMapError, Result};
use crate::core::geometry::{Point2f, Point2i, Vector2f};
use crate::core::memory::BlockedArray;
use crate::core::parallel::parallel_for;
use crate::core::paramset::ParamSet;
use crate::core::pbrt::{clamp_t, is_power_of_2, lerp, log_2_int_i32, mod_t, round_up_pow2_32};
use crate::core::pbrt::{Float, Spectrum, INFINITY};
use crate::core::stats::{MIPMAP_MEMORY, N_EWA_LOOKUPS, N_TRILERP_LOOKUPS};
use crate::core::texture::lanczos;

// see mipmap.h

pub const WEIGHT_LUT_SIZE: usize = 128;

lazy_static! {
    static ref WEIGHT_LUT: [Float; WEIGHT_LUT_SIZE] = {
        // initialize EWA filter weights
        let mut lut: [Float; WEIGHT_LUT_SIZE] = [0.0 as Float; WEIGHT_LUT_SIZE];
        let alpha: Float = 2.0 as Float;
        for (i, w) in lut.iter_mut().enumerate() {
            let r2: Float = i as Float / (WEIGHT_LUT_SIZE - 1) as Float;
            *w = (-alpha * r2).exp() - (-alpha).exp();
        }
        lut
    };
}

/// Gaussian falloff `exp(-2 r^2) - exp(-2)` sampled at
/// `r^2 = i / (WEIGHT_LUT_SIZE - 1)`. Computed once per process, on
/// first use, and shared by all MIP maps.
pub fn weight_lut() -> &'static [Float; WEIGHT_LUT_SIZE] {
    &WEIGHT_LUT
}

/// What a texel lookup outside of `[0, width) x [0, height)` returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageWrap {
    Repeat,
    Black,
    Clamp,
}

impl ImageWrap {
    /// Map index *i* into `[0, res)`; `None` stands for black.
    pub fn resolve_index(self, i: isize, res: usize) -> Option<usize> {
        let res: isize = res as isize;
        match self {
            ImageWrap::Repeat => Some(mod_t(i, res) as usize),
            ImageWrap::Clamp => Some(clamp_t(i, 0, res - 1) as usize),
            ImageWrap::Black => {
                if i < 0 || i >= res {
                    None
                } else {
                    Some(i as usize)
                }
            }
        }
    }
    pub fn resolve(
        self,
        s: isize,
        t: isize,
        u_size: usize,
        v_size: usize,
    ) -> Option<(usize, usize)> {
        Some((
            self.resolve_index(s, u_size)?,
            self.resolve_index(t, v_size)?,
        ))
    }
}

impl Default for ImageWrap {
    fn default() -> Self {
        ImageWrap::Repeat
    }
}

impl FromStr for ImageWrap {
    type Err = MipMapError;
    fn from_str(s: &str) -> Result<ImageWrap> {
        match s {
            "repeat" => Ok(ImageWrap::Repeat),
            "black" => Ok(ImageWrap::Black),
            "clamp" => Ok(ImageWrap::Clamp),
            _ => Err(MipMapError::UnknownWrapMode(s.to_string())),
        }
    }
}

impl fmt::Display for ImageWrap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            ImageWrap::Repeat => "repeat",
            ImageWrap::Black => "black",
            ImageWrap::Clamp => "clamp",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct ResampleWeight {
    pub first_texel: i32,
    pub weight: [Float; 4],
}

/// Lanczos weights for zooming one image axis from *old_res* to
/// *new_res* texels. Every destination texel gathers four consecutive
/// source texels starting at `first_texel`; the weights sum to one.
pub fn resample_weights(old_res: i32, new_res: i32) -> Vec<ResampleWeight> {
    assert!(
        new_res >= old_res,
        "can't resample from {} down to {} texels",
        old_res,
        new_res
    );
    let mut wt: Vec<ResampleWeight> = Vec::with_capacity(new_res as usize);
    let filterwidth: Float = 2.0 as Float;
    for i in 0..new_res {
        // compute image resampling weights for _i_th texel
        let center: Float = (i as Float + 0.5 as Float) * old_res as Float / new_res as Float;
        let mut rw: ResampleWeight = ResampleWeight::default();
        rw.first_texel = ((center - filterwidth) + 0.5 as Float).floor() as i32;
        for j in 0..4 {
            let pos: Float = rw.first_texel as Float + j as Float + 0.5 as Float;
            rw.weight[j] = lanczos((pos - center) / filterwidth, 2.0 as Float);
        }
        // normalize filter weights for texel resampling
        let inv_sum_wts: Float = 1.0 as Float / rw.weight.iter().sum::<Float>();
        for w in rw.weight.iter_mut() {
            *w *= inv_sum_wts;
        }
        wt.push(rw);
    }
    wt
}

pub trait Clampable {
    fn clamp(self, min: Float, max: Float) -> Self;
    fn clamp_non_negative(self) -> Self
    where
        Self: Sized,
    {
        Clampable::clamp(self, 0.0 as Float, INFINITY)
    }
}

impl Clampable for Float {
    fn clamp(self, min: Float, max: Float) -> Float {
        clamp_t(self, min, max)
    }
}

impl Clampable for Spectrum {
    fn clamp(self, min: Float, max: Float) -> Spectrum {
        Spectrum::rgb(
            clamp_t(self.c[0], min, max),
            clamp_t(self.c[1], min, max),
            clamp_t(self.c[2], min, max),
        )
    }
}

/// Everything a texel type needs to be stored in (and filtered by) a
/// **MipMap**: a zero value, accumulation, scaling by a weight and
/// clamping to non-negative values.
pub trait Filterable:
    Copy
    + Default
    + Send
    + Sync
    + num::Zero
    + AddAssign
    + Mul<Float, Output = Self>
    + Div<Float, Output = Self>
    + Clampable
{
}

impl<T> Filterable for T where
    T: Copy
        + Default
        + Send
        + Sync
        + num::Zero
        + AddAssign
        + Mul<Float, Output = T>
        + Div<Float, Output = T>
        + Clampable
{
}

/// How a **MipMap** filters, and how its construction is split into
/// parallel tasks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MipMapParams {
    pub do_trilinear: bool,
    pub max_anisotropy: Float,
    pub wrap_mode: ImageWrap,
    /// Rows per task while zooming in *s*.
    pub resample_chunk_size: usize,
    /// Columns per task while zooming in *t*.
    pub column_chunk_size: usize,
    /// Rows per task while filtering a coarser level.
    pub level_chunk_size: usize,
}

impl Default for MipMapParams {
    fn default() -> Self {
        MipMapParams {
            do_trilinear: false,
            max_anisotropy: 8.0 as Float,
            wrap_mode: ImageWrap::Repeat,
            resample_chunk_size: 16,
            column_chunk_size: 32,
            level_chunk_size: 16,
        }
    }
}

impl MipMapParams {
    /// Read `"trilinear"`, `"maxanisotropy"` and `"wrap"` the way an
    /// image texture does.
    pub fn from_param_set(ps: &ParamSet) -> Result<MipMapParams> {
        let d: MipMapParams = MipMapParams::default();
        let wrap: String = ps.find_one_string("wrap", d.wrap_mode.to_string());
        let params: MipMapParams = MipMapParams {
            do_trilinear: ps.find_one_bool("trilinear", d.do_trilinear),
            max_anisotropy: ps.find_one_float("maxanisotropy", d.max_anisotropy),
            wrap_mode: wrap.parse()?,
            ..d
        };
        params.validate()?;
        Ok(params)
    }
    pub fn validate(&self) -> Result<()> {
        if !self.max_anisotropy.is_finite() || self.max_anisotropy <= 0.0 as Float {
            return Err(MipMapError::InvalidMaxAnisotropy(self.max_anisotropy));
        }
        let chunks: [(&'static str, usize); 3] = [
            ("resample", self.resample_chunk_size),
            ("column", self.column_chunk_size),
            ("level", self.level_chunk_size),
        ];
        for &(name, size) in chunks.iter() {
            if size == 0 {
                return Err(MipMapError::InvalidChunkSize { name, size });
            }
        }
        Ok(())
    }
}

pub struct MipMap<T> {
    // MIPMap Private Data
    do_trilinear: bool,
    max_anisotropy: Float,
    wrap_mode: ImageWrap,
    resolution: Point2i,
    pyramid: Vec<BlockedArray<T>>,
    black: T,
}

impl<T> MipMap<T>
where
    T: Filterable,
{
    pub fn new(
        res: Point2i,
        img: &[T],
        do_trilinear: bool,
        max_anisotropy: Float,
        wrap_mode: ImageWrap,
    ) -> Self {
        let params: MipMapParams = MipMapParams {
            do_trilinear,
            max_anisotropy,
            wrap_mode,
            ..MipMapParams::default()
        };
        MipMap::with_params(res, img, &params)
    }
    /// Build the pyramid for the row-major image *img* of resolution
    /// *res*. Images which aren't a power of two in both directions
    /// get zoomed up first. Work is spread over the current rayon
    /// pool.
    pub fn with_params(res: Point2i, img: &[T], params: &MipMapParams) -> Self {
        assert!(
            res.x > 0 && res.y > 0,
            "MIP map resolution {:?} has to be positive",
            res
        );
        assert_eq!(
            img.len(),
            res.area() as usize,
            "image data doesn't match resolution {:?}",
            res
        );
        if let Err(e) = params.validate() {
            panic!("{}", e);
        }
        let mut resolution: Point2i = res;
        let is_pow_2: bool = is_power_of_2(resolution.x) && is_power_of_2(resolution.y);
        let base: BlockedArray<T> = if !is_pow_2 {
            // resample image to power-of-two resolution
            let res_pow_2: Point2i = Point2i {
                x: round_up_pow2_32(resolution.x),
                y: round_up_pow2_32(resolution.y),
            };
            let ratio: f64 = res_pow_2.area() as f64 / resolution.area() as f64;
            debug!(from = ?resolution, to = ?res_pow_2, ratio, "Resampling MIPMap");
            resolution = res_pow_2;
            resample_pow_2(res, res_pow_2, img, params)
        } else {
            BlockedArray::new_from(resolution.x as usize, resolution.y as usize, img)
        };
        // initialize levels of MipMap for image
        let n_levels: usize = 1 + log_2_int_i32(std::cmp::max(resolution.x, resolution.y)) as usize;
        let black: T = num::Zero::zero();
        let mut pyramid: Vec<BlockedArray<T>> = Vec::with_capacity(n_levels);
        pyramid.push(base);
        for i in 1..n_levels {
            // initialize $i$th MipMap level from $i-1$st level
            let level: BlockedArray<T> = downsample(
                &pyramid[i - 1],
                params.wrap_mode,
                &black,
                params.level_chunk_size,
            );
            trace!(level = i, width = level.u_size(), height = level.v_size(), "MIPMap level");
            pyramid.push(level);
        }
        let memory: usize = (4 * resolution.area() as usize * std::mem::size_of::<T>()) / 3;
        MIPMAP_MEMORY.fetch_add(memory as u64, Ordering::Relaxed);
        debug!(
            width = resolution.x,
            height = resolution.y,
            levels = n_levels,
            bytes = memory,
            "MIPMap created"
        );
        MipMap {
            do_trilinear: params.do_trilinear,
            max_anisotropy: params.max_anisotropy,
            wrap_mode: params.wrap_mode,
            resolution,
            pyramid,
            black,
        }
    }
    pub fn width(&self) -> i32 {
        self.resolution.x
    }
    pub fn height(&self) -> i32 {
        self.resolution.y
    }
    pub fn levels(&self) -> usize {
        self.pyramid.len()
    }
    pub fn wrap_mode(&self) -> ImageWrap {
        self.wrap_mode
    }
    pub fn level(&self, level: usize) -> &BlockedArray<T> {
        &self.pyramid[level]
    }
    pub fn texel(&self, level: usize, s: isize, t: isize) -> &T {
        assert!(
            level < self.levels(),
            "MIPMap level {} out of range, only {} levels",
            level,
            self.levels()
        );
        texel_at(&self.pyramid[level], self.wrap_mode, &self.black, s, t)
    }
    /// Isotropic lookup: *width* is the side length of a square
    /// footprint in `[0,1]^2` texture space.
    pub fn lookup_pnt_flt(&self, st: Point2f, width: Float) -> T {
        N_TRILERP_LOOKUPS.fetch_add(1, Ordering::Relaxed);
        // compute MIPMap level for trilinear filtering
        let level: Float = self.levels() as Float - 1.0 as Float + width.max(1e-8 as Float).log2();
        // perform trilinear interpolation at appropriate MIPMap level
        if level < 0.0 as Float {
            self.triangle(0_usize, st)
        } else if level >= self.levels() as Float - 1.0 as Float {
            *self.texel(self.levels() - 1, 0_isize, 0_isize)
        } else {
            let i_level: usize = level.floor() as usize;
            let delta: Float = level - i_level as Float;
            lerp(
                delta,
                self.triangle(i_level, st),
                self.triangle(i_level + 1_usize, st),
            )
        }
    }
    /// Anisotropic lookup over the ellipse spanned by *dst0* and *dst1*.
    pub fn lookup_pnt_vec_vec(&self, st: Point2f, dst0: Vector2f, dst1: Vector2f) -> T {
        if self.do_trilinear {
            let width: Float = dst0.max_abs_component().max(dst1.max_abs_component());
            return self.lookup_pnt_flt(st, width);
        }
        N_EWA_LOOKUPS.fetch_add(1, Ordering::Relaxed);
        // compute ellipse minor and major axes
        let (mut dst0, mut dst1): (Vector2f, Vector2f) = (dst0, dst1);
        if dst0.length_squared() < dst1.length_squared() {
            std::mem::swap(&mut dst0, &mut dst1);
        }
        let major_length: Float = dst0.length();
        let mut minor_length: Float = dst1.length();
        // clamp ellipse eccentricity if too large
        if minor_length * self.max_anisotropy < major_length && minor_length > 0.0 as Float {
            let scale: Float = major_length / (minor_length * self.max_anisotropy);
            dst1 *= scale;
            minor_length *= scale;
        }
        if minor_length == 0.0 as Float {
            return self.triangle(0, st);
        }
        // choose level of detail for EWA lookup and perform EWA filtering
        let lod: Float =
            (0.0 as Float).max(self.levels() as Float - 1.0 as Float + minor_length.log2());
        let ilod: usize = lod.floor() as usize;
        lerp(
            lod - ilod as Float,
            self.ewa(ilod, st, dst0, dst1),
            self.ewa(ilod + 1, st, dst0, dst1),
        )
    }
    /// Bilinear interpolation of the four texels around *st*.
    fn triangle(&self, level: usize, st: Point2f) -> T {
        let level: usize = clamp_t(level, 0_usize, self.levels() - 1_usize);
        let s: Float = st.x * self.pyramid[level].u_size() as Float - 0.5;
        let t: Float = st.y * self.pyramid[level].v_size() as Float - 0.5;
        let s0: isize = s.floor() as isize;
        let t0: isize = t.floor() as isize;
        let ds: Float = s - s0 as Float;
        let dt: Float = t - t0 as Float;
        *self.texel(level, s0, t0) * ((1.0 - ds) * (1.0 - dt))
            + *self.texel(level, s0, t0 + 1) * ((1.0 - ds) * dt)
            + *self.texel(level, s0 + 1, t0) * (ds * (1.0 - dt))
            + *self.texel(level, s0 + 1, t0 + 1) * (ds * dt)
    }
    fn ewa(&self, level: usize, st: Point2f, dst0: Vector2f, dst1: Vector2f) -> T {
        if level >= self.levels() {
            return *self.texel(self.levels() - 1, 0, 0);
        }
        // convert EWA coordinates to appropriate scale for level
        let u_size: Float = self.pyramid[level].u_size() as Float;
        let v_size: Float = self.pyramid[level].v_size() as Float;
        let new_st: Point2f = Point2f {
            x: st.x * u_size - 0.5 as Float,
            y: st.y * v_size - 0.5 as Float,
        };
        let new_dst0: Vector2f = Vector2f {
            x: dst0.x * u_size,
            y: dst0.y * v_size,
        };
        let new_dst1: Vector2f = Vector2f {
            x: dst1.x * u_size,
            y: dst1.y * v_size,
        };
        // compute ellipse coefficients to bound EWA filter region
        let mut a: Float = new_dst0.y * new_dst0.y + new_dst1.y * new_dst1.y + 1.0 as Float;
        let mut b: Float = -2.0 as Float * (new_dst0.x * new_dst0.y + new_dst1.x * new_dst1.y);
        let mut c: Float = new_dst0.x * new_dst0.x + new_dst1.x * new_dst1.x + 1.0 as Float;
        let inv_f: Float = 1.0 as Float / (a * c - b * b * 0.25 as Float);
        a *= inv_f;
        b *= inv_f;
        c *= inv_f;
        // compute the ellipse's $(s,t)$ bounding box in texture space
        let det: Float = -b * b + 4.0 as Float * a * c;
        let inv_det: Float = 1.0 as Float / det;
        let u_sqrt: Float = (det * c).sqrt();
        let v_sqrt: Float = (a * det).sqrt();
        let s0: isize = (new_st.x - 2.0 as Float * inv_det * u_sqrt).ceil() as isize;
        let s1: isize = (new_st.x + 2.0 as Float * inv_det * u_sqrt).floor() as isize;
        let t0: isize = (new_st.y - 2.0 as Float * inv_det * v_sqrt).ceil() as isize;
        let t1: isize = (new_st.y + 2.0 as Float * inv_det * v_sqrt).floor() as isize;
        // scan over ellipse bound and compute quadratic equation
        let lut: &[Float; WEIGHT_LUT_SIZE] = weight_lut();
        let mut sum: T = num::Zero::zero();
        let mut sum_wts: Float = 0.0;
        for it in t0..=t1 {
            let tt: Float = it as Float - new_st.y;
            for is in s0..=s1 {
                let ss: Float = is as Float - new_st.x;
                // compute squared radius and filter texel if inside ellipse
                let r2: Float = a * ss * ss + b * ss * tt + c * tt * tt;
                if r2 < 1.0 as Float {
                    let index: usize = std::cmp::min(
                        (r2 * WEIGHT_LUT_SIZE as Float) as usize,
                        WEIGHT_LUT_SIZE - 1,
                    );
                    let weight: Float = lut[index];
                    sum += *self.texel(level, is, it) * weight;
                    sum_wts += weight;
                }
            }
        }
        if sum_wts <= 0.0 as Float {
            // guard the division, the unit disk is always inside the ellipse
            return self.triangle(level, st);
        }
        sum / sum_wts
    }
}

fn texel_at<'a, T>(
    level: &'a BlockedArray<T>,
    wrap_mode: ImageWrap,
    black: &'a T,
    s: isize,
    t: isize,
) -> &'a T {
    // compute texel $(s,t)$ accounting for boundary conditions
    match wrap_mode.resolve(s, t, level.u_size(), level.v_size()) {
        Some(st) => &level[st],
        None => black,
    }
}

/// Zoom *img* from *res* up to *res_pow_2*, first along *s* (one task
/// per group of rows), then along *t* (one task per group of columns).
/// Only the final values get clamped to be non-negative.
fn resample_pow_2<T>(
    res: Point2i,
    res_pow_2: Point2i,
    img: &[T],
    params: &MipMapParams,
) -> BlockedArray<T>
where
    T: Filterable,
{
    let wrap_mode: ImageWrap = params.wrap_mode;
    let (old_s, old_t) = (res.x as usize, res.y as usize);
    let (new_s, new_t) = (res_pow_2.x as usize, res_pow_2.y as usize);
    // resample image in $s$ direction
    let s_weights: Vec<ResampleWeight> = resample_weights(res.x, res_pow_2.x);
    let mut s_zoomed: Vec<T> = vec![num::Zero::zero(); new_s * old_t];
    parallel_for(
        &mut s_zoomed,
        new_s,
        params.resample_chunk_size,
        || (),
        |_, t, row| {
            let src: &[T] = &img[t * old_s..(t + 1) * old_s];
            for (texel, rw) in row.iter_mut().zip(s_weights.iter()) {
                // compute texel $(s,t)$ in $s$-zoomed image
                for j in 0..4 {
                    let orig_s: isize = rw.first_texel as isize + j as isize;
                    if let Some(orig_s) = wrap_mode.resolve_index(orig_s, old_s) {
                        *texel += src[orig_s] * rw.weight[j];
                    }
                }
            }
        },
    );
    // resample image in $t$ direction
    let t_weights: Vec<ResampleWeight> = resample_weights(res.y, res_pow_2.y);
    let mut columns: Vec<T> = vec![num::Zero::zero(); new_s * new_t];
    parallel_for(
        &mut columns,
        new_t,
        params.column_chunk_size,
        || vec![<T as num::Zero>::zero(); new_t],
        |work_data, s, column| {
            for (t, rw) in t_weights.iter().enumerate() {
                work_data[t] = num::Zero::zero();
                for j in 0..4 {
                    let offset: isize = rw.first_texel as isize + j as isize;
                    if let Some(offset) = wrap_mode.resolve_index(offset, old_t) {
                        work_data[t] += s_zoomed[offset * new_s + s] * rw.weight[j];
                    }
                }
            }
            for (texel, value) in column.iter_mut().zip(work_data.iter()) {
                *texel = value.clamp_non_negative();
            }
        },
    );
    BlockedArray::new_from_columns(new_s, new_t, &columns)
}

/// Box filter 2x2 blocks of *finer* into a level of half the
/// resolution (but at least one texel in each direction).
fn downsample<T>(
    finer: &BlockedArray<T>,
    wrap_mode: ImageWrap,
    black: &T,
    chunk_size: usize,
) -> BlockedArray<T>
where
    T: Filterable,
{
    let s_res: usize = std::cmp::max(1, finer.u_size() / 2);
    let t_res: usize = std::cmp::max(1, finer.v_size() / 2);
    let mut texels: Vec<T> = vec![num::Zero::zero(); s_res * t_res];
    parallel_for(&mut texels, s_res, chunk_size, || (), |_, t, row| {
        let ti: isize = t as isize;
        for (s, texel) in row.iter_mut().enumerate() {
            // filter 4 texels from finer level of pyramid
            let si: isize = s as isize;
            *texel = (*texel_at(finer, wrap_mode, black, 2 * si, 2 * ti)
                + *texel_at(finer, wrap_mode, black, 2 * si + 1, 2 * ti)
                + *texel_at(finer, wrap_mode, black, 2 * si, 2 * ti + 1)
                + *texel_at(finer, wrap_mode, black, 2 * si + 1, 2 * ti + 1))
                * 0.25 as Float;
        }
    });
    BlockedArray::new_from(s_res, t_res, &texels)
}
