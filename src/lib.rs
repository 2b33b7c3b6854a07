//! # mipmap
//!
//! [Rust][rust] crate implementing the texture filtering part of the
//! [PBRT book][book]'s C++ code: an image pyramid (**MIP map**) built
//! from a raster image, and two ways to ask it for a band-limited
//! texture value over a screen-space footprint.
//!
//! 1. [isotropic lookup][trilinear] (trilinear interpolation between
//!    two pyramid levels)
//! 2. [anisotropic lookup][ewa] (elliptically weighted averaging)
//!
//! The texel type is generic, see [Filterable][filterable]; `Float`
//! and `Spectrum` work out of the box.
//!
//! [rust]: https://www.rust-lang.org
//! [book]: http://www.pbrt.org
//! [trilinear]: core/mipmap/struct.MipMap.html#method.lookup_pnt_flt
//! [ewa]: core/mipmap/struct.MipMap.html#method.lookup_pnt_vec_vec
//! [filterable]: core/mipmap/trait.Filterable.html

#[macro_use]
extern crate impl_ops;
#[macro_use]
extern crate lazy_static;

pub mod core;
