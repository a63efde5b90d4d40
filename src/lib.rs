//! Depth-agnostic raster drawing over memory-mapped framebuffers.
//!
//! The crate is the drawing half of a framebuffer stack: a provider (device
//! wrapper, test harness) opens the display, maps its memory, and reports
//! geometry through [`SurfaceInfo`]; this crate turns that mapping into a
//! typed [`Surface`] and draws on it. One code path serves every supported
//! depth (8, 16, 24, and 32 bits per pixel) because colors are packed by a
//! [`ChannelMask`] the provider reports rather than by per-format code.
//!
//! - [`Surface`] — bounds-checked pixel and shape primitives (boxes, lines,
//!   circles) over the mapped bytes, with silent clipping at the edges.
//! - [`Depth`] / [`PixelWord`] / [`ChannelMask`] — the mask-driven codec
//!   between 8-bit-per-channel [`Rgba`] colors and packed pixel words.
//! - [`PixelArray`] — images pre-encoded at the surface's depth, for raw
//!   blits ([`Surface::put_array`]) and opacity-aware layering
//!   ([`PixelArray::composite_onto`]).
//! - [`words`] / [`words_mut`] — the zero-copy typed views underneath it
//!   all.
//!
//! `no_std` + `alloc`; no unsafe code.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod array;
mod error;
mod geom;
mod mask;
mod pixel;
mod plane;
mod surface;
mod view;

pub use array::{PixelArray, SourceImage};
pub use error::RasterError;
pub use geom::{Point, Rect};
pub use mask::{Channel, ChannelMask};
pub use pixel::{Depth, PixelWord};
pub use surface::{Surface, SurfaceInfo, SurfaceProvider};
pub use view::{words, words_mut};

// Color and image-buffer types used in the public API.
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{Rgb, Rgba};
