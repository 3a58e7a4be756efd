//! Splitshot aligns two independently framed photos of a person and composes them into
//! before/after comparisons.
//!
//! Alignment is one pure function ([`calculate_alignment`]) driven by sparse pose landmarks; the
//! same result feeds every surface:
//!
//! - a side-by-side still ([`export_still`])
//! - a slider, crossfade or toggle animation streamed into an [`AnimationSink`]
//!   ([`export_animation`], [`export_gif`])
//! - a live [`Preview`] drawn onto a caller-owned pixmap
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Pair alignment.
pub mod align;
/// Animation timing.
pub mod animation;
/// Source photo decoding.
pub mod assets;
/// Encoding sinks.
pub mod encode;
/// Export orchestration.
pub mod export;
/// Landmark and rectangle geometry.
pub mod geometry;
/// CPU rendering.
pub mod render;

pub use crate::foundation::core::{Affine, Canvas, Format, Rect, Rgba8Premul};
pub use crate::foundation::error::{SplitshotError, SplitshotResult};

pub use crate::align::calculator::{
    AlignmentResult, PhotoRef, Side, calculate_alignment, calculate_alignment_with,
};
pub use crate::align::config::AlignConfig;
pub use crate::animation::ease::Ease;
pub use crate::animation::schedule::{AnimationSchedule, AnimationStyle};
pub use crate::assets::decode::{ImageInput, PreparedImage, decode_image, decode_pair};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{AnimationSink, InMemorySink, SinkConfig};
pub use crate::encode::still::{StillFormat, encode_still};
pub use crate::export::PhotoSource;
pub use crate::export::animation::{
    AnimationExport, AnimationRequest, GifExport, export_animation, export_gif,
};
pub use crate::export::progress::{ExportProgress, ExportStage};
pub use crate::export::still::{StillExport, StillRender, StillRequest, export_still, render_still};
pub use crate::geometry::landmark::{Landmark, PoseIndex};
pub use crate::geometry::rect::{DrawRect, cover_fit};
pub use crate::render::backend::{FrameRGBA, RenderSettings};
pub use crate::render::label::LabelStyle;
pub use crate::render::preview::{PhotoPair, Preview};
