//! Fukuwarai is a face-assembly toy: facial parts wander under procedural waveforms, the player
//! freezes them one at a time, and the finished face is scored by how well its parts agree.
//!
//! The public API is session-oriented:
//!
//! - Create a [`Session`] from a [`SessionConfig`] and a seed
//! - Drive it with [`Session::advance`] (a click) and [`Session::tick`] (a display frame)
//! - Read the [`Score`], take a PNG [`Snapshot`], or produce a share link that
//!   [`Session::restore`] turns back into a completed session
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod scene;
mod scoring;
mod session;
mod snapshot;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Affine, Canvas, Hue, Point, Rng64};
pub use crate::foundation::error::{FukuwaraiError, FukuwaraiResult};

pub use crate::animation::task::AnimationTask;
pub use crate::animation::waveform::{
    ORIGIN_PERIOD, ROTATE_PERIOD, RenderedFrame, SCALE_PERIOD, WaveformState, X_PERIOD, Y_PERIOD,
};

pub use crate::scene::model::{FrozenScene, Scene};
pub use crate::scene::part::{LiveState, Part, PartId};
pub use crate::scene::render::{VIEWBOX, face_stylesheet, scene_document};
pub use crate::scene::transform::{ORIGIN_Y, Origin, Transform};

pub use crate::scoring::engine::{
    Dimension, Score, ScoreComponents, dimension_score, score, score_components,
};

pub use crate::snapshot::node::{SVG_NS, SvgDocument, SvgNode};
pub use crate::snapshot::pipeline::{
    PendingSnapshot, inline_computed_styles, render_snapshot, serialize_svg, spawn_snapshot,
};
pub use crate::snapshot::raster::{
    SVG_DATA_URI_PREFIX, Snapshot, decode_svg_data_uri, encode_png, encode_svg_data_uri,
    parse_svg, rasterize_data_uri, rasterize_svg_to_premul_rgba8,
};
pub use crate::snapshot::style::{ComputedStyle, Selector, StyleRule, StyleSheet};

pub use crate::session::config::{SessionConfig, ShareFormat};
pub use crate::session::controller::{Advance, FINISH_TEXT, START_TEXT, Session, SessionPhase};
pub use crate::session::export::{export_filename, resolve_export_path, unix_now, write_png};
pub use crate::session::share::{
    RestoredScene, decode_share_link, decode_share_query, encode_share_link,
};
