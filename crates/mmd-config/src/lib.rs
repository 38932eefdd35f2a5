//! Theme resolution and per-diagram configuration.
//!
//! Diagram blocks carry their configuration as a JSON-serialized attribute
//! bag. This crate turns that bag, together with an optional theme override,
//! into the effective configuration handed to the diagram engine:
//!
//! - [`Theme`] / [`ColorMode`] / [`ColorScheme`]: theme names and the
//!   ambient color-mode collaborator
//! - [`EffectiveConfig`]: the engine-facing configuration object
//! - [`resolve`]: builds an [`EffectiveConfig`] from serialized attributes
//!
//! Resolution is best-effort and never fails; malformed input degrades to
//! an empty configuration so the engine's defaults apply.

mod effective;
mod resolve;
mod theme;

pub use effective::{EffectiveConfig, FlowchartConfig, PacketConfig, SequenceConfig};
pub use resolve::resolve;
pub use theme::{ColorMode, ColorScheme, Theme};
