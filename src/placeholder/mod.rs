//! Placeholder image synthesis: size inference, font lookup, rendering and the
//! existence-gated write.

pub mod font;
pub mod render;
pub mod size_hint;
pub mod synth;

pub use font::{font_sources, resolve_font, FontChoice, FontSource, Resolution, FONT_ENV_VAR};
pub use render::{render_placeholder, LabelStyle, OutputFormat};
pub use size_hint::SizeHint;
pub use synth::{Outcome, SynthesisError, Synthesizer};
