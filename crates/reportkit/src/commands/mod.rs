//! CLI command implementations.

pub(crate) mod pattern;
pub(crate) mod render;

pub(crate) use pattern::PatternArgs;
pub(crate) use render::RenderArgs;
