pub mod render_service;

pub use render_service::{RenderOutput, RenderRequest, RenderService};
