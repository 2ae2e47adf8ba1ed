//! Document-producing backends.
//!
//! Three interchangeable engines implement [`RenderBackend`]:
//! - [`VectorRenderer`]: draws directly with the layout primitives
//! - [`BrowserRenderer`]: HTML printed to PDF by a headless browser
//! - [`TypesettingRenderer`]: LaTeX compiled by an external typesetter

pub mod browser;
mod markup;
mod process;
mod traits;
pub mod typesetting;
pub mod vector;

pub use browser::BrowserRenderer;
pub use markup::{MarkupDialect, MarkupTemplates};
pub use traits::RenderBackend;
pub use typesetting::{escape_latex, TypesettingRenderer};
pub use vector::VectorRenderer;
