pub mod diagram;
pub mod rasterize;

pub use diagram::DiagramRenderer;
pub use rasterize::Rasterizer;
