// Portfolio rendering: template descriptors, the shared HTML serializer,
// scroll-spy, and the export/preview pages built on top of them.

pub mod export;
pub mod handlers;
pub mod sections;
pub mod templates;

pub use templates::Template;
