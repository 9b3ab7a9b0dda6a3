//! # LearnSphere
//!
//! Application facade over the LearnSphere crates and the operations behind
//! the `learnsphere` command-line tool.
//!
//! - [`LearnSphere`]: wires the document, auth and assistant services from
//!   one [`AppConfig`]
//! - [`files`]: markdown files on disk as link sources
//! - [`commands`]: analyze a file, list backlinks in a directory, run the demo
//! - [`output`]: human and JSON output
//!
//! ```
//! use learnsphere::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let app = LearnSphere::new(ConfigProfile::Testing.create_config())?;
//! app.start().await?;
//! app.sign_in(app.demo_credentials()).await?;
//!
//! let backlinks = app.documents().backlinks_for("1").await?;
//! assert_eq!(backlinks.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod commands;
pub mod files;
pub mod output;

pub use app::{LearnSphere, SharedStorage};
pub use commands::{BacklinkReport, DemoReport, analyze_file, backlinks_in_dir, run_demo};
pub use files::{MarkdownFile, load_markdown_dir, load_markdown_file};
pub use output::OutputFormat;

pub mod prelude {
    pub use crate::app::LearnSphere;
    pub use crate::output::OutputFormat;
    pub use learnsphere_core::prelude::*;
}
