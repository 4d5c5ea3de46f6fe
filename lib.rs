/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Spatial canvas of embedded web views.
//!
//! Nodes are rectangles on an unbounded pan/zoom canvas. Each node's content
//! is painted by an out-of-process renderer that the core drives through
//! [`bridge::RendererBridge`]; renderers exist only for nodes the viewport
//! can see.

pub mod app;
pub mod bridge;
pub mod graph;
pub mod history;
pub mod input;
pub mod lifecycle;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod viewport;

pub use app::{CanvasApp, CanvasIntent};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `fmt` subscriber. `filter` overrides `RUST_LOG`; `log` records
/// are forwarded through the `tracing-log` bridge.
#[cfg(feature = "tracing")]
pub fn init_tracing(filter: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()?;
    Ok(())
}
