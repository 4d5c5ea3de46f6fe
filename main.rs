/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Headless canvas session: load a workspace, fit it, run one activation
//! pass against an in-process bridge and report what would be on screen.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use bpaf::Bpaf;
use canvasshell::CanvasApp;
use canvasshell::bridge::event_channel;
use canvasshell::bridge::recording::RecordingBridge;
use canvasshell::persistence::WorkspaceStore;
use canvasshell::settings::{CanvasSettings, SETTINGS_FILE_NAME};
use euclid::default::Size2D;
use log::{error, info, warn};

const DEFAULT_CANVAS_SIZE: (f64, f64) = (1280.0, 800.0);

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
/// Lay out web views on an infinite canvas.
struct CliOptions {
    /// Directory holding settings.toml and saved workspaces
    #[bpaf(argument("PATH"))]
    state_dir: Option<PathBuf>,

    /// Load this named workspace instead of the latest state
    #[bpaf(argument("NAME"))]
    workspace: Option<String>,

    /// Log filter directives, overrides RUST_LOG
    #[bpaf(argument("FILTER"))]
    tracing_filter: Option<String>,

    /// Drawing surface size in pixels
    #[bpaf(
        argument::<String>("WxH"),
        parse(parse_canvas_size),
        fallback(Size2D::new(DEFAULT_CANVAS_SIZE.0, DEFAULT_CANVAS_SIZE.1))
    )]
    canvas_size: Size2D<f64>,

    /// Start from an empty canvas
    reset: bool,

    /// Write the session back to the state directory before exiting
    save: bool,
}

fn parse_canvas_size(value: String) -> Result<Size2D<f64>, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {value:?}"))?;
    let width: f64 = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let height: f64 = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(format!("canvas size must be positive, got {value:?}"));
    }
    Ok(Size2D::new(width, height))
}

fn main() -> ExitCode {
    let opts = cli_options().run();

    #[cfg(feature = "tracing")]
    if let Err(e) = canvasshell::init_tracing(opts.tracing_filter.as_deref()) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("canvasshell: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(opts: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let state_dir = opts
        .state_dir
        .clone()
        .unwrap_or_else(WorkspaceStore::default_data_dir);
    info!("canvasshell {} using {}", canvasshell::VERSION, state_dir.display());

    let settings = CanvasSettings::load_or_default(state_dir.join(SETTINGS_FILE_NAME))?;
    let workspace_store = WorkspaceStore::open(state_dir.clone())?;

    let (tx, rx) = event_channel();
    let bridge = RecordingBridge::responsive(tx).with_screenshot_dir(state_dir.join("screenshots"));
    let mut app = CanvasApp::new(bridge, rx, settings, opts.canvas_size);

    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("session", workspace = ?opts.workspace).entered();

    let loaded = if opts.reset {
        Ok(None)
    } else {
        match opts.workspace.as_deref() {
            Some(name) => workspace_store.load_named(name),
            None => workspace_store.load_latest(),
        }
    };
    match loaded {
        Ok(Some(snapshot)) => app.load_workspace(snapshot),
        Ok(None) => app.init(),
        Err(e) => {
            warn!("Failed to load workspace, starting fresh: {e}");
            app.init();
        },
    }

    app.fit_view();
    let now = Instant::now();
    app.redraw(now);
    app.pump_bridge_events(now);
    let frame = app.redraw(now);

    let transform = app.viewport().transform();
    println!("workspace: {}", app.workspace_name());
    println!("nodes: {} ({} visible)", app.store().len(), frame.nodes.len());
    println!(
        "view: scale {:.3}, offset ({:.1}, {:.1})",
        transform.scale, transform.offset_x, transform.offset_y
    );
    println!(
        "views requested: {}, live: {}",
        app.bridge().created_nodes().len(),
        app.bridge().live_view_count()
    );

    if opts.save {
        app.save_to(&workspace_store)?;
        info!("Saved workspace {:?}", app.workspace_name());
    }
    Ok(())
}
