mod app;
mod conflict;
mod layout;
mod util;
mod vis;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use log::info;

use crate::conflict::{ConflictRegistry, ConflictSource};
use crate::vis::{ConnectorShape, GraphConfig, TreeConfig, TreeDepth, ViewKind, VisConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StartView {
    Tree,
    Graph,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Connector {
    Line,
    Arc,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Conflict documents to offer, in selection order.
    #[arg(default_value = "json/visData.json")]
    conflicts: Vec<PathBuf>,

    #[arg(long, value_enum, default_value = "tree")]
    view: StartView,

    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=6))]
    tree_depth: u8,

    /// Start both views with only unilateral improvements shown.
    #[arg(long)]
    only_improving: bool,

    /// Draw non-improving graph moves grey and dashed.
    #[arg(long)]
    style_non_improving: bool,

    #[arg(long, value_enum, default_value = "line")]
    connector: Connector,
}

impl Args {
    fn vis_config(&self) -> anyhow::Result<VisConfig> {
        Ok(VisConfig {
            tree: TreeConfig {
                depth: TreeDepth::new(self.tree_depth)?,
                show_only_uis: self.only_improving,
            },
            graph: GraphConfig {
                show_only_uis: self.only_improving,
                style_non_uis: self.style_non_improving,
                connector_shape: match self.connector {
                    Connector::Line => ConnectorShape::Line,
                    Connector::Arc => ConnectorShape::Arc,
                },
            },
        })
    }

    fn view_kind(&self) -> ViewKind {
        match self.view {
            StartView::Tree => ViewKind::Tree,
            StartView::Graph => ViewKind::Graph,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.vis_config()?;
    let view = args.view_kind();
    let sources = args
        .conflicts
        .iter()
        .map(ConflictSource::from_path)
        .collect::<Vec<_>>();
    info!("offering {} conflict document(s)", sources.len());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "gmcr-vis",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GmcrVisApp::new(
                cc,
                ConflictRegistry::new(sources),
                view,
                config,
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to start the viewer: {error}"))
}
