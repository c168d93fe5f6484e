use anyhow::Result;
use odgrid_types::{DatasetSpec, Gateway};
use tokio::runtime::Runtime;

use crate::app::GridApp;
use crate::ui;

pub fn handle<G: Gateway>(runtime: &Runtime, gateway: &G, dataset: DatasetSpec) -> Result<()> {
    let mut app = GridApp::new(gateway, dataset);
    runtime.block_on(app.load());
    ui::grid::run(runtime, app)
}
