//! irank browse - Interactive terminal client

use clap::Args;
use tokio::runtime::Runtime;

use crate::app::AppContext;
use crate::error::{IrError, Result};

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Search for this query as soon as the client opens
    #[arg(long)]
    pub query: Option<String>,
}

pub fn run(ctx: &AppContext, runtime: &Runtime, args: &BrowseArgs) -> Result<()> {
    // Cannot run TUI in robot mode
    if ctx.robot_mode {
        return Err(IrError::Config(
            "the terminal client requires an interactive terminal (cannot use --robot)"
                .to_string(),
        ));
    }

    // Controllers spawn their requests onto this runtime from the UI thread.
    let _guard = runtime.enter();
    crate::tui::run(
        std::sync::Arc::clone(&ctx.client),
        ctx.settings,
        args.query.as_deref(),
    )
}
