//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;
use tokio::runtime::Runtime;

pub mod browse;
pub mod catalog;
pub mod doctor;
pub mod health;
pub mod search;

use crate::app::AppContext;
use crate::error::Result;

/// Dispatch a command to its handler. No command opens the terminal client.
pub fn run(ctx: &AppContext, runtime: &Runtime, command: Option<&Commands>) -> Result<()> {
    match command {
        None => browse::run(ctx, runtime, &browse::BrowseArgs::default()),
        Some(Commands::Browse(args)) => browse::run(ctx, runtime, args),
        Some(Commands::Search(args)) => runtime.block_on(search::run(ctx, args)),
        Some(Commands::Health(args)) => runtime.block_on(health::run(ctx, args)),
        Some(Commands::Categories(args)) => runtime.block_on(catalog::run_categories(ctx, args)),
        Some(Commands::Subcategories(args)) => {
            runtime.block_on(catalog::run_subcategories(ctx, args))
        }
        Some(Commands::Doctor(args)) => runtime.block_on(doctor::run(ctx, args)),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal client
    Browse(browse::BrowseArgs),

    /// Run one search and print the ranked results
    Search(search::SearchArgs),

    /// Probe the ranking service's health endpoint
    Health(health::HealthArgs),

    /// List the category catalog
    Categories(catalog::CategoriesArgs),

    /// List the subcategories of a category
    Subcategories(catalog::SubcategoriesArgs),

    /// Show resolved configuration and check connectivity
    Doctor(doctor::DoctorArgs),
}
