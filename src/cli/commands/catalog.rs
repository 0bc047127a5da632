//! irank categories / subcategories - List the filter catalogs

use clap::Args;
use serde::Serialize;

use crate::api::RankingService;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::session::ALL;

#[derive(Args, Debug)]
pub struct CategoriesArgs {}

#[derive(Args, Debug)]
pub struct SubcategoriesArgs {
    /// Category whose subcategories to list ("All" for every category)
    #[arg(long, short, default_value = ALL)]
    pub category: String,
}

#[derive(Serialize)]
struct CatalogOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    values: &'a [String],
}

pub async fn run_categories(ctx: &AppContext, _args: &CategoriesArgs) -> Result<()> {
    let categories = ctx.client.categories().await?;
    emit_catalog(ctx, "Categories", None, &categories)
}

pub async fn run_subcategories(ctx: &AppContext, args: &SubcategoriesArgs) -> Result<()> {
    let subcategories = ctx.client.subcategories(&args.category).await?;
    emit_catalog(ctx, "Subcategories", Some(&args.category), &subcategories)
}

fn emit_catalog(
    ctx: &AppContext,
    title: &str,
    category: Option<&str>,
    values: &[String],
) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(&robot_ok(CatalogOutput { category, values }));
    }

    let mut layout = HumanLayout::new();
    match category {
        Some(category) => layout.title(&format!("{title} of {category}")),
        None => layout.title(title),
    };
    if values.is_empty() {
        layout.push_line("(none)");
    }
    for value in values {
        layout.bullet(value);
    }
    emit_human(layout);
    Ok(())
}
