//! irank search - Run one search session

use clap::Args;
use console::style;
use serde::Serialize;

use crate::api::{RankingService, SearchRequest, SearchResult};
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::{IrError, Result};
use crate::session::{
    ALL, FilterSelection, ResultsView, SEARCH_FAILED_MESSAGE, SearchSession, SearchTicket,
};
use crate::tui::pages;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Restrict to one category ("All" for every category)
    #[arg(long, short, default_value = ALL)]
    pub category: String,

    /// Restrict to one subcategory ("All" for every subcategory)
    #[arg(long, short, default_value = ALL)]
    pub subcategory: String,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    request: &'a SearchRequest,
    low_confidence: bool,
    count: usize,
    results: &'a [SearchResult],
}

pub async fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let filters = FilterSelection::new(&args.category, &args.subcategory);
    let mut session = SearchSession::new(ctx.settings.page_size);
    let ticket = session
        .submit_text(&args.query, &filters)
        .ok_or_else(|| IrError::Config("search query must not be blank".to_string()))?;

    if let Err(err) = execute(ctx.client.as_ref(), &mut session, &ticket).await {
        if !ctx.robot_mode {
            eprintln!("{}", style(SEARCH_FAILED_MESSAGE).red());
        }
        return Err(err);
    }

    if ctx.robot_mode {
        let low_confidence = session.has_low_confidence();
        let output = SearchOutput {
            request: &ticket.request,
            low_confidence,
            count: session.results().len(),
            results: session.results(),
        };
        let warnings = if low_confidence {
            vec![pages::LOW_CONFIDENCE_BANNER.to_string()]
        } else {
            Vec::new()
        };
        return emit_robot(&robot_ok(output).with_warnings(warnings));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Results for \"{}\"", args.query));
    layout
        .kv("Category", filters.category.as_str())
        .kv("Subcategory", filters.subcategory.as_str())
        .blank();

    match session.view() {
        ResultsView::Results {
            results,
            low_confidence,
        } => {
            if low_confidence {
                layout
                    .push_line(style(pages::LOW_CONFIDENCE_BANNER).yellow().to_string())
                    .blank();
            }
            for (index, result) in results.iter().enumerate() {
                layout.result_card(index + 1, result);
            }
        }
        ResultsView::NoResults => {
            layout
                .push_line(style(pages::NO_RESULTS_TITLE).bold().to_string())
                .push_line(pages::NO_RESULTS_HINT);
        }
        ResultsView::Idle | ResultsView::Searching | ResultsView::Error(_) => {}
    }
    emit_human(layout);
    Ok(())
}

/// Run one dispatched search to completion through the session, so success
/// and failure settle the controller exactly as in the terminal client.
async fn execute<S: RankingService>(
    service: &S,
    session: &mut SearchSession,
    ticket: &SearchTicket,
) -> Result<()> {
    match service.search(&ticket.request).await {
        Ok(results) => {
            session.apply(ticket.seq, Ok(results));
            Ok(())
        }
        Err(err) => {
            session.apply_error(ticket.seq, &err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedService;
    use crate::test_utils::fixtures::result;

    #[tokio::test]
    async fn test_failed_search_settles_session() {
        let service = ScriptedService::new();
        let mut session = SearchSession::default();
        let ticket = session
            .submit_text("python", &FilterSelection::all())
            .unwrap();

        let (outcome, _) = tokio::join!(execute(&service, &mut session, &ticket), async {
            service.wait_for_pending(1).await;
            service.resolve_search(
                "python",
                Err(IrError::Unreachable("connection refused".to_string())),
            )
        });

        assert!(matches!(outcome, Err(IrError::Unreachable(_))));
        assert!(!session.is_loading());
        assert_eq!(session.error(), Some(SEARCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_successful_search_fills_session() {
        let service = ScriptedService::new();
        let mut session = SearchSession::default();
        let ticket = session
            .submit_text("python", &FilterSelection::all())
            .unwrap();

        let (outcome, _) = tokio::join!(execute(&service, &mut session, &ticket), async {
            service.wait_for_pending(1).await;
            service.resolve_search("python", Ok(vec![result(1, true), result(2, false)]))
        });

        assert!(outcome.is_ok());
        assert!(!session.is_loading());
        assert_eq!(session.results().len(), 2);
        assert!(session.has_low_confidence());
    }
}
