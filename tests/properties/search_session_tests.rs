use proptest::prelude::*;

use intellirank::error::IrError;
use intellirank::session::{FilterSelection, SEARCH_FAILED_MESSAGE, SearchSession};
use intellirank::test_utils::fixtures::result;

#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Complete { pick: usize, ok: bool },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z ]{1,12}"]
            .prop_map(Step::Submit),
        (any::<usize>(), any::<bool>()).prop_map(|(pick, ok)| Step::Complete { pick, ok }),
    ]
}

proptest! {
    #[test]
    fn test_low_confidence_is_derived(flags in proptest::collection::vec(any::<bool>(), 0..12)) {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_text("query", &FilterSelection::all()).unwrap();
        let results = flags
            .iter()
            .enumerate()
            .map(|(i, flag)| result(i64::try_from(i).unwrap(), *flag))
            .collect();
        prop_assert!(session.apply(ticket.seq, Ok(results)));
        prop_assert_eq!(session.has_low_confidence(), flags.iter().any(|flag| *flag));
    }

    #[test]
    fn test_loading_brackets_latest_request(steps in proptest::collection::vec(step(), 1..40)) {
        let mut session = SearchSession::new(10);
        let filters = FilterSelection::all();
        let mut outstanding: Vec<u64> = Vec::new();
        let mut latest: Option<u64> = None;
        let mut latest_done = true;

        for step in steps {
            match step {
                Step::Submit(text) => {
                    let before = session.is_loading();
                    match session.submit_text(&text, &filters) {
                        Some(ticket) => {
                            prop_assert!(!text.trim().is_empty());
                            prop_assert_eq!(ticket.request.top_n, 10);
                            prop_assert_eq!(&ticket.request.query, &text);
                            outstanding.push(ticket.seq);
                            latest = Some(ticket.seq);
                            latest_done = false;
                        }
                        None => {
                            prop_assert!(text.trim().is_empty());
                            prop_assert_eq!(session.is_loading(), before);
                        }
                    }
                }
                Step::Complete { pick, ok } => {
                    if outstanding.is_empty() {
                        continue;
                    }
                    let seq = outstanding.remove(pick % outstanding.len());
                    let outcome = if ok {
                        Ok(vec![result(1, false)])
                    } else {
                        Err(IrError::Unreachable("down".to_string()))
                    };
                    let applied = session.apply(seq, outcome);
                    prop_assert_eq!(applied, Some(seq) == latest);
                    if applied {
                        latest_done = true;
                        if ok {
                            prop_assert!(session.error().is_none());
                        } else {
                            prop_assert_eq!(session.error(), Some(SEARCH_FAILED_MESSAGE));
                        }
                    }
                }
            }

            prop_assert_eq!(session.is_loading(), !latest_done);
            prop_assert!(session.error().is_none() || session.results().is_empty());
        }
    }
}
