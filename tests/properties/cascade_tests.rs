use proptest::prelude::*;

use intellirank::session::{ALL, FilterCascade, FilterSelection};

fn category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(ALL.to_string()),
        Just("Technology".to_string()),
        Just("Products".to_string()),
        "[A-Za-z &]{1,12}",
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Category(String),
    Subcategory(String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        category().prop_map(Op::Category),
        "[A-Za-z]{1,10}".prop_map(Op::Subcategory),
    ]
}

proptest! {
    #[test]
    fn test_sentinel_never_sent(category in category(), subcategory in category()) {
        let selection = FilterSelection::new(&category, &subcategory);
        prop_assert_eq!(selection.category_filter().is_none(), category == ALL);
        prop_assert_eq!(selection.subcategory_filter().is_none(), subcategory == ALL);
        if let Some(sent) = selection.category_filter() {
            prop_assert_eq!(sent, category);
        }
    }

    #[test]
    fn test_category_change_resets_subcategory(ops in proptest::collection::vec(op(), 1..30)) {
        let mut cascade = FilterCascade::new();
        for op in ops {
            match op {
                Op::Category(category) => {
                    cascade.set_category(category.clone());
                    prop_assert_eq!(cascade.active_category(), category.as_str());
                    prop_assert_eq!(cascade.active_subcategory(), ALL);
                }
                Op::Subcategory(subcategory) => cascade.set_subcategory(subcategory),
            }
        }
    }

    #[test]
    fn test_only_latest_subcategory_fetch_applies(
        categories in proptest::collection::vec(category(), 1..8),
        order in any::<u64>(),
    ) {
        let mut cascade = FilterCascade::new();
        let mut tickets = Vec::new();
        for category in &categories {
            if let Some(ticket) = cascade.set_category(category.clone()) {
                tickets.push(ticket);
            }
        }

        // Resolve in a shuffled order; each fetch answers with its own category.
        let mut shuffled = tickets.clone();
        let len = shuffled.len();
        for i in 0..len {
            let j = usize::try_from((order >> (i % 64)) % (len as u64)).unwrap();
            shuffled.swap(i, j);
        }
        for ticket in &shuffled {
            cascade.apply_subcategories(ticket, Ok(vec![format!("{}-sub", ticket.category)]));
        }

        match tickets.last() {
            Some(latest) if latest.category == cascade.active_category() => {
                prop_assert_eq!(
                    cascade.subcategories().to_vec(),
                    vec![format!("{}-sub", latest.category)]
                );
            }
            _ => prop_assert!(cascade.subcategories().is_empty()),
        }
    }
}
