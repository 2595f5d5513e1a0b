use banktabs_core::MemoryBlobStore;
use banktabs_domain::commands::*;
use banktabs_domain::snapshot::load_store;
use banktabs_domain::*;

fn options(hide_from_all: bool, gray_out: bool) -> FilterOptions {
    FilterOptions {
        hide_from_all,
        gray_out,
    }
}

fn run(store: &mut GroupStore, selected: &mut String, command: &dyn Command) -> CommandOutcome {
    let mut ctx = CommandContext::new(store, selected);
    command.execute(&mut ctx).unwrap()
}

#[test]
fn test_scenario_a_all_hides_item_claimed_by_food() {
    let (store, _) = load_store(Some(r#"{"All": ["*"], "Food": ["bread", "512"]}"#));
    let slots = vec![Some(BankItem::new(512, "Apple"))];

    let in_all = compute_visibility("All", &store, &slots, options(true, false));
    assert_eq!(in_all, vec![SlotDecision::Hide]);

    let in_food = compute_visibility("Food", &store, &slots, options(true, false));
    assert_eq!(in_food, vec![SlotDecision::Show]);
}

#[test]
fn test_scenario_b_empty_slot_never_matches() {
    let (store, _) = load_store(Some(r#"{"All": ["*"], "Food": ["bread"]}"#));
    let mut slots: Vec<BankSlot> = vec![
        Some(BankItem::new(1, "Bread")),
        Some(BankItem::new(2, "Logs")),
        Some(BankItem::new(3, "Ore")),
    ];
    slots.push(None);

    for selected in ["All", "Food", "Ghost"] {
        for hide_from_all in [false, true] {
            let hidden = compute_visibility(selected, &store, &slots, options(hide_from_all, false));
            assert_eq!(hidden[3], SlotDecision::Hide);

            let grayed = compute_visibility(selected, &store, &slots, options(hide_from_all, true));
            assert_eq!(grayed[3], SlotDecision::GrayOut);
        }
    }
}

#[test]
fn test_scenario_c_exclusive_assign_moves_from_junk_to_food() {
    let (mut store, _) = load_store(Some(r#"{"All": ["*"], "Food": ["bread"], "Junk": ["512", "Logs"]}"#));
    let mut selected = "All".to_string();
    let item = BankItem::new(512, "Apple");

    let outcome = run(&mut store, &mut selected, &AssignItem::new("Food", item, true));
    assert!(outcome.is_applied());

    assert_eq!(
        store.tokens("Junk").unwrap(),
        [MatchToken::ByName("Logs".to_string())]
    );
    assert_eq!(
        store.tokens("Food").unwrap(),
        [MatchToken::ByName("bread".to_string()), MatchToken::ById(512)]
    );
}

#[test]
fn test_scenario_d_malformed_blob_falls_back_to_default() {
    let session = TabSession::open(
        MemoryBlobStore::with_blob("{\"Food\": [\"bread\""),
        SessionSettings::default(),
    );
    assert_eq!(session.store().ordering(), ["All"]);
    assert_eq!(session.store().tokens("All").unwrap(), [MatchToken::Wildcard]);
    assert_eq!(session.selected_group(), "All");
}

#[test]
fn test_add_then_remove_restores_store() {
    let (mut store, _) = load_store(Some(r#"{"All": ["*"], "Food": ["bread"]}"#));
    let mut selected = "All".to_string();
    let before = store.clone();

    assert!(run(&mut store, &mut selected, &AddGroup::new("Ores")).is_applied());
    assert_ne!(store, before);
    assert!(run(&mut store, &mut selected, &RemoveGroup::new("Ores")).is_applied());
    assert_eq!(store, before);
}

#[test]
fn test_ordering_stays_a_permutation_of_groups() {
    let mut store = GroupStore::new();
    let mut selected = "All".to_string();
    let item = BankItem::new(44, "Feather");

    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AddGroup::new("Food")),
        Box::new(AddGroup::new("Ores")),
        Box::new(ReorderGroup::new("Ores", Direction::Left)),
        Box::new(ReorderGroup::new("All", Direction::Right)),
        Box::new(AddGroup::new("Junk")),
        Box::new(SelectGroup::new("Junk")),
        Box::new(AssignItem::new("Junk", item.clone(), false)),
        Box::new(ToggleGroup::new("Food")),
        Box::new(RemoveGroup::new("All")),
        Box::new(ReorderGroup::new("Junk", Direction::Right)),
        Box::new(AssignItem::new("Ores", item, true)),
        Box::new(RemoveGroup::new("Junk")),
        Box::new(AddGroup::new("")),
    ];

    for command in &commands {
        run(&mut store, &mut selected, command.as_ref());
        assert!(store.is_consistent(), "after {}", command.description());
        assert!(store.contains(&selected));
    }

    assert_eq!(store.ordering(), ["Ores", "All"]);
    assert_eq!(selected, "All");
}

#[test]
fn test_reorder_is_adjacent_transposition() {
    let mut store = GroupStore::new();
    let mut selected = "All".to_string();
    for name in ["A", "B", "C"] {
        run(&mut store, &mut selected, &AddGroup::new(name));
    }

    run(&mut store, &mut selected, &ReorderGroup::new("B", Direction::Right));
    assert_eq!(store.ordering(), ["All", "A", "C", "B"]);

    run(&mut store, &mut selected, &ReorderGroup::new("A", Direction::Left));
    assert_eq!(store.ordering(), ["A", "All", "C", "B"]);

    let outcome = run(&mut store, &mut selected, &ReorderGroup::new("A", Direction::Left));
    assert!(!outcome.is_applied());
    assert_eq!(store.ordering(), ["A", "All", "C", "B"]);
}

#[test]
fn test_compute_visibility_is_idempotent() {
    let (store, _) = load_store(Some(r#"{"All": ["*"], "Food": ["bread", "512"], "Ores": ["Iron ore"]}"#));
    let slots = vec![
        Some(BankItem::new(512, "Apple")),
        None,
        Some(BankItem::new(9, "Iron Ore")),
        Some(BankItem::new(10, "Feather")),
    ];

    for selected in ["All", "Food", "Ores"] {
        let first = compute_visibility(selected, &store, &slots, options(true, true));
        let second = compute_visibility(selected, &store, &slots, options(true, true));
        assert_eq!(first, second);
    }
}

#[test]
fn test_match_property_over_token_lists() {
    let items = [
        BankItem::new(512, "Apple"),
        BankItem::new(7, " Bread "),
        BankItem::new(8, "512"),
    ];
    let lists: Vec<Vec<MatchToken>> = vec![
        vec![],
        vec!["*".into()],
        vec!["512".into()],
        vec!["BREAD".into()],
        vec!["apple ".into(), "7".into()],
        vec!["0512".into()],
    ];

    for tokens in &lists {
        for item in &items {
            let raw: Vec<String> = tokens.iter().map(|t| t.to_string().trim().to_lowercase()).collect();
            let expected = raw.iter().any(|t| t == "*")
                || raw.contains(&item.id.to_string())
                || raw.contains(&item.display_name.trim().to_lowercase());
            assert_eq!(matches(tokens, item), expected, "{:?} vs {:?}", tokens, item);
        }
    }
}
