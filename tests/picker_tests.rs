//! End-to-end picker behavior: items, teams and random selection

use rand::SeedableRng;
use rand::rngs::StdRng;
use rando_picker::{InputKind, Picker, PickerConfig, PickerError};
use std::collections::HashSet;

fn texts(picker: &Picker) -> Vec<String> {
    picker.items().iter().map(|item| item.text.clone()).collect()
}

#[test]
fn test_pizza_sushi_tacos_scenario() {
    let mut picker = Picker::new(PickerConfig::default());
    assert!(picker.items().is_empty());

    picker.add_item("Pizza").unwrap();
    let sushi = picker.add_item("Sushi").unwrap().unwrap();
    picker.add_item("Tacos").unwrap();
    assert_eq!(texts(&picker), vec!["Pizza", "Sushi", "Tacos"]);

    let picked = picker.pick_random().unwrap();
    assert!(["Pizza", "Sushi", "Tacos"].contains(&picked.text.as_str()));
    assert_eq!(picker.selection(), Some(&picked));
    assert_eq!(picker.items().len(), 3);

    picker.remove_item(&sushi.id);
    assert_eq!(texts(&picker), vec!["Pizza", "Tacos"]);
}

#[test]
fn test_valid_add_grows_by_one() {
    let mut picker = Picker::new(PickerConfig::default());
    let longest = "z".repeat(50);
    for (n, raw) in ["a", "  padded  ", "with inner  spaces", longest.as_str()]
        .into_iter()
        .enumerate()
    {
        let item = picker.add_item(raw).unwrap().unwrap();
        assert_eq!(picker.items().len(), n + 1);
        assert_eq!(item.text, raw.trim());
    }
}

#[test]
fn test_rejected_adds_do_not_mutate() {
    let mut picker = Picker::new(PickerConfig::default());
    picker.add_item("Pizza").unwrap();
    let before = picker.snapshot().clone();

    assert_eq!(
        picker.add_item(""),
        Err(PickerError::EmptyInput { kind: InputKind::Item })
    );
    assert_eq!(
        picker.add_item("   "),
        Err(PickerError::EmptyInput { kind: InputKind::Item })
    );
    assert_eq!(
        picker.add_item(&"x".repeat(51)),
        Err(PickerError::InputTooLong { kind: InputKind::Item, max: 50 })
    );
    assert_eq!(picker.snapshot(), &before);
}

#[test]
fn test_configured_item_limit() {
    let mut picker = Picker::new(PickerConfig::new().max_item_length(100));
    assert!(picker.add_item(&"x".repeat(100)).is_ok());
    assert!(matches!(
        picker.add_item(&"x".repeat(101)),
        Err(PickerError::InputTooLong { max: 100, .. })
    ));
}

#[test]
fn test_remove_twice_is_noop() {
    let mut picker = Picker::new(PickerConfig::default());
    let item = picker.add_item("Pizza").unwrap().unwrap();
    picker.add_item("Sushi").unwrap();

    picker.remove_item(&item.id);
    let after_first = picker.snapshot().clone();
    picker.remove_item(&item.id);
    assert_eq!(picker.snapshot(), &after_first);
}

#[test]
fn test_repeated_picks_cover_all_items() {
    let mut picker = Picker::new(PickerConfig::default());
    for text in ["a", "b", "c", "d"] {
        picker.add_item(text).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(99);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        seen.insert(picker.pick_random_with(&mut rng).unwrap().text);
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn test_grouped_mode_flow() {
    let mut picker = Picker::new(PickerConfig::default());
    let default_team = picker.teams()[0].id.clone();
    picker.add_item("Pizza").unwrap();

    picker.add_team("Dinner").unwrap();
    let dinner = picker.snapshot().active_team_id().cloned().unwrap();
    assert!(picker.items().is_empty());
    picker.add_item("Soup").unwrap();
    picker.add_item("Salad").unwrap();

    let summaries = picker.teams();
    assert_eq!(summaries.len(), 2);
    assert_eq!((summaries[0].item_count, summaries[0].active), (1, false));
    assert_eq!((summaries[1].item_count, summaries[1].active), (2, true));

    picker.rename_team(&dinner, "Supper").unwrap();
    assert_eq!(picker.teams()[1].name, "Supper");
    assert_eq!(
        picker.rename_team(&dinner, &"s".repeat(21)),
        Err(PickerError::InputTooLong { kind: InputKind::TeamName, max: 20 })
    );
    assert_eq!(picker.teams()[1].name, "Supper");

    let before = picker.snapshot().clone();
    picker.delete_team("no-such-team").unwrap();
    assert_eq!(picker.snapshot(), &before);

    picker.pick_random().unwrap();
    picker.delete_team(&dinner).unwrap();
    assert_eq!(picker.snapshot().active_team_id(), Some(&default_team));
    assert!(picker.selection().is_none());
    assert_eq!(texts(&picker), vec!["Pizza"]);

    assert_eq!(
        picker.delete_team(&default_team),
        Err(PickerError::CannotDeleteLastTeam)
    );
    assert_eq!(picker.teams().len(), 1);
}

#[test]
fn test_team_name_limits() {
    let mut picker = Picker::new(PickerConfig::default());
    assert!(picker.add_team(&"t".repeat(20)).is_ok());
    assert_eq!(
        picker.add_team(&"t".repeat(21)),
        Err(PickerError::InputTooLong { kind: InputKind::TeamName, max: 20 })
    );
    assert_eq!(
        picker.add_team(" "),
        Err(PickerError::EmptyInput { kind: InputKind::TeamName })
    );
    assert_eq!(picker.teams().len(), 2);
}

#[test]
fn test_switching_to_unknown_team_keeps_selection() {
    let mut picker = Picker::new(PickerConfig::default());
    picker.add_item("Pizza").unwrap();
    picker.pick_random().unwrap();

    picker.switch_active_team("no-such-team");
    assert!(picker.selection().is_some());
}
