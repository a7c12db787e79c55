use versemem_core::{
    LibraryService, MemoryKeyValueStore, PracticeService, PracticeStep, ProgressStore, ReviewDeck,
};

#[test]
fn current_card_carries_progress_snapshot() {
    let kv = MemoryKeyValueStore::new();
    let library = LibraryService::new(&kv);
    let practice = PracticeService::new(&kv);
    let first = library.add_manual("James 1:2-3", "My brethren", None).unwrap();
    let second = library.add_manual("Galatians 2:20", "I am crucified", None).unwrap();
    practice.open_session(&second.id).unwrap();
    practice.add_note(&second.id, "say it slowly").unwrap();

    let mut deck = ReviewDeck::new(library.list());
    let store = ProgressStore::new(&kv);

    let card = deck.current_card(&store).unwrap();
    assert_eq!(card.verse, first);
    assert!(card.progress.is_none());
    assert_eq!((card.position, card.total), (1, 2));

    deck.next();
    let card = deck.current_card(&store).unwrap();
    assert_eq!(card.verse.id, second.id);
    let progress = card.progress.unwrap();
    assert_eq!(progress.current_step, PracticeStep::Reading);
    assert_eq!(progress.notes, vec!["say it slowly".to_string()]);
}

#[test]
fn jump_to_ignores_out_of_range_positions() {
    let kv = MemoryKeyValueStore::new();
    let library = LibraryService::new(&kv);
    library.add_manual("Romans 3:23", "For all have sinned", None).unwrap();
    library.add_manual("Hebrews 11:1", "Now faith is", None).unwrap();

    let mut deck = ReviewDeck::new(library.list());
    deck.jump_to(1);
    assert_eq!(deck.index(), 1);
    deck.jump_to(5);
    assert_eq!(deck.index(), 1);
}
