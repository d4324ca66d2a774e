//! Integration tests for the cifra engine
//!
//! Exercises the full flow: catalog CSV in, setlist editing, chord text from
//! a store, transposed page rendering, and record persistence round trips.

use cifra::{
    render_page, rows_from_csv, rows_to_csv, setlist_from_rows, setlist_to_rows, Catalog,
    ChordStore, CifraError, Cursor, Direction, Item, Key, MemoryStore, Setlist,
};

const CATALOG_CSV: &str = "\
Título,Artista,Tom_Original,BPM,Cifra
Aquarela,Toquinho,C,98,cifras/aquarela.txt
Wave,Tom Jobim,D,120,cifras/wave.txt
Mas Que Nada,Jorge Ben,Bb,104,cifras/masquenada.txt
";

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .write("cifras/aquarela.txt", "|C   G\n You  and I\n")
        .unwrap();
    store
        .write("cifras/wave.txt", "Intro\n|D7M   G7\n Vou te contar\n")
        .unwrap();
    store
        .write("cifras/masquenada.txt", "|Bbm7  Eb\n O ariá raiô\n")
        .unwrap();
    store
}

fn build_setlist(catalog: &Catalog) -> Setlist {
    let mut setlist = Setlist::new("Show de sábado");
    setlist.add_music_from_catalog(0, catalog.find("Aquarela").unwrap());
    setlist.add_pause(0, "Troca de violão");
    setlist.add_block("Bloco 2");
    setlist.add_music_from_catalog(1, catalog.find("Wave").unwrap());
    setlist
}

#[test]
fn test_full_performance_flow() {
    let catalog = Catalog::parse_csv(CATALOG_CSV).unwrap();
    let store = seeded_store();
    let mut setlist = build_setlist(&catalog);

    // the band decides to play Aquarela a whole step up
    setlist.retune(0, 0, Key::parse("D"));

    let first = render_page(&setlist, Cursor::new(0, 0), &store).unwrap();
    assert!(first.contains("Tom: D"));
    assert!(first.contains("D   A\nYou  and I\n"));
    assert!(first.ends_with("Próxima: PAUSA – Troca de violão\n"));

    let pause = render_page(&setlist, Cursor::new(0, 1), &store).unwrap();
    assert!(pause.contains("PAUSA"));
    assert!(pause.ends_with("Fim do bloco\n"));

    let last = render_page(&setlist, Cursor::new(1, 0), &store).unwrap();
    // Wave stays in its original key: body is untransposed
    assert!(last.contains("D7M   G7\nVou te contar\n"));
    assert!(last.contains("Intro\n"));
    assert!(last.ends_with("Fim do show\n"));
}

#[test]
fn test_flat_spelled_song_keeps_flat_spelling() {
    let catalog = Catalog::parse_csv(CATALOG_CSV).unwrap();
    let store = seeded_store();
    let mut setlist = Setlist::new("Ensaio");
    setlist.add_music_from_catalog(0, catalog.find("Mas Que Nada").unwrap());
    setlist.retune(0, 0, Key::parse("C"));

    let page = render_page(&setlist, Cursor::new(0, 0), &store).unwrap();
    // Bb up a whole step is spelled C, Eb becomes F; the m7 quality rides along
    assert!(page.contains("Cm7  F\nO ariá raiô\n"));
}

#[test]
fn test_editing_reorders_pages() {
    let catalog = Catalog::parse_csv(CATALOG_CSV).unwrap();
    let store = seeded_store();
    let mut setlist = build_setlist(&catalog);

    setlist.move_item(0, 0, Direction::Down);
    let first = render_page(&setlist, Cursor::new(0, 0), &store).unwrap();
    assert!(first.starts_with("Troca de violão\n"));
    assert!(first.contains("Próxima: Aquarela (C)"));
}

#[test]
fn test_records_round_trip_preserves_the_set() {
    let catalog = Catalog::parse_csv(CATALOG_CSV).unwrap();
    let mut setlist = build_setlist(&catalog);
    setlist.retune(0, 0, Key::parse("Eb"));

    let text = rows_to_csv(&setlist_to_rows(&setlist));
    let rebuilt = setlist_from_rows("Show de sábado", &rows_from_csv(&text).unwrap());

    assert_eq!(rebuilt.blocks.len(), 2);
    assert_eq!(rebuilt.blocks[0].items.len(), 2);
    match &rebuilt.blocks[0].items[0] {
        Item::Music(music) => {
            assert_eq!(music.title, "Aquarela");
            assert_eq!(music.current_key.to_string(), "Eb");
            assert_eq!(music.chord_ref.as_deref(), Some("cifras/aquarela.txt"));
        }
        Item::Pause(_) => panic!("expected a music item"),
    }
    match &rebuilt.blocks[0].items[1] {
        Item::Pause(pause) => assert_eq!(pause.label, "Troca de violão"),
        Item::Music(_) => panic!("expected a pause"),
    }
}

#[test]
fn test_storage_outage_is_a_distinct_error_state() {
    let catalog = Catalog::parse_csv(CATALOG_CSV).unwrap();
    let setlist = build_setlist(&catalog);
    let empty_store = MemoryStore::new();

    match render_page(&setlist, Cursor::new(0, 0), &empty_store) {
        Err(CifraError::Storage { reference, .. }) => {
            assert_eq!(reference, "cifras/aquarela.txt");
        }
        other => panic!("expected a storage error, got {:?}", other),
    }
}

#[test]
fn test_transpose_sheet_auto_uses_frontmatter_key() {
    let raw = "---\ntitle: Aquarela\ntom: C\n---\n|C   G\n You  and I\n";
    let display = cifra::transpose_sheet_auto(raw, "D").unwrap();
    assert_eq!(display, "D   A\nYou  and I\n");

    // without frontmatter the sheet passes through untransposed
    let display = cifra::transpose_sheet_auto("|C   G\n", "D").unwrap();
    assert_eq!(display, "C   G\n");
}

#[test]
fn test_simplified_chord_variant_is_honored() {
    let mut store = MemoryStore::new();
    store.write("cifras/full.txt", "|Cmaj7  G13\n").unwrap();
    store.write("cifras/simple.txt", "|C  G\n").unwrap();

    let mut setlist = Setlist::new("Ensaio");
    setlist.add_music_from_catalog(
        0,
        &cifra::CatalogSong {
            title: "Alguma".to_string(),
            artist: String::new(),
            tom: Key::parse("C"),
            bpm: None,
            chord_ref: Some("cifras/full.txt".to_string()),
            simplified_chord_ref: Some("cifras/simple.txt".to_string()),
        },
    );

    let page = render_page(&setlist, Cursor::new(0, 0), &store).unwrap();
    assert!(page.contains("Cmaj7  G13\n"));

    if let Item::Music(music) = &mut setlist.blocks[0].items[0] {
        music.use_simplified = true;
    }
    let page = render_page(&setlist, Cursor::new(0, 0), &store).unwrap();
    assert!(page.contains("C  G\n"));
    assert!(!page.contains("Cmaj7"));
}
