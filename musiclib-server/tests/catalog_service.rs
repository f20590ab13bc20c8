//! Catalog service behaviour over in-memory fakes

mod common;

use std::sync::Arc;
use std::time::Duration;

use musiclib_server::models::{PageError, SongDraft, SongFilter, SongId, SongPatch, ValidationError};
use musiclib_server::service::{Catalog, CatalogError, CatalogService, TracedCatalog, TracedLookup, TracedStore};

use common::{catalog, date, detail, new_song, FakeLookup, MemoryStore, Miss};

fn seeded() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.seed(new_song("Muse", "Uprising", date(2009, 9, 7), "Paranoia\nis in bloom\n\nThe PR\ntransmissions"));
    store.seed(new_song("Radiohead", "Creep", date(1992, 9, 21), "When you were here before"));
    store.seed(new_song("Muse", "Starlight", date(2006, 9, 4), "Far away\n\nThis ship"));
    store.seed(new_song("Muse", "Hysteria", date(2003, 12, 1), "It's bugging me"));
    store.seed(new_song("Blur", "Song 2", date(1997, 4, 7), "Woo-hoo"));
    store
}

fn filter() -> SongFilter {
    SongFilter::default()
}

#[tokio::test]
async fn group_filter_returns_only_that_group_in_id_order() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));

    let songs = service
        .list_songs(SongFilter {
            group: Some("Muse".into()),
            ..filter()
        })
        .await
        .unwrap();

    assert_eq!(songs.len(), 3);
    assert!(songs.iter().all(|s| s.group == "Muse"));
    assert!(songs.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn no_pagination_defaults_to_first_ten() {
    let store = Arc::new(MemoryStore::new());
    for n in 0..15 {
        store.seed(new_song("Band", &format!("Track {n}"), date(2000, 1, 1), ""));
    }
    let service = catalog(store, Arc::new(FakeLookup::new()));

    let songs = service.list_songs(filter()).await.unwrap();
    assert_eq!(songs.len(), 10);
    assert_eq!(songs[0].title, "Track 0");
}

#[tokio::test]
async fn page_and_size_select_a_window() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));

    let songs = service
        .list_songs(SongFilter {
            page: Some(2),
            page_size: Some(2),
            ..filter()
        })
        .await
        .unwrap();

    let ids: Vec<i64> = songs.iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn lone_page_applies_no_limit() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));

    let only_page = service
        .list_songs(SongFilter {
            page: Some(3),
            ..filter()
        })
        .await
        .unwrap();
    assert_eq!(only_page.len(), 5);

    let only_size = service
        .list_songs(SongFilter {
            page_size: Some(1),
            ..filter()
        })
        .await
        .unwrap();
    assert_eq!(only_size.len(), 5);
}

#[tokio::test]
async fn zero_page_is_rejected() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));

    let err = service
        .list_songs(SongFilter {
            page: Some(0),
            page_size: Some(5),
            ..filter()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::NotPositive { field: "page" })
    ));
}

#[tokio::test]
async fn date_range_and_text_filters() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));

    let nineties = service
        .list_songs(SongFilter {
            date_from: Some(date(1990, 1, 1)),
            date_to: Some(date(1999, 12, 31)),
            ..filter()
        })
        .await
        .unwrap();
    let titles: Vec<&str> = nineties.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Creep", "Song 2"]);

    let inverted = service
        .list_songs(SongFilter {
            date_from: Some(date(2000, 1, 1)),
            date_to: Some(date(1990, 1, 1)),
            ..filter()
        })
        .await
        .unwrap();
    assert!(inverted.is_empty());

    let lyric = service
        .list_songs(SongFilter {
            text: Some("ship".into()),
            ..filter()
        })
        .await
        .unwrap();
    assert_eq!(lyric.len(), 1);
    assert_eq!(lyric[0].title, "Starlight");
}

#[tokio::test]
async fn create_enriches_then_round_trips() {
    let store = Arc::new(MemoryStore::new());
    let lookup = Arc::new(FakeLookup::new().with(
        "Muse",
        "Supermassive Black Hole",
        detail(date(2006, 7, 16), "Ooh baby\n\nI just", "https://youtu.be/Xsp3_a-PMTw"),
    ));
    let service = catalog(store.clone(), lookup.clone());

    let id = service
        .create_song(SongDraft {
            group: "Muse".into(),
            title: "Supermassive Black Hole".into(),
            link: Some("client link".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let song = service.get_song(id).await.unwrap();
    assert_eq!(song.id, id);
    assert_eq!(song.group, "Muse");
    assert_eq!(song.title, "Supermassive Black Hole");
    assert_eq!(song.release_date, date(2006, 7, 16));
    assert_eq!(song.text, "Ooh baby\n\nI just");
    assert_eq!(song.link, "https://youtu.be/Xsp3_a-PMTw");
    assert_eq!(
        lookup.calls(),
        vec![("Muse".to_owned(), "Supermassive Black Hole".to_owned())]
    );
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn client_values_fill_gaps_in_metadata() {
    let lookup = FakeLookup::new().with(
        "Blur",
        "Beetlebum",
        musiclib_server::enrichment::SongDetail {
            release_date: None,
            text: Some("And when she lets me slip away".into()),
            link: None,
        },
    );
    let service = catalog(Arc::new(MemoryStore::new()), Arc::new(lookup));

    let id = service
        .create_song(SongDraft {
            group: "Blur".into(),
            title: "Beetlebum".into(),
            release_date: Some(date(1997, 1, 20)),
            ..Default::default()
        })
        .await
        .unwrap();

    let song = service.get_song(id).await.unwrap();
    assert_eq!(song.release_date, date(1997, 1, 20));
    assert_eq!(song.link, "");
}

#[tokio::test]
async fn unknown_song_is_not_created() {
    let store = Arc::new(MemoryStore::new());
    let service = catalog(store.clone(), Arc::new(FakeLookup::new()));

    let err = service
        .create_song(SongDraft {
            group: "Nobody".into(),
            title: "Nothing".into(),
            release_date: Some(date(2020, 1, 1)),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::CannotEnrich { .. }));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn unreachable_metadata_service_is_upstream_failure() {
    let store = Arc::new(MemoryStore::new());
    let service = catalog(store.clone(), Arc::new(FakeLookup::failing(Miss::Unavailable)));

    let err = service
        .create_song(SongDraft {
            group: "Muse".into(),
            title: "Uprising".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::UpstreamUnavailable(_)));
    assert!(!err.is_caller_error());
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn create_requires_release_date_from_somewhere() {
    let lookup = FakeLookup::new().with("Muse", "Uprising", Default::default());
    let service = catalog(Arc::new(MemoryStore::new()), Arc::new(lookup));

    let err = service
        .create_song(SongDraft {
            group: "Muse".into(),
            title: "Uprising".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::Missing { field: "releaseDate" })
    ));
}

#[tokio::test]
async fn blank_group_never_reaches_lookup() {
    let lookup = Arc::new(FakeLookup::new());
    let service = catalog(Arc::new(MemoryStore::new()), lookup.clone());

    let err = service
        .create_song(SongDraft {
            group: "  ".into(),
            title: "Uprising".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ValidationError::Empty { field: "group" })));
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn patch_title_only_leaves_other_fields() {
    let store = seeded();
    let service = catalog(store.clone(), Arc::new(FakeLookup::new()));
    let id = SongId::new(1).unwrap();
    let before = service.get_song(id).await.unwrap();

    service
        .update_song(
            id,
            SongPatch {
                title: Some("Uprising (Live)".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = service.get_song(id).await.unwrap();
    assert_eq!(after.title, "Uprising (Live)");
    assert_eq!(after.group, before.group);
    assert_eq!(after.release_date, before.release_date);
    assert_eq!(after.text, before.text);
    assert_eq!(after.link, before.link);
}

#[tokio::test]
async fn patch_missing_song_is_not_found_and_changes_nothing() {
    let store = seeded();
    let before = store.snapshot();
    let service = catalog(store.clone(), Arc::new(FakeLookup::new()));

    let err = service
        .update_song(
            SongId::new(99).unwrap(),
            SongPatch {
                group: Some("Nobody".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { id } if id.get() == 99));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn empty_patch_is_a_validation_error() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));

    let err = service
        .update_song(SongId::new(99).unwrap(), SongPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ValidationError::EmptyPatch)));
}

#[tokio::test]
async fn delete_removes_exactly_one_row() {
    let store = seeded();
    let service = catalog(store.clone(), Arc::new(FakeLookup::new()));
    let id = SongId::new(2).unwrap();

    service.delete_song(id).await.unwrap();

    assert_eq!(store.snapshot().len(), 4);
    assert!(matches!(
        service.get_song(id).await.unwrap_err(),
        CatalogError::NotFound { .. }
    ));
    assert!(matches!(
        service.delete_song(id).await.unwrap_err(),
        CatalogError::NotFound { .. }
    ));
}

#[tokio::test]
async fn lyrics_are_paged_by_verse() {
    let store = Arc::new(MemoryStore::new());
    let id = store.seed(new_song("Band", "Verses", date(2001, 1, 1), "a\nb\n\nc\nd\n\ne"));
    let service = catalog(store, Arc::new(FakeLookup::new()));

    let page = service.song_text(id, 1, 2).await.unwrap();
    assert_eq!(page.text, vec![vec!["a", "b"], vec!["c", "d"]]);

    let tail = service.song_text(id, 3, 5).await.unwrap();
    assert_eq!(tail.text, vec![vec!["e"]]);

    let err = service.song_text(id, 4, 1).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidParams(PageError::PageOutOfRange { page: 4, verses: 3 })
    ));
}

#[tokio::test]
async fn lyrics_of_missing_song_is_not_found() {
    let service = catalog(seeded(), Arc::new(FakeLookup::new()));
    let err = service
        .song_text(SongId::new(42).unwrap(), 1, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn slow_store_hits_deadline() {
    let store = Arc::new(MemoryStore::slow(Duration::from_secs(5)));
    let service = CatalogService::new(store, Arc::new(FakeLookup::new()))
        .with_deadline(Duration::from_millis(100));

    let err = service.list_songs(filter()).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Timeout { operation: "list songs", .. }
    ));
}

#[tokio::test]
async fn traced_layers_are_transparent() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let store = seeded();
    let service = TracedCatalog::new(CatalogService::new(
        TracedStore::new(store.clone()),
        TracedLookup::new(Arc::new(FakeLookup::new())),
    ));

    let songs = service
        .list_songs(SongFilter {
            group: Some("Radiohead".into()),
            ..filter()
        })
        .await
        .unwrap();
    assert_eq!(songs.len(), 1);

    let err = service.delete_song(SongId::new(77).unwrap()).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert_eq!(store.snapshot().len(), 5);
}
