use chrono::Utc;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{ItemForm, Section, Store, StoreError};
use migration::MigratorTrait;

async fn store_with_db() -> (Store, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let store = Store::builder().database(db.clone()).build().await.unwrap();
    (store, db)
}

/// Write-count spy: rows actually persisted in the items table.
async fn item_count(db: &DatabaseConnection) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM items".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

fn filled_form(name: &str, category: Section, amount: &str) -> ItemForm {
    let mut form = ItemForm::new();
    form.draft_mut().name = name.to_string();
    form.draft_mut().category = Some(category);
    form.draft_mut().amount = amount.to_string();
    form
}

#[tokio::test]
async fn create_submit_reads_back_exactly() {
    let (store, _db) = store_with_db().await;

    let before = Utc::now();
    let form = filled_form("Paper Towels", Section::Pantry, "3");
    let id = form.submit(&store, Utc::now()).await.unwrap();
    let after = Utc::now();

    let item = store.item(id, Section::Pantry).await.unwrap();
    assert_eq!(item.name, "Paper Towels");
    assert_eq!(item.category, Section::Pantry);
    assert_eq!(item.section, Section::Pantry);
    assert_eq!(item.amount, "3");
    assert_eq!(item.photo, None);
    assert!(!item.unavailable);
    assert!(item.last_stashed_at >= before && item.last_stashed_at <= after);
}

#[tokio::test]
async fn edit_targets_the_original_partition_even_when_category_changes() {
    let (store, _db) = store_with_db().await;

    let id = filled_form("Towels", Section::Bathroom, "4")
        .submit(&store, Utc::now())
        .await
        .unwrap();

    let item = store.item(id, Section::Bathroom).await.unwrap();
    let mut form = ItemForm::edit(&item);
    form.draft_mut().category = Some(Section::Closet);
    form.draft_mut().amount = String::from("2");
    let updated_id = form.submit(&store, Utc::now()).await.unwrap();
    assert_eq!(updated_id, id);

    // The row never moved: it still resolves under Bathroom, not Closet.
    let item = store.item(id, Section::Bathroom).await.unwrap();
    assert_eq!(item.section, Section::Bathroom);
    assert_eq!(item.category, Section::Closet);
    assert_eq!(item.amount, "2");
    assert_eq!(
        store.item(id, Section::Closet).await.unwrap_err(),
        StoreError::KeyNotFound("item not exists".to_string())
    );
}

#[tokio::test]
async fn edit_restamps_last_stashed_at() {
    let (store, _db) = store_with_db().await;

    let id = filled_form("Flour", Section::Pantry, "1")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    let first = store.item(id, Section::Pantry).await.unwrap();

    let later = first.last_stashed_at + chrono::Duration::hours(1);
    ItemForm::edit(&first).submit(&store, later).await.unwrap();

    let second = store.item(id, Section::Pantry).await.unwrap();
    assert!(second.last_stashed_at > first.last_stashed_at);
}

#[tokio::test]
async fn missing_fields_fail_validation_and_write_nothing() {
    let (store, db) = store_with_db().await;

    let no_name = filled_form("", Section::Pantry, "3");
    let mut no_category = filled_form("Paper Towels", Section::Pantry, "3");
    no_category.draft_mut().category = None;
    let no_amount = filled_form("Paper Towels", Section::Pantry, "");

    for form in [no_name, no_category, no_amount] {
        let err = form.submit(&store, Utc::now()).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
    assert_eq!(item_count(&db).await, 0);
}

#[tokio::test]
async fn collection_feed_aggregates_every_section_with_source_tags() {
    let (store, _db) = store_with_db().await;

    filled_form("Rice", Section::Pantry, "2")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    filled_form("Flour", Section::Pantry, "1")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    filled_form("Soap", Section::Bathroom, "6")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    filled_form("Hammer", Section::Tools, "1")
        .submit(&store, Utc::now())
        .await
        .unwrap();

    let mut feed = store.subscribe_all();
    let snapshot = feed.next().await.unwrap();
    assert_eq!(snapshot.len(), 4);
    for item in &snapshot {
        match item.name.as_str() {
            "Rice" | "Flour" => assert_eq!(item.section, Section::Pantry),
            "Soap" => assert_eq!(item.section, Section::Bathroom),
            "Hammer" => assert_eq!(item.section, Section::Tools),
            other => panic!("unexpected item {other}"),
        }
    }
}

#[tokio::test]
async fn unavailable_items_are_hidden_from_section_feeds_only() {
    let (store, _db) = store_with_db().await;

    let kept = filled_form("Mop", Section::CleaningSupplies, "1")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    let hidden = filled_form("Bleach", Section::CleaningSupplies, "2")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    store
        .set_unavailable(hidden, Section::CleaningSupplies, true)
        .await
        .unwrap();

    // Fresh per-section subscription excludes the toggled id.
    let mut section_feed = store.subscribe(Section::CleaningSupplies);
    let snapshot = section_feed.next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, kept);

    // A fresh collection subscription still includes it.
    let mut collection = store.subscribe_all();
    let snapshot = collection.next().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().any(|i| i.id == hidden && i.unavailable));
}

#[tokio::test]
async fn live_feed_observes_writes_after_subscribing() {
    let (store, _db) = store_with_db().await;

    let mut feed = store.subscribe(Section::Kitchen);
    assert!(feed.next().await.unwrap().is_empty());

    let id = filled_form("Dish Soap", Section::Kitchen, "1")
        .submit(&store, Utc::now())
        .await
        .unwrap();
    let snapshot = feed.next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, id);

    // The toggle arrives as a further full-replace snapshot.
    store
        .set_unavailable(id, Section::Kitchen, true)
        .await
        .unwrap();
    assert!(feed.next().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggling_a_missing_item_is_key_not_found() {
    let (store, _db) = store_with_db().await;

    let err = store
        .set_unavailable(uuid::Uuid::new_v4(), Section::Pantry, true)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::KeyNotFound("item not exists".to_string()));
}

#[tokio::test]
async fn scans_persist_and_read_back() {
    let (store, _db) = store_with_db().await;

    let id = store
        .record_scan("ean13", "4006381333931", Utc::now())
        .await
        .unwrap();

    let scans = store.scans().await.unwrap();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].id, id);
    assert_eq!(scans[0].kind, "ean13");
    assert_eq!(scans[0].data, "4006381333931");
}
