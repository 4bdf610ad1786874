use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use tokio::sync::watch;
use uuid::Uuid;

pub use error::StoreError;
pub use feed::{CollectionFeed, SectionFeed, search_by_name};
pub use form::{FormMode, ItemDraft, ItemForm, PhotoPicker, PhotoSource};
pub use item::Item;
pub use scans::ScannedCode;
pub use section::Section;

mod error;
mod feed;
mod form;
mod item;
mod scans;
mod section;

type ResultStore<T> = Result<T, StoreError>;

/// The item store.
///
/// Items live under per-[`Section`] partitions addressed as `(section, id)`.
/// Reads are either one-shot or live feeds; writes are create, whole-draft
/// update and the unavailable toggle. There is no delete operation anywhere;
/// removal is modeled as `unavailable = true`. Writes are last-writer-wins
/// with no version check; the database is the sole arbiter of write ordering.
///
/// Every committed write republishes the touched partition, which is what
/// drives the live feeds. A writer observes its own write through its own
/// subscription, like any other consumer.
#[derive(Debug)]
pub struct Store {
    database: DatabaseConnection,
    feeds: HashMap<Section, watch::Sender<Vec<Item>>>,
}

impl Store {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    async fn section_rows(
        database: &DatabaseConnection,
        section: Section,
    ) -> ResultStore<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::Section.eq(section.as_str()))
            .order_by_asc(item::Column::LastStashedAt)
            .all(database)
            .await?;
        models.into_iter().map(Item::try_from).collect()
    }

    async fn find_model(&self, id: Uuid, section: Section) -> ResultStore<item::Model> {
        let model = item::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| StoreError::KeyNotFound("item not exists".to_string()))?;
        if model.section != section.as_str() {
            return Err(StoreError::KeyNotFound("item not exists".to_string()));
        }
        Ok(model)
    }

    /// Re-read one partition and push the fresh snapshot to its feed.
    async fn publish(&self, section: Section) -> ResultStore<()> {
        let rows = Self::section_rows(&self.database, section).await?;
        if let Some(sender) = self.feeds.get(&section) {
            sender.send_replace(rows);
        }
        Ok(())
    }

    /// Create a new item under the partition named by `category`.
    pub async fn create_item(
        &self,
        name: &str,
        category: Section,
        amount: &str,
        photo: Option<&str>,
        at: DateTime<Utc>,
    ) -> ResultStore<Uuid> {
        let item = Item::new(
            name.to_string(),
            category,
            amount.to_string(),
            photo.map(|p| p.to_string()),
            at,
        );
        let id = item.id;
        item::ActiveModel::from(&item).insert(&self.database).await?;
        self.publish(category).await?;
        tracing::debug!(item = %id, section = %category, "item stashed");
        Ok(id)
    }

    /// Overwrite the editable fields of an existing item.
    ///
    /// The write targets the `(section, id)` address the item was created
    /// under. A changed `category` only updates the field; the row stays in
    /// its partition, since the partition is part of the storage address.
    pub async fn update_item(
        &self,
        id: Uuid,
        section: Section,
        name: &str,
        category: Section,
        amount: &str,
        photo: Option<&str>,
        at: DateTime<Utc>,
    ) -> ResultStore<()> {
        self.find_model(id, section).await?;

        let active = item::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            category: ActiveValue::Set(category.as_str().to_string()),
            amount: ActiveValue::Set(amount.to_string()),
            photo: ActiveValue::Set(photo.map(|p| p.to_string())),
            last_stashed_at: ActiveValue::Set(at),
            ..Default::default()
        };
        active.update(&self.database).await?;
        self.publish(section).await?;
        Ok(())
    }

    /// Flip the soft-delete marker of one item.
    ///
    /// There is no optimistic local update: callers observe the change
    /// through the next feed snapshot.
    pub async fn set_unavailable(
        &self,
        id: Uuid,
        section: Section,
        unavailable: bool,
    ) -> ResultStore<()> {
        self.find_model(id, section).await?;

        let active = item::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            unavailable: ActiveValue::Set(unavailable),
            ..Default::default()
        };
        active.update(&self.database).await?;
        self.publish(section).await?;
        Ok(())
    }

    /// One-shot read of a single item, used to hydrate the edit form.
    pub async fn item(&self, id: Uuid, section: Section) -> ResultStore<Item> {
        let model = self.find_model(id, section).await?;
        Item::try_from(model)
    }

    /// One-shot read of a partition's available items.
    pub async fn list_section(&self, section: Section) -> ResultStore<Vec<Item>> {
        let rows = Self::section_rows(&self.database, section).await?;
        Ok(rows.into_iter().filter(|item| !item.unavailable).collect())
    }

    /// One-shot read of every partition, unavailable items included.
    pub async fn list_collection(&self) -> ResultStore<Vec<Item>> {
        let mut items = Vec::new();
        for section in Section::ALL {
            items.extend(Self::section_rows(&self.database, section).await?);
        }
        Ok(items)
    }

    /// Open a live feed over one partition.
    pub fn subscribe(&self, section: Section) -> SectionFeed {
        // The feed map is built from `Section::ALL`, so every key exists.
        SectionFeed::new(section, self.feeds[&section].subscribe())
    }

    /// Open the aggregated all-sections feed used by the Collection view.
    pub fn subscribe_all(&self) -> CollectionFeed {
        CollectionFeed::new(&self.feeds)
    }

    /// Append a scanned barcode to the log.
    pub async fn record_scan(
        &self,
        kind: &str,
        data: &str,
        at: DateTime<Utc>,
    ) -> ResultStore<Uuid> {
        let scan = ScannedCode::new(kind.to_string(), data.to_string(), at);
        let id = scan.id;
        scans::ActiveModel::from(&scan).insert(&self.database).await?;
        Ok(id)
    }

    /// All scanned barcodes, oldest first.
    pub async fn scans(&self) -> ResultStore<Vec<ScannedCode>> {
        let models = scans::Entity::find()
            .order_by_asc(scans::Column::ScannedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(ScannedCode::try_from).collect()
    }
}

/// The builder for `Store`
#[derive(Default)]
pub struct StoreBuilder {
    database: DatabaseConnection,
}

impl StoreBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> StoreBuilder {
        self.database = db;
        self
    }

    /// Construct `Store`, priming every section feed with its current rows.
    pub async fn build(self) -> ResultStore<Store> {
        let mut feeds = HashMap::new();
        for section in Section::ALL {
            let rows = Store::section_rows(&self.database, section).await?;
            let (sender, _) = watch::channel(rows);
            feeds.insert(section, sender);
        }

        Ok(Store {
            database: self.database,
            feeds,
        })
    }
}
