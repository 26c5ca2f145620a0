// src/index.rs
// Index administration: secondary index descriptors and the TTL index

use std::time::Duration;

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use tracing::debug;

use crate::client::Client;
use crate::error::{Result, StoreError};

/// Name of the expiry index managed by [`Client::set_ttl`].
pub const TTL_INDEX_NAME: &str = "TTL";

/// Timestamp field the TTL index keys on. Documents that should expire must
/// carry it with a BSON datetime value.
pub const CREATED_AT_FIELD: &str = "created_at";

/// One key of a secondary index: a field name and its sort direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKey {
    pub field: String,
    pub descending: bool,
}

impl IndexKey {
    pub fn asc(field: impl Into<String>) -> Self {
        IndexKey {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        IndexKey {
            field: field.into(),
            descending: true,
        }
    }
}

/// Declaration of a secondary index on the collection.
#[derive(Debug, Clone, Default)]
pub struct IndexSpec {
    pub keys: Vec<IndexKey>,
    /// Explicit index name; the server derives one from the keys when absent.
    pub name: Option<String>,
    pub unique: bool,
    pub sparse: bool,
}

impl IndexSpec {
    pub fn new(keys: Vec<IndexKey>) -> Self {
        IndexSpec {
            keys,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    /// Render the driver model: keys in declaration order with 1/-1
    /// directions, flags always set explicitly.
    fn model(&self) -> IndexModel {
        let mut keys = Document::new();
        for key in &self.keys {
            keys.insert(key.field.as_str(), if key.descending { -1 } else { 1 });
        }

        let options = IndexOptions::builder()
            .unique(self.unique)
            .sparse(self.sparse)
            .name(self.name.clone())
            .build();

        IndexModel::builder().keys(keys).options(options).build()
    }
}

fn ttl_model(expire_after: Duration) -> IndexModel {
    let options = IndexOptions::builder()
        .name(TTL_INDEX_NAME.to_string())
        .expire_after(expire_after)
        .build();

    IndexModel::builder()
        .keys(doc! { CREATED_AT_FIELD: 1 })
        .options(options)
        .build()
}

impl Client {
    /// (Re)create the expiry index using the TTL configured at construction.
    ///
    /// Any existing index named "TTL" is dropped first; a failed drop is
    /// tolerated because absence is an acceptable precondition. Calling this
    /// twice leaves exactly one TTL index.
    pub fn set_ttl(&self) -> Result<()> {
        let collection = self.collection();

        if let Err(e) = collection.drop_index(TTL_INDEX_NAME).run() {
            debug!(error = %e, "drop of previous TTL index failed, continuing");
        }

        collection
            .create_index(ttl_model(self.config().ttl))
            .run()
            .map(drop)
            .map_err(StoreError::Index)
    }

    /// Create the given indices in one batch call.
    ///
    /// The first rejected model aborts the whole batch; there is no
    /// partial-success reporting beyond what the server already applied.
    pub fn ensure_indices(&self, specs: &[IndexSpec]) -> Result<()> {
        if specs.is_empty() {
            return Ok(());
        }

        let models: Vec<IndexModel> = specs.iter().map(IndexSpec::model).collect();
        self.collection()
            .create_indexes(models)
            .run()
            .map(drop)
            .map_err(StoreError::Index)
    }

    /// Drop every index on the collection except the default `_id` index.
    pub fn drop_indices(&self) -> Result<()> {
        self.collection()
            .drop_indexes()
            .run()
            .map_err(StoreError::Index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;

    #[test]
    fn test_model_key_order_and_direction() {
        let spec = IndexSpec::new(vec![IndexKey::asc("queue"), IndexKey::desc("priority")]);
        let model = spec.model();

        let fields: Vec<&str> = model.keys.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(fields, vec!["queue", "priority"]);
        assert_eq!(model.keys.get("queue"), Some(&Bson::Int32(1)));
        assert_eq!(model.keys.get("priority"), Some(&Bson::Int32(-1)));
    }

    #[test]
    fn test_model_flags_always_set() {
        let spec = IndexSpec::new(vec![IndexKey::asc("ref")])
            .with_unique(true)
            .with_sparse(true);
        let options = spec.model().options.unwrap();

        assert_eq!(options.unique, Some(true));
        assert_eq!(options.sparse, Some(true));
        assert_eq!(options.name, None);

        let plain = IndexSpec::new(vec![IndexKey::asc("ref")]);
        let options = plain.model().options.unwrap();
        assert_eq!(options.unique, Some(false));
        assert_eq!(options.sparse, Some(false));
    }

    #[test]
    fn test_model_explicit_name() {
        let spec = IndexSpec::new(vec![IndexKey::asc("queue")]).with_name("by_queue");
        let options = spec.model().options.unwrap();
        assert_eq!(options.name.as_deref(), Some("by_queue"));
    }

    #[test]
    fn test_ttl_model() {
        let model = ttl_model(Duration::from_secs(3600));

        assert_eq!(model.keys.get(CREATED_AT_FIELD), Some(&Bson::Int32(1)));
        let options = model.options.unwrap();
        assert_eq!(options.name.as_deref(), Some(TTL_INDEX_NAME));
        assert_eq!(options.expire_after, Some(Duration::from_secs(3600)));
        assert_eq!(options.unique, None);
    }
}
