// src/crud.rs
// CRUD/query facade over the bound collection

use bson::Document;
use mongodb::options::{AggregateOptions, FindOneOptions, FindOptions};

use crate::client::Client;
use crate::error::{Result, StoreError};

/// Lazy, forward-only cursor over query or aggregation results. Finite per
/// invocation; the caller drains or drops it.
pub type DocumentCursor = mongodb::sync::Cursor<Document>;

impl Client {
    /// Fetch the first document matching `filter`, per the store's default
    /// ordering. Zero matches is [`StoreError::NotFound`].
    pub fn get(&self, filter: Document) -> Result<Document> {
        let options = FindOneOptions::builder()
            .max_time(self.config().op_timeout)
            .build();

        self.collection()
            .find_one(filter)
            .with_options(options)
            .run()
            .map_err(StoreError::Query)?
            .ok_or(StoreError::NotFound)
    }

    /// Insert one document. Constraint violations (e.g. a unique index)
    /// surface as [`StoreError::Write`].
    pub fn create(&self, document: Document) -> Result<()> {
        self.collection()
            .insert_one(document)
            .run()
            .map(drop)
            .map_err(StoreError::Write)
    }

    /// Replace the first document matching `filter` wholesale. Zero matches
    /// is [`StoreError::NotFound`], distinguishing a no-op from a failure.
    pub fn update(&self, filter: Document, replacement: Document) -> Result<()> {
        let result = self
            .collection()
            .replace_one(filter, replacement)
            .run()
            .map_err(StoreError::Write)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Apply an update-operator patch (`$set`, `$inc`, ...) to the first
    /// document matching `filter`. Same contract as [`update`](Client::update).
    pub fn update_partial(&self, filter: Document, patch: Document) -> Result<()> {
        let result = self
            .collection()
            .update_one(filter, patch)
            .run()
            .map_err(StoreError::Write)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Page through documents matching `filter` in store-defined order.
    ///
    /// `limit = 0` is passed through to the driver and means "no limit"
    /// (the store's convention), not "return nothing".
    pub fn list(&self, filter: Document, skip: u64, limit: i64) -> Result<DocumentCursor> {
        let options = FindOptions::builder()
            .skip(skip)
            .limit(limit)
            .max_time(self.config().op_timeout)
            .build();

        self.collection()
            .find(filter)
            .with_options(options)
            .run()
            .map_err(StoreError::Query)
    }

    /// Run an aggregation pipeline against the collection.
    pub fn aggregate(&self, pipeline: impl IntoIterator<Item = Document>) -> Result<DocumentCursor> {
        let options = AggregateOptions::builder()
            .max_time(self.config().op_timeout)
            .build();

        self.collection()
            .aggregate(pipeline)
            .with_options(options)
            .run()
            .map_err(StoreError::Query)
    }
}
