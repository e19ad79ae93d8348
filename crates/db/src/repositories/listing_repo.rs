//! Repository mapping car listings onto document store collections.
//!
//! The listing document (collection `listings`) carries status, owner and
//! basic info. Every other wizard step has its own collection holding
//! `{ "listing_id": ..., "data": { ... } }`, at most one per listing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use motorlist_core::listing::{DraftListing, ListingOwner};
use motorlist_core::listing_status::ListingStatus;
use motorlist_core::listing_wizard::{WizardStep, LISTINGS_COLLECTION};
use motorlist_core::search::{filter_key, search_key};
use motorlist_core::step_input::{BasicInfo, StepInput};
use motorlist_core::types::Timestamp;

use crate::store::{Document, DocumentStore, Filter, StoreError};

/// Field on sub-record documents pointing back at the listing.
pub const LISTING_ID_FIELD: &str = "listing_id";

/// The listing document's `data` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListingHeader {
    status: ListingStatus,
    dealer_id: String,
    business_profile_id: String,
    basic_info: BasicInfo,
    #[serde(default)]
    submitted_at: Option<Timestamp>,
    /// Lowercased make/model, kept in step with `basic_info` for browse filters.
    #[serde(default)]
    make_key: String,
    #[serde(default)]
    model_key: String,
}

impl ListingHeader {
    fn refresh_search_keys(&mut self) {
        self.make_key = search_key(&self.basic_info.make);
        self.model_key = search_key(&self.basic_info.model);
    }
}

/// Browse filters for published listings. Limit and offset are already clamped.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub make: Option<String>,
    pub model: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Provides listing persistence over any [`DocumentStore`].
pub struct ListingRepo;

impl ListingRepo {
    /// Create a new listing in `draft` status from step-1 input.
    pub async fn create_draft(
        store: &dyn DocumentStore,
        owner: &ListingOwner,
        basic_info: &BasicInfo,
    ) -> Result<DraftListing, StoreError> {
        let mut header = ListingHeader {
            status: ListingStatus::Draft,
            dealer_id: owner.dealer_id.clone(),
            business_profile_id: owner.business_profile_id.clone(),
            basic_info: basic_info.clone(),
            submitted_at: None,
            make_key: String::new(),
            model_key: String::new(),
        };
        header.refresh_search_keys();
        let doc = store
            .create(LISTINGS_COLLECTION, serde_json::to_value(&header)?)
            .await?;
        Ok(assemble(&doc, header))
    }

    /// Fetch a listing with all of its sub-records. Missing steps are `None`.
    pub async fn fetch(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<DraftListing>, StoreError> {
        let Some(doc) = store.get(LISTINGS_COLLECTION, id).await? else {
            return Ok(None);
        };
        let Some(header) = read_header(&doc) else {
            return Ok(None);
        };
        let mut listing = assemble(&doc, header);

        for step in WizardStep::sub_record_steps() {
            let Some(sub) = Self::find_sub_record(store, step, id).await? else {
                continue;
            };
            let data = sub.data.get("data").cloned().unwrap_or(Value::Null);
            match attach(&mut listing, step, data) {
                Ok(()) => listing.updated_at = listing.updated_at.max(sub.updated_at),
                Err(e) => {
                    tracing::warn!(
                        listing_id = %id,
                        step = %step,
                        error = %e,
                        "Ignoring sub-record that no longer matches its schema"
                    );
                }
            }
        }
        Ok(Some(listing))
    }

    /// Write one step's sub-record: overwrite it when present, create it otherwise.
    ///
    /// Basic info is written onto the listing document itself. Returns `false`
    /// when the listing does not exist.
    pub async fn write_sub_record(
        store: &dyn DocumentStore,
        listing_id: &str,
        input: &StepInput,
    ) -> Result<bool, StoreError> {
        let step = input.step();
        if let StepInput::BasicInfo(basic_info) = input {
            return Self::update_header(store, listing_id, |h| {
                h.basic_info = basic_info.clone();
            })
            .await;
        }

        let body = json!({ LISTING_ID_FIELD: listing_id, "data": input.data() });
        if let Some(existing) = Self::find_sub_record(store, step, listing_id).await? {
            if store
                .update(step.collection(), &existing.id, body.clone())
                .await?
                .is_some()
            {
                return Ok(true);
            }
            // Removed between the lookup and the write.
            tracing::debug!(listing_id = %listing_id, step = %step, "Sub-record vanished, recreating");
        }
        store.create(step.collection(), body).await?;
        Ok(true)
    }

    /// Persist a new status, optionally stamping `submitted_at`. Returns
    /// `false` when the listing does not exist.
    pub async fn set_status(
        store: &dyn DocumentStore,
        listing_id: &str,
        status: ListingStatus,
        submitted_at: Option<Timestamp>,
    ) -> Result<bool, StoreError> {
        Self::update_header(store, listing_id, |h| {
            h.status = status;
            if submitted_at.is_some() {
                h.submitted_at = submitted_at;
            }
        })
        .await
    }

    /// Published listings matching the make/model filters, newest first.
    ///
    /// Status and make/model are matched by the store. The store contract has
    /// no ordering or paging, so ordering by submission time and the page cut
    /// happen here over the matching listing documents; only the page itself
    /// is loaded with sub-records.
    pub async fn search_published(
        store: &dyn DocumentStore,
        params: &SearchParams,
    ) -> Result<Vec<DraftListing>, StoreError> {
        let mut filters = vec![Filter::eq("status", ListingStatus::Published.as_str())];
        if let Some(key) = filter_key(params.make.as_deref()) {
            filters.push(Filter::eq("make_key", key));
        }
        if let Some(key) = filter_key(params.model.as_deref()) {
            filters.push(Filter::eq("model_key", key));
        }
        let docs = store.query(LISTINGS_COLLECTION, &filters).await?;

        // `docs` is oldest first; the index breaks timestamp ties.
        let mut matching: Vec<(usize, Document, ListingHeader)> = docs
            .into_iter()
            .enumerate()
            .filter_map(|(i, doc)| read_header(&doc).map(|h| (i, doc, h)))
            .collect();
        matching.sort_by_key(|(i, doc, h)| {
            std::cmp::Reverse((h.submitted_at.unwrap_or(doc.created_at), *i))
        });

        let page = matching
            .into_iter()
            .skip(params.offset.max(0) as usize)
            .take(params.limit.max(0) as usize);

        let mut listings = Vec::new();
        for (_, doc, _) in page {
            if let Some(listing) = Self::fetch(store, &doc.id).await? {
                listings.push(listing);
            }
        }
        Ok(listings)
    }

    /// Every listing of a business profile, newest first.
    pub async fn list_by_profile(
        store: &dyn DocumentStore,
        business_profile_id: &str,
    ) -> Result<Vec<DraftListing>, StoreError> {
        let docs = store
            .query(
                LISTINGS_COLLECTION,
                &[Filter::eq("business_profile_id", business_profile_id)],
            )
            .await?;

        let mut listings = Vec::with_capacity(docs.len());
        for doc in docs.iter().rev() {
            if let Some(listing) = Self::fetch(store, &doc.id).await? {
                listings.push(listing);
            }
        }
        Ok(listings)
    }

    async fn find_sub_record(
        store: &dyn DocumentStore,
        step: WizardStep,
        listing_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let mut docs = store
            .query(step.collection(), &[Filter::eq(LISTING_ID_FIELD, listing_id)])
            .await?;
        // Oldest first; one document per listing is expected, keep the latest if not.
        Ok(docs.pop())
    }

    async fn update_header(
        store: &dyn DocumentStore,
        listing_id: &str,
        change: impl FnOnce(&mut ListingHeader),
    ) -> Result<bool, StoreError> {
        let Some(doc) = store.get(LISTINGS_COLLECTION, listing_id).await? else {
            return Ok(false);
        };
        let Some(mut header) = read_header(&doc) else {
            return Ok(false);
        };
        change(&mut header);
        header.refresh_search_keys();
        let updated = store
            .update(LISTINGS_COLLECTION, listing_id, serde_json::to_value(&header)?)
            .await?;
        Ok(updated.is_some())
    }
}

fn read_header(doc: &Document) -> Option<ListingHeader> {
    match serde_json::from_value(doc.data.clone()) {
        Ok(header) => Some(header),
        Err(e) => {
            tracing::warn!(listing_id = %doc.id, error = %e, "Unreadable listing document");
            None
        }
    }
}

fn assemble(doc: &Document, header: ListingHeader) -> DraftListing {
    DraftListing {
        id: doc.id.clone(),
        status: header.status,
        dealer_id: header.dealer_id,
        business_profile_id: header.business_profile_id,
        basic_info: header.basic_info,
        specifications: None,
        features: None,
        ownership: None,
        pricing: None,
        photos: None,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
        submitted_at: header.submitted_at,
    }
}

fn parse<T: DeserializeOwned>(data: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(data)
}

fn attach(listing: &mut DraftListing, step: WizardStep, data: Value) -> Result<(), serde_json::Error> {
    match step {
        WizardStep::BasicInfo => listing.basic_info = parse(data)?,
        WizardStep::Specifications => listing.specifications = Some(parse(data)?),
        WizardStep::Features => listing.features = Some(parse(data)?),
        WizardStep::Ownership => listing.ownership = Some(parse(data)?),
        WizardStep::Pricing => listing.pricing = Some(parse(data)?),
        WizardStep::Photos => listing.photos = Some(parse(data)?),
    }
    Ok(())
}
