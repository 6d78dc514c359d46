//! Remote album listing through the Flickr REST API.
//!
//! Only the first page of a photoset is fetched. Callers should check
//! [`RemoteListing::is_truncated`] and warn when photos were left out.

mod client;
mod types;

pub use client::{unwrap_envelope, FlickrClient, RemoteError};
pub use types::{FlickrPhoto, FlickrPhotoset, FlickrUser};

use crate::records::RemoteRecord;
use async_trait::async_trait;
use tracing::info;

/// Source of the remote side of a reconciliation.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_listing(
        &self,
        username: &str,
        set_id: &str,
        per_page: Option<u32>,
    ) -> Result<RemoteListing, RemoteError>;
}

/// The remote side of a reconciliation
#[derive(Debug, Clone)]
pub struct RemoteListing {
    pub set_title: String,
    /// Photos in the set, across all pages
    pub total: u32,
    /// Photos per page, the most `records` can hold
    pub per_page: u32,
    /// Records from the first page, in API order
    pub records: Vec<RemoteRecord>,
}

impl RemoteListing {
    pub fn is_truncated(&self) -> bool {
        self.total > self.per_page
    }
}

impl From<FlickrPhotoset> for RemoteListing {
    fn from(set: FlickrPhotoset) -> Self {
        Self {
            set_title: set.title,
            total: set.total,
            per_page: set.perpage,
            records: set.photo.into_iter().map(RemoteRecord::from).collect(),
        }
    }
}

/// Resolve the username and fetch the photoset's first page.
pub async fn fetch_remote_records(
    client: &FlickrClient,
    username: &str,
    set_id: &str,
    per_page: Option<u32>,
) -> Result<RemoteListing, RemoteError> {
    let user = client.find_user_by_username(username).await?;
    let set = client.get_photoset_photos(&user.id, set_id, per_page).await?;

    let listing = RemoteListing::from(set);
    info!(set = %listing.set_title, photos = listing.total, "Fetched photoset");

    Ok(listing)
}

#[async_trait]
impl RemoteSource for FlickrClient {
    async fn fetch_listing(
        &self,
        username: &str,
        set_id: &str,
        per_page: Option<u32>,
    ) -> Result<RemoteListing, RemoteError> {
        fetch_remote_records(self, username, set_id, per_page).await
    }
}
