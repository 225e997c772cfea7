//! Pages REST adapter
//!
//! Pages are the only entity persisted through a real backend. `PageClient`
//! speaks the wire protocol; `PageStore` mirrors the remote collection into
//! a local `Repository<Page>` that views read synchronously.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{expect_success, normalize_base, RemoteError};
use crate::core::models::{NewPage, Page, PageStatus};
use crate::core::store::Repository;

/// Wire shape of a page document
///
/// The server identifies documents with a `_id` field; it becomes `id` on
/// ingest so everything above the wire sees a single identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PageDocument {
    #[serde(rename = "_id")]
    id: String,
    slug: String,
    title: String,
    content: String,
    status: PageStatus,
}

impl From<PageDocument> for Page {
    fn from(doc: PageDocument) -> Self {
        Self {
            id: doc.id,
            slug: doc.slug,
            title: doc.title,
            content: doc.content,
            status: doc.status,
        }
    }
}

impl From<&Page> for PageDocument {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            slug: page.slug.clone(),
            title: page.title.clone(),
            content: page.content.clone(),
            status: page.status,
        }
    }
}

/// HTTP client for `GET/POST/PUT/DELETE {base}/pages`
#[derive(Debug, Clone)]
pub struct PageClient {
    http: Client,
    base_url: String,
}

impl PageClient {
    /// Create a client for the given API base URL (e.g.,
    /// `http://localhost:5000/api`)
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/pages{suffix}", self.base_url)
    }

    /// Fetch the whole page collection
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn list(&self) -> Result<Vec<Page>, RemoteError> {
        let response = expect_success(self.http.get(self.url("")).send().await?)?;
        let docs: Vec<PageDocument> = response.json().await?;
        Ok(docs.into_iter().map(Page::from).collect())
    }

    /// Create a page; the server assigns the id
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn create(&self, draft: &NewPage) -> Result<Page, RemoteError> {
        let response =
            expect_success(self.http.post(self.url("")).json(draft).send().await?)?;
        let doc: PageDocument = response.json().await?;
        Ok(doc.into())
    }

    /// Update a page in place; returns the server's view of the record
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn update(&self, page: &Page) -> Result<Page, RemoteError> {
        let response = expect_success(
            self.http
                .put(self.url(&format!("/{}", page.id)))
                .json(&PageDocument::from(page))
                .send()
                .await?,
        )?;
        let doc: PageDocument = response.json().await?;
        Ok(doc.into())
    }

    /// Delete a page by id
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer
    pub async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        expect_success(
            self.http
                .delete(self.url(&format!("/{id}")))
                .send()
                .await?,
        )?;
        Ok(())
    }
}

/// Local mirror of the remote page collection
///
/// Mutations go remote first and touch local state only on success, so the
/// mirror never holds a record the server refused.
#[derive(Debug, Clone)]
pub struct PageStore {
    client: PageClient,
    pages: Repository<Page>,
}

impl PageStore {
    /// Create a store backed by the given client
    #[must_use]
    pub fn new(client: PageClient) -> Self {
        Self {
            client,
            pages: Repository::new(),
        }
    }

    /// The local mirror, for synchronous reads
    #[must_use]
    pub const fn pages(&self) -> &Repository<Page> {
        &self.pages
    }

    /// Replace the mirror with the server's collection
    ///
    /// # Errors
    /// `RemoteError` on transport failure or a non-2xx answer; the mirror is
    /// left untouched in that case
    pub async fn load(&self) -> Result<usize, RemoteError> {
        let pages = self.client.list().await?;
        let count = pages.len();
        self.pages.clear();
        for page in pages {
            self.pages.create(page);
        }
        crate::info!("Loaded {count} pages from the backend");
        Ok(count)
    }

    /// Create a page remotely and mirror it with the server-assigned id
    ///
    /// # Errors
    /// `RemoteError`; the mirror is untouched on failure
    pub async fn create(&self, draft: NewPage) -> Result<Page, RemoteError> {
        let page = self.client.create(&draft).await?;
        crate::debug!("Page '{}' created with server id {}", page.slug, page.id);
        self.pages.create(page.clone());
        Ok(page)
    }

    /// Update a page remotely, then in the mirror
    ///
    /// # Errors
    /// `RemoteError`; the mirror is untouched on failure
    pub async fn update(&self, page: Page) -> Result<Page, RemoteError> {
        let updated = self.client.update(&page).await?;
        self.pages.update(updated.clone());
        Ok(updated)
    }

    /// Delete a page remotely, then from the mirror
    ///
    /// # Errors
    /// `RemoteError`; the mirror is untouched on failure
    pub async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.client.delete(id).await?;
        self.pages.delete(id);
        Ok(())
    }
}
