use std::collections::HashMap;
use std::path::PathBuf;

use soscout_api::{StackExchangeClient, StackExchangeError};
use tracing::{debug, warn};

use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::export::Exporter;
use crate::models::{api_user_to_user, ListingQuery, SortOrder, User};
use crate::{Error, Result};

/// One interactive run: the API client, the users seen so far, and the
/// persisted bookmark set.
///
/// The fetched-users map lives for the process only. Its single job is
/// gatekeeping bookmarks - you can only bookmark someone you have actually
/// seen in a listing.
pub struct Session {
    client: StackExchangeClient,
    fetched: HashMap<u64, User>,
    bookmarks: BookmarkStore,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let client = StackExchangeClient::with_base_url(
            config.api.key.clone(),
            &config.api.site,
            config.api.base_url.clone(),
        );

        let bookmarks = match &config.store.bookmarks_path {
            Some(path) => BookmarkStore::open(path)?,
            None => BookmarkStore::open_default()?,
        };

        Ok(Self {
            client,
            fetched: HashMap::new(),
            bookmarks,
        })
    }

    /// Fetch a listing page and remember every user on it.
    pub async fn fetch_users(&mut self, query: ListingQuery) -> Result<Vec<User>> {
        let users = self
            .client
            .list_users(query.page, query.pagesize, query.order.api_param())
            .await
            .map_err(map_api_error)?;

        let users: Vec<User> = users.into_iter().map(api_user_to_user).collect();

        for user in &users {
            self.fetched.insert(user.user_id, user.clone());
        }
        debug!(
            "Fetched {} users (page {}), {} seen this session",
            users.len(),
            query.page,
            self.fetched.len()
        );

        Ok(users)
    }

    /// Fetch one user by ID.
    pub async fn fetch_user(&self, user_id: u64) -> Result<User> {
        let user = self.client.get_user(user_id).await.map_err(map_api_error)?;
        Ok(api_user_to_user(user))
    }

    /// Bookmark a user seen in an earlier listing.
    pub fn bookmark(&mut self, user_id: u64) -> Result<()> {
        if !self.fetched.contains_key(&user_id) {
            return Err(Error::NotFetched(user_id));
        }
        self.bookmarks.add(user_id)?;
        Ok(())
    }

    /// Drop a user from the bookmark set.
    pub fn unbookmark(&mut self, user_id: u64) -> Result<()> {
        if !self.bookmarks.remove(user_id)? {
            return Err(Error::NotBookmarked(user_id));
        }
        Ok(())
    }

    pub fn has_bookmarks(&self) -> bool {
        !self.bookmarks.is_empty()
    }

    /// Re-fetch every bookmarked user, one call per ID.
    ///
    /// IDs that no longer resolve (deleted accounts, mostly) are skipped
    /// with a log line instead of failing the whole listing.
    pub async fn bookmarked_users(&self) -> Vec<User> {
        let ids: Vec<u64> = self.bookmarks.iter().collect();

        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            match self.fetch_user(id).await {
                Ok(user) => users.push(user),
                Err(e) => warn!("Skipping bookmarked user {}: {}", id, e),
            }
        }
        users
    }

    /// Export users to a `.sofusers` report, fetching a default page when
    /// the caller has nothing in hand.
    pub async fn export_users(
        &mut self,
        file_name: &str,
        order: SortOrder,
        users: Option<Vec<User>>,
    ) -> Result<PathBuf> {
        let users = match users {
            Some(users) => users,
            None => self.fetch_users(ListingQuery::default()).await?,
        };

        if users.is_empty() {
            return Err(Error::ExportError(
                "No users to save. Fetch and display users first.".into(),
            ));
        }

        Exporter::export_to_file(&users, file_name, order)
    }
}

fn map_api_error(e: StackExchangeError) -> Error {
    match e {
        StackExchangeError::UserNotFound(id) => Error::UserNotFound(id),
        other => Error::ApiError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.bookmarks_path = Some(dir.path().join("bookmarks.json"));

        let session = Session::new(&config).unwrap();
        (dir, session)
    }

    fn seen_user(id: u64) -> User {
        User {
            user_id: id,
            account_id: Some(id),
            display_name: Some(format!("user-{}", id)),
            reputation: 100,
            last_access_date: Some(1700000000),
            age: None,
            location: None,
            user_type: Some("registered".to_string()),
        }
    }

    #[test]
    fn test_bookmark_requires_prior_fetch() {
        let (_dir, mut session) = test_session();

        let err = session.bookmark(42).unwrap_err();
        assert!(matches!(err, Error::NotFetched(42)));
        assert!(!session.has_bookmarks());
    }

    #[test]
    fn test_bookmark_accepts_fetched_user() {
        let (_dir, mut session) = test_session();
        session.fetched.insert(42, seen_user(42));

        session.bookmark(42).unwrap();
        assert!(session.has_bookmarks());

        // bookmarking twice stays a single entry
        session.bookmark(42).unwrap();
        assert_eq!(session.bookmarks.len(), 1);
    }

    #[test]
    fn test_unbookmark_rejects_absent_id() {
        let (_dir, mut session) = test_session();

        let err = session.unbookmark(7).unwrap_err();
        assert!(matches!(err, Error::NotBookmarked(7)));
    }

    #[test]
    fn test_bookmark_then_unbookmark_round_trip() {
        let (_dir, mut session) = test_session();
        session.fetched.insert(1, seen_user(1));
        session.fetched.insert(2, seen_user(2));
        session.bookmark(1).unwrap();

        session.bookmark(2).unwrap();
        session.unbookmark(2).unwrap();

        let ids: Vec<u64> = session.bookmarks.iter().collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_bookmarks_survive_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.bookmarks_path = Some(dir.path().join("bookmarks.json"));

        {
            let mut session = Session::new(&config).unwrap();
            session.fetched.insert(5, seen_user(5));
            session.bookmark(5).unwrap();
        }

        let session = Session::new(&config).unwrap();
        assert!(session.has_bookmarks());
        assert!(session.bookmarks.contains(5));
    }

    #[tokio::test]
    async fn test_export_rejects_empty_listing() {
        let (_dir, mut session) = test_session();

        let err = session
            .export_users("out", SortOrder::Asc, Some(Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExportError(_)));
    }

    #[tokio::test]
    async fn test_export_with_prefetched_users() {
        let (dir, mut session) = test_session();
        let target = dir.path().join("report");

        let written = session
            .export_users(
                target.to_str().unwrap(),
                SortOrder::Desc,
                Some(vec![seen_user(1), seen_user(2)]),
            )
            .await
            .unwrap();

        assert!(written.exists());
        let contents = std::fs::read_to_string(written).unwrap();
        assert!(contents.starts_with("Total Count of Users Fetched: 2"));
    }
}
