//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;

use crate::domain::UserId;
use crate::domain::ports::{
    MockAccountCommand, MockAccountQuery, MockFavoritesCommand, MockFavoritesQuery,
    MockIdentityResolver, MockRatingsCommand, MockRatingsQuery, MockVideoCatalogQuery,
};
use crate::inbound::http::state::HttpState;

/// Bearer header tuple for `TestRequest::insert_header`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Resolver that maps any token to `user_id`.
pub fn resolves_to(user_id: UserId) -> MockIdentityResolver {
    let mut identity = MockIdentityResolver::new();
    identity
        .expect_resolve()
        .times(0..)
        .returning(move |_| Ok(user_id));
    identity
}

/// Builds [`HttpState`] from mocks. Ports left unset reject every call.
pub struct StateBuilder {
    identity: MockIdentityResolver,
    accounts: MockAccountCommand,
    accounts_query: MockAccountQuery,
    ratings: MockRatingsCommand,
    ratings_query: MockRatingsQuery,
    favorites: MockFavoritesCommand,
    favorites_query: MockFavoritesQuery,
    videos: MockVideoCatalogQuery,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            identity: MockIdentityResolver::new(),
            accounts: MockAccountCommand::new(),
            accounts_query: MockAccountQuery::new(),
            ratings: MockRatingsCommand::new(),
            ratings_query: MockRatingsQuery::new(),
            favorites: MockFavoritesCommand::new(),
            favorites_query: MockFavoritesQuery::new(),
            videos: MockVideoCatalogQuery::new(),
        }
    }

    pub fn identity(mut self, identity: MockIdentityResolver) -> Self {
        self.identity = identity;
        self
    }

    pub fn accounts(mut self, accounts: MockAccountCommand) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn accounts_query(mut self, accounts_query: MockAccountQuery) -> Self {
        self.accounts_query = accounts_query;
        self
    }

    pub fn ratings(mut self, ratings: MockRatingsCommand) -> Self {
        self.ratings = ratings;
        self
    }

    pub fn ratings_query(mut self, ratings_query: MockRatingsQuery) -> Self {
        self.ratings_query = ratings_query;
        self
    }

    pub fn favorites(mut self, favorites: MockFavoritesCommand) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn favorites_query(mut self, favorites_query: MockFavoritesQuery) -> Self {
        self.favorites_query = favorites_query;
        self
    }

    pub fn videos(mut self, videos: MockVideoCatalogQuery) -> Self {
        self.videos = videos;
        self
    }

    pub fn build(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            identity: Arc::new(self.identity),
            accounts: Arc::new(self.accounts),
            accounts_query: Arc::new(self.accounts_query),
            ratings: Arc::new(self.ratings),
            ratings_query: Arc::new(self.ratings_query),
            favorites: Arc::new(self.favorites),
            favorites_query: Arc::new(self.favorites_query),
            videos: Arc::new(self.videos),
        })
    }
}
