//! In-memory driven-port doubles wired to the real domain services.
//!
//! Each double records the calls that matter to assertions so tests can
//! check both the HTTP response and what reached the collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use reelmark::domain::ports::{
    ContentRepository, ContentRepositoryError, CredentialUpdate, FavoriteRepository,
    FavoriteRepositoryError, IdentityProvider, IdentityProviderError, Mailer, MailerError,
    PasswordResetRepository, PasswordResetRepositoryError, PlatformSession, PlatformUser,
    RatingRepository, RatingRepositoryError, UserProfileRepository, UserProfileRepositoryError,
    VideoSearchSource, VideoSearchSourceError,
};
use reelmark::domain::{
    AccessToken, AccountService, AccountSettings, Content, ContentId, EmailAddress, EmailMessage,
    ExternalContentId, Favorite, FavoriteEntry, FavoritesService, LoginCredentials,
    PasswordResetTicket, PlatformIdentityResolver, Rating, RatingEntry, RatingService,
    Registration, TokenHash, UserId, UserProfile, VideoCatalogService, VideoHit,
};
use reelmark::inbound::http::state::HttpState;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("double state poisoned")
}

#[derive(Debug, Clone)]
struct Account {
    user: PlatformUser,
    password: String,
}

/// Auth platform double: accounts keyed by email, tokens minted on sign-in.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    tokens: Mutex<HashMap<String, UserId>>,
    token_lookups: Mutex<usize>,
}

impl InMemoryIdentityProvider {
    pub fn token_lookups(&self) -> usize {
        *lock(&self.token_lookups)
    }

    pub fn password_for(&self, email: &str) -> Option<String> {
        lock(&self.accounts)
            .get(email)
            .map(|account| account.password.clone())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, registration: &Registration) -> Result<PlatformUser, IdentityProviderError> {
        let mut accounts = lock(&self.accounts);
        let email = registration.email.as_str().to_owned();
        if accounts.contains_key(&email) {
            return Err(IdentityProviderError::rejected("User already registered"));
        }
        let user = PlatformUser {
            id: UserId::random(),
            email: Some(email.clone()),
            name: Some(registration.name.as_str().to_owned()),
            lastname: Some(registration.lastname.as_str().to_owned()),
        };
        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: registration.password.expose().to_owned(),
            },
        );
        Ok(user)
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PlatformSession, IdentityProviderError> {
        let account = lock(&self.accounts)
            .get(credentials.email().as_str())
            .filter(|account| account.password == credentials.password().expose())
            .cloned()
            .ok_or_else(IdentityProviderError::invalid_credentials)?;
        let token = format!("token-{}", account.user.id);
        lock(&self.tokens).insert(token.clone(), account.user.id);
        let access_token =
            AccessToken::new(token).map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        Ok(PlatformSession {
            access_token,
            user: account.user,
        })
    }

    async fn user_for_token(&self, token: &AccessToken) -> Result<PlatformUser, IdentityProviderError> {
        *lock(&self.token_lookups) += 1;
        let user_id = lock(&self.tokens)
            .get(token.expose())
            .copied()
            .ok_or_else(IdentityProviderError::invalid_token)?;
        lock(&self.accounts)
            .values()
            .find(|account| account.user.id == user_id)
            .map(|account| account.user.clone())
            .ok_or_else(IdentityProviderError::invalid_token)
    }

    async fn update_credentials(
        &self,
        user_id: &UserId,
        update: &CredentialUpdate,
    ) -> Result<(), IdentityProviderError> {
        let mut accounts = lock(&self.accounts);
        let key = accounts
            .iter()
            .find(|(_, account)| account.user.id == *user_id)
            .map(|(email, _)| email.clone())
            .ok_or_else(|| IdentityProviderError::rejected("User not found"))?;
        let mut account = accounts.remove(&key).expect("account present");
        if let Some(password) = &update.password {
            account.password = password.expose().to_owned();
        }
        let email = match &update.email {
            Some(email) => {
                account.user.email = Some(email.as_str().to_owned());
                email.as_str().to_owned()
            }
            None => key,
        };
        accounts.insert(email, account);
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<PlatformUser>, IdentityProviderError> {
        Ok(lock(&self.accounts)
            .get(email.as_str())
            .map(|account| account.user.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<UserId, UserProfile>>,
}

#[async_trait]
impl UserProfileRepository for InMemoryProfiles {
    async fn insert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        lock(&self.rows).insert(profile.id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        Ok(lock(&self.rows).get(id).cloned())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut rows = lock(&self.rows);
        match rows.get_mut(&profile.id) {
            Some(row) => {
                *row = profile.clone();
                Ok(())
            }
            None => Err(UserProfileRepositoryError::query("profile not found")),
        }
    }

    async fn soft_delete(
        &self,
        id: &UserId,
        sentinel: &EmailAddress,
    ) -> Result<bool, UserProfileRepositoryError> {
        Ok(lock(&self.rows)
            .get_mut(id)
            .map(|row| row.email = sentinel.as_str().to_owned())
            .is_some())
    }
}

#[derive(Default)]
pub struct InMemoryResets {
    tickets: Mutex<HashMap<String, PasswordResetTicket>>,
}

#[async_trait]
impl PasswordResetRepository for InMemoryResets {
    async fn store(&self, ticket: &PasswordResetTicket) -> Result<(), PasswordResetRepositoryError> {
        lock(&self.tickets).insert(ticket.token_hash.as_str().to_owned(), ticket.clone());
        Ok(())
    }

    async fn find(
        &self,
        token_hash: &TokenHash,
    ) -> Result<Option<PasswordResetTicket>, PasswordResetRepositoryError> {
        Ok(lock(&self.tickets).get(token_hash.as_str()).cloned())
    }

    async fn mark_used(
        &self,
        token_hash: &TokenHash,
        used_at: DateTime<Utc>,
    ) -> Result<(), PasswordResetRepositoryError> {
        if let Some(ticket) = lock(&self.tickets).get_mut(token_hash.as_str()) {
            ticket.used_at = Some(used_at);
        }
        Ok(())
    }
}

/// Mailer double keeping every message it was asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        lock(&self.sent).push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryContents {
    rows: Mutex<Vec<Content>>,
}

impl InMemoryContents {
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    fn summary(&self, id: &ContentId) -> Option<reelmark::domain::ContentSummary> {
        lock(&self.rows)
            .iter()
            .find(|content| content.id == *id)
            .map(Content::summary)
    }
}

#[async_trait]
impl ContentRepository for InMemoryContents {
    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, ContentRepositoryError> {
        Ok(lock(&self.rows).iter().find(|content| content.id == *id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalContentId,
    ) -> Result<Option<Content>, ContentRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|content| content.external_id == *external_id)
            .cloned())
    }

    async fn insert(&self, content: &Content) -> Result<(), ContentRepositoryError> {
        lock(&self.rows).push(content.clone());
        Ok(())
    }
}

pub struct InMemoryRatings {
    rows: Mutex<Vec<Rating>>,
    contents: Arc<InMemoryContents>,
    writes: Mutex<usize>,
}

impl InMemoryRatings {
    fn new(contents: Arc<InMemoryContents>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            contents,
            writes: Mutex::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        *lock(&self.writes)
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatings {
    async fn find(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Option<Rating>, RatingRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|rating| rating.user_id == *user_id && rating.content_id == *content_id)
            .cloned())
    }

    async fn insert(&self, rating: &Rating) -> Result<(), RatingRepositoryError> {
        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|row| row.user_id == rating.user_id && row.content_id == rating.content_id)
        {
            return Err(RatingRepositoryError::duplicate());
        }
        rows.push(rating.clone());
        *lock(&self.writes) += 1;
        Ok(())
    }

    async fn update(&self, rating: &Rating) -> Result<(), RatingRepositoryError> {
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|row| row.id == rating.id)
            .ok_or_else(|| RatingRepositoryError::query("rating not found"))?;
        *row = rating.clone();
        *lock(&self.writes) += 1;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RatingEntry>, RatingRepositoryError> {
        let mut ratings: Vec<Rating> = lock(&self.rows)
            .iter()
            .filter(|rating| rating.user_id == *user_id)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(ratings
            .into_iter()
            .filter_map(|rating| {
                let content = self.contents.summary(&rating.content_id)?;
                Some(RatingEntry { rating, content })
            })
            .collect())
    }
}

pub struct InMemoryFavorites {
    rows: Mutex<Vec<Favorite>>,
    contents: Arc<InMemoryContents>,
}

impl InMemoryFavorites {
    fn new(contents: Arc<InMemoryContents>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            contents,
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavorites {
    async fn find(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Option<Favorite>, FavoriteRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|favorite| favorite.user_id == *user_id && favorite.content_id == *content_id)
            .cloned())
    }

    async fn insert(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError> {
        lock(&self.rows).push(favorite.clone());
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<usize, FavoriteRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|favorite| !(favorite.user_id == *user_id && favorite.content_id == *content_id));
        Ok(before - rows.len())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntry>, FavoriteRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .filter(|favorite| favorite.user_id == *user_id)
            .filter_map(|favorite| {
                let content = self.contents.summary(&favorite.content_id)?;
                Some(FavoriteEntry {
                    favorite: favorite.clone(),
                    content,
                })
            })
            .collect())
    }
}

/// Video provider double returning one hit per queried term.
#[derive(Default)]
pub struct StubVideoSource {
    terms: Mutex<Vec<String>>,
}

impl StubVideoSource {
    pub fn terms(&self) -> Vec<String> {
        let mut terms = lock(&self.terms).clone();
        terms.sort();
        terms
    }
}

#[async_trait]
impl VideoSearchSource for StubVideoSource {
    async fn search(&self, term: &str, _per_page: u8) -> Result<Vec<VideoHit>, VideoSearchSourceError> {
        let id = {
            let mut terms = lock(&self.terms);
            terms.push(term.to_owned());
            terms.len() as u64
        };
        Ok(vec![VideoHit {
            id,
            page_url: Some(format!("https://www.pexels.com/video/{term}-clip-{id}/")),
            image: Some(format!("https://images.example/{id}.jpg")),
            video_links: vec![format!("https://videos.example/{id}.mp4")],
        }])
    }
}

/// Real services over in-memory collaborators.
pub struct Backend {
    pub identity: Arc<InMemoryIdentityProvider>,
    pub profiles: Arc<InMemoryProfiles>,
    pub mailer: Arc<RecordingMailer>,
    pub contents: Arc<InMemoryContents>,
    pub ratings: Arc<InMemoryRatings>,
    pub favorites: Arc<InMemoryFavorites>,
    pub videos: Arc<StubVideoSource>,
    pub state: web::Data<HttpState>,
}

impl Backend {
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let identity = Arc::new(InMemoryIdentityProvider::default());
        let profiles = Arc::new(InMemoryProfiles::default());
        let mailer = Arc::new(RecordingMailer::default());
        let contents = Arc::new(InMemoryContents::default());
        let ratings = Arc::new(InMemoryRatings::new(contents.clone()));
        let favorites = Arc::new(InMemoryFavorites::new(contents.clone()));
        let videos = Arc::new(StubVideoSource::default());

        let accounts = Arc::new(AccountService::new(
            identity.clone(),
            profiles.clone(),
            Arc::new(InMemoryResets::default()),
            mailer.clone(),
            clock.clone(),
            AccountSettings {
                frontend_url: "http://localhost:5173".into(),
                expose_reset_token: true,
            },
        ));
        let rating_service = Arc::new(RatingService::new(
            contents.clone(),
            ratings.clone(),
            clock.clone(),
        ));
        let favorite_service = Arc::new(FavoritesService::new(
            contents.clone(),
            favorites.clone(),
            clock.clone(),
        ));
        let catalog = Arc::new(VideoCatalogService::new(Some(videos.clone()), clock));

        let state = web::Data::new(HttpState {
            identity: Arc::new(PlatformIdentityResolver::new(identity.clone())),
            accounts: accounts.clone(),
            accounts_query: accounts,
            ratings: rating_service.clone(),
            ratings_query: rating_service,
            favorites: favorite_service.clone(),
            favorites_query: favorite_service,
            videos: catalog,
        });

        Self {
            identity,
            profiles,
            mailer,
            contents,
            ratings,
            favorites,
            videos,
            state,
        }
    }
}
