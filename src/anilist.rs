pub mod data;
mod queries;

use data::{
    ListCollectionResponse, MediaListCollectionData, PageData, ProgressEntry,
    SaveMediaListEntryData, ScoreEntry, SearchResults, User, ViewerData, WatchingEntry,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type MediaIdentifier = i32;
pub type UserIdentifier = i32;

pub const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";

#[derive(Debug, Error)]
pub enum AnilistError {
    #[error("Could not serialize request: {0}")]
    RequestData(#[source] serde_json::Error),
    #[error("Could not connect to AniList: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("Invalid token. Status Code: {status}, Response: {body}")]
    InvalidToken { status: u16, body: String },
    #[error("Status Code: {status}, Response: {body}")]
    Api { status: u16, body: String },
    #[error("Could not parse response: {0}")]
    Parsing(#[source] serde_json::Error),
}

/// Status code and body of a GraphQL response, before interpretation.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Carries a serialized GraphQL request to the API.
pub trait Transport {
    fn post(&self, endpoint: &str, token: &str, body: String) -> Result<RawResponse, AnilistError>;
}

/// Blocking HTTP transport. No retries; one request per call.
#[derive(Debug, Default)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    fn request(
        &self,
        endpoint: &str,
        token: &str,
        body: String,
    ) -> reqwest::blocking::RequestBuilder {
        self.http
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", token))
            .body(body)
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: &str, token: &str, body: String) -> Result<RawResponse, AnilistError> {
        let response = self.request(endpoint, token, body).send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, Serialize)]
struct Query<'a, T> {
    query: &'a str,
    variables: Option<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

impl<T> QueryResponse<T>
where
    T: DeserializeOwned,
{
    pub fn parse(status: StatusCode, body: &str) -> Result<Self, AnilistError> {
        if status == StatusCode::BAD_REQUEST {
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
                for error in error_response.errors.iter().flatten() {
                    if error.message == "Invalid token" {
                        return Err(AnilistError::InvalidToken {
                            status: status.as_u16(),
                            body: body.to_string(),
                        });
                    }
                }
            }
        }
        if status != StatusCode::OK {
            return Err(AnilistError::Api {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }
        serde_json::from_str(body).map_err(|error| {
            log::debug!("{}", body);
            log::debug!("{}", error);
            AnilistError::Parsing(error)
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchVariables<'a> {
    search: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MediaVariables {
    media_id: MediaIdentifier,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressVariables {
    media_id: MediaIdentifier,
    progress: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreVariables {
    media_id: MediaIdentifier,
    score: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserVariables {
    user_id: UserIdentifier,
}

/// AniList GraphQL client for a single pre-obtained bearer token.
#[derive(Debug)]
pub struct AnilistClient<T = HttpTransport> {
    token: String,
    endpoint: String,
    transport: T,
}

impl AnilistClient<HttpTransport> {
    pub fn new(token: String) -> Self {
        Self::with_endpoint(token, String::from(ANILIST_ENDPOINT))
    }

    pub fn with_endpoint(token: String, endpoint: String) -> Self {
        Self {
            token,
            endpoint,
            transport: HttpTransport::default(),
        }
    }
}

impl<T> AnilistClient<T>
where
    T: Transport,
{
    pub fn with_transport(token: String, transport: T) -> Self {
        Self {
            token,
            endpoint: String::from(ANILIST_ENDPOINT),
            transport,
        }
    }

    fn send_query<V, R>(
        &self,
        operation: &str,
        query: Query<'_, V>,
    ) -> Result<QueryResponse<R>, AnilistError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        log::debug!("Sending {} request", operation);
        let body = serde_json::to_string(&query).map_err(AnilistError::RequestData)?;
        let result = self
            .transport
            .post(&self.endpoint, &self.token, body)
            .and_then(|response| {
                log::debug!("{} responded with {}", operation, response.status);
                QueryResponse::<R>::parse(response.status, &response.body)
            });
        if let Err(error) = &result {
            log::error!("Failed to {}. {}", operation, error);
        }
        result
    }

    /// Search anime by title. The first page of up to 10 results is mapped
    /// from display title to media ID.
    pub fn search(&self, search: &str) -> Result<SearchResults, AnilistError> {
        let query = Query {
            query: queries::SEARCH_QUERY,
            variables: Some(SearchVariables { search }),
        };
        let response = self.send_query::<_, PageData>("search for anime", query)?;
        let results = response.data.into_search_results();
        log::debug!("Found {} results for \"{}\"", results.len(), search);
        Ok(results)
    }

    /// Same as [`search`](Self::search) but failures are only logged.
    pub fn search_or_empty(&self, search: &str) -> SearchResults {
        self.search(search).unwrap_or_default()
    }

    pub fn whoami(&self) -> Result<User, AnilistError> {
        let query = Query::<()> {
            query: queries::USER_QUERY,
            variables: None,
        };
        let response = self.send_query::<_, ViewerData>("fetch viewer", query)?;
        log::debug!("Found user {}", &response.data.Viewer);
        Ok(response.data.Viewer)
    }

    pub fn add_to_watching(&self, media_id: MediaIdentifier) -> Result<WatchingEntry, AnilistError> {
        let query = Query {
            query: queries::ADD_TO_WATCHING_MUTATION,
            variables: Some(MediaVariables { media_id }),
        };
        let response = self
            .send_query::<_, SaveMediaListEntryData<WatchingEntry>>("add anime", query)?;
        log::info!(
            "Anime with ID {} has been added to your watching list.",
            media_id
        );
        Ok(response.data.SaveMediaListEntry)
    }

    /// Fetch the full anime list collection of a user.
    pub fn fetch_list_collection(
        &self,
        user_id: UserIdentifier,
    ) -> Result<ListCollectionResponse, AnilistError> {
        let query = Query {
            query: queries::MEDIALIST_COLLECTION_QUERY,
            variables: Some(UserVariables { user_id }),
        };
        let response =
            self.send_query::<_, MediaListCollectionData>("fetch list collection", query)?;
        log::debug!(
            "Fetched {} list entries for user {}",
            response.collection().entries().count(),
            user_id
        );
        Ok(response)
    }

    /// Set the watched episode count and return the progress stored by AniList.
    pub fn update_progress(&self, media_id: MediaIdentifier, progress: i32) -> Result<i32, AnilistError> {
        let query = Query {
            query: queries::PROGRESS_MUTATION,
            variables: Some(ProgressVariables { media_id, progress }),
        };
        let response = self
            .send_query::<_, SaveMediaListEntryData<ProgressEntry>>("update progress", query)?;
        let updated_progress = response.data.SaveMediaListEntry.progress;
        log::info!(
            "Anime progress updated! Latest watched episode: {}",
            updated_progress
        );
        Ok(updated_progress)
    }

    pub fn rate(&self, media_id: MediaIdentifier, score: f64) -> Result<ScoreEntry, AnilistError> {
        let query = Query {
            query: queries::SCORE_MUTATION,
            variables: Some(ScoreVariables { media_id, score }),
        };
        let response =
            self.send_query::<_, SaveMediaListEntryData<ScoreEntry>>("rate anime", query)?;
        log::info!(
            "Successfully rated anime (mediaId: {}) with score: {}",
            media_id,
            score
        );
        Ok(response.data.SaveMediaListEntry)
    }
}
