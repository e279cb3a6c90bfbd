use crate::anilist::{MediaIdentifier, QueryResponse, UserIdentifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Search titles that are rewritten before matching against a list collection.
const TITLE_ALIASES: [(&str, &str); 1] = [("1P", "ONE PIECE")];

/// Display title to media ID. Colliding titles keep the last ID seen.
pub type SearchResults = HashMap<String, MediaIdentifier>;

/// Full `MediaListCollection` response, as returned by the API and as stored
/// in a local snapshot file.
pub type ListCollectionResponse = QueryResponse<MediaListCollectionData>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaListStatus {
    Current,
    Planning,
    Completed,
    Dropped,
    Paused,
    Repeating,
}

impl fmt::Display for MediaListStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = match self {
            Self::Current => "CURRENT",
            Self::Planning => "PLANNING",
            Self::Completed => "COMPLETED",
            Self::Dropped => "DROPPED",
            Self::Paused => "PAUSED",
            Self::Repeating => "REPEATING",
        };
        write!(f, "{}", status)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaIdentifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub title: MediaTitle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

impl MediaTitle {
    /// English title if there is one, romaji otherwise. Empty when neither is
    /// present.
    pub fn display_title(&self) -> &str {
        [&self.english, &self.romaji]
            .into_iter()
            .flatten()
            .next()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Case-insensitive substring match against the romaji and english titles.
    /// `needle` must already be lowercase.
    fn contains(&self, needle: &str) -> bool {
        [&self.romaji, &self.english]
            .into_iter()
            .flatten()
            .any(|title| title.to_lowercase().contains(needle))
    }
}

impl fmt::Display for MediaTitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

/// A single entry on a user's list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaList {
    pub media: Media,
    pub status: MediaListStatus,
    pub score: f64,
    pub progress: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaListGroup {
    pub entries: Vec<MediaList>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaListCollection {
    pub lists: Vec<MediaListGroup>,
}

impl MediaListCollection {
    /// All entries, lists in collection order and entries in list order.
    pub fn entries(&self) -> impl Iterator<Item = &MediaList> {
        self.lists.iter().flat_map(|list| list.entries.iter())
    }

    pub fn filter_by_title(&self, search_title: &str) -> Vec<TitleMatch> {
        let search_title = resolve_alias(search_title);
        let needle = search_title.to_lowercase();
        log::debug!("Filtering list collection by \"{}\"", &needle);
        self.entries()
            .filter(|entry| entry.media.title.contains(&needle))
            .map(TitleMatch::from)
            .collect()
    }
}

#[allow(non_snake_case)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaListCollectionData {
    pub MediaListCollection: MediaListCollection,
}

impl ListCollectionResponse {
    pub fn collection(&self) -> &MediaListCollection {
        &self.data.MediaListCollection
    }

    pub fn filter_by_title(&self, search_title: &str) -> Vec<TitleMatch> {
        self.collection().filter_by_title(search_title)
    }
}

fn resolve_alias(search_title: &str) -> &str {
    TITLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == search_title)
        .map(|(_, title)| *title)
        .unwrap_or(search_title)
}

/// A list entry that matched a title search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TitleMatch {
    pub id: MediaIdentifier,
    pub progress: i32,
    pub romaji_title: Option<String>,
    pub english_title: Option<String>,
    pub episodes: Option<i32>,
    pub duration: Option<i32>,
}

impl From<&MediaList> for TitleMatch {
    fn from(entry: &MediaList) -> Self {
        Self {
            id: entry.media.id,
            progress: entry.progress,
            romaji_title: entry.media.title.romaji.clone(),
            english_title: entry.media.title.english.clone(),
            episodes: entry.media.episodes,
            duration: entry.media.duration,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub media: Vec<Media>,
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct PageData {
    pub Page: Page,
}

impl PageData {
    pub fn into_search_results(self) -> SearchResults {
        let mut results = SearchResults::new();
        for media in self.Page.media {
            results.insert(media.title.display_title().to_string(), media.id);
        }
        results
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: UserIdentifier,
    pub name: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub Viewer: User,
}

/// Entry returned when adding media to the watching list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WatchingEntry {
    pub id: i32,
    pub status: MediaListStatus,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProgressEntry {
    pub id: i32,
    pub progress: i32,
}

#[allow(non_snake_case)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: i32,
    pub mediaId: MediaIdentifier,
    pub score: f64,
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct SaveMediaListEntryData<T> {
    pub SaveMediaListEntry: T,
}
