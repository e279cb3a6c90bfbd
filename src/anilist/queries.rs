pub const SEARCH_QUERY: &str = "
query ($search: String) {
    Page(page: 1, perPage: 10) {
        media(search: $search, type: ANIME) {
            id
            title {
                romaji
                english
                native
            }
        }
    }
}
";

pub const USER_QUERY: &str = "
query {
    Viewer {
        id
        name
    }
}
";

pub const ADD_TO_WATCHING_MUTATION: &str = "
mutation ($mediaId: Int) {
    SaveMediaListEntry(mediaId: $mediaId, status: CURRENT) {
        id
        status
    }
}
";

pub const MEDIALIST_COLLECTION_QUERY: &str = "
query ($userId: Int) {
    MediaListCollection(userId: $userId, type: ANIME) {
        lists {
            entries {
                media {
                    id
                    episodes
                    duration
                    title {
                        romaji
                        english
                    }
                }
                status
                score
                progress
            }
        }
    }
}
";

pub const PROGRESS_MUTATION: &str = "
mutation ($mediaId: Int, $progress: Int) {
    SaveMediaListEntry(mediaId: $mediaId, progress: $progress) {
        id
        progress
    }
}
";

pub const SCORE_MUTATION: &str = "
mutation ($mediaId: Int, $score: Float) {
    SaveMediaListEntry(mediaId: $mediaId, score: $score) {
        id
        mediaId
        score
    }
}
";
