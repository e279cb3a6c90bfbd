pub mod anilist;
pub mod snapshot;

pub use anilist::{AnilistClient, AnilistError};
pub use snapshot::{load_collection, load_json_file, save_json_file, SnapshotError};
