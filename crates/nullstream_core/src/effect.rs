use std::time::Duration;

use crate::{PlayerCommand, Video};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Evaluate the command's script in the web view.
    Player(PlayerCommand),
    /// Send `Msg::PlayDelayElapsed { generation }` back after `delay`.
    SchedulePlay { generation: u64, delay: Duration },
    /// Look up oEmbed metadata and answer with `MetadataFetched` or `MetadataUnavailable`.
    FetchMetadata { url: String },
    /// Save the whole playlist.
    PersistPlaylist(Vec<Video>),
}
