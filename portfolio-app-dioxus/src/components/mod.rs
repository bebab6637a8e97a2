mod audio_player;
mod folder_grid;
mod header;
mod sfx_gallery;
mod track_detail;
mod track_list;

pub use audio_player::{AudioElement, AudioPlayer};
pub use folder_grid::FolderGrid;
pub use header::Header;
pub use sfx_gallery::{SfxGallery, VideoModal};
pub use track_detail::TrackDetail;
pub use track_list::TrackList;
