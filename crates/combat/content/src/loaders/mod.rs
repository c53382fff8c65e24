//! Content loaders for reading combat data from files.
//!
//! Each loader converts one RON file into `combat-core` types; the
//! [`ContentFactory`] ties them to a data directory and assembles the
//! full [`crate::roster::ContentRoster`].

pub mod enemies;
pub mod factory;
pub mod heroes;
pub mod items;
pub mod skills;

pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use heroes::HeroLoader;
pub use items::ItemLoader;
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
