mod blob;
mod commit;
mod repository;

pub use blob::{BlobContent, BlobMetadata};
pub use commit::CommitInfo;
pub use repository::Repository;

use crate::error::Result;

/// Source of blob snapshots. Implementations report an unresolvable ref or
/// path as `Error::NotFound` and undecodable content as `Error::Unsupported`.
pub trait BlobStore {
    fn fetch_blob(
        &self,
        repository_id: &str,
        reference: &str,
        path: &str,
    ) -> Result<(BlobMetadata, BlobContent)>;

    /// Undecoded bytes, for raw views and downloads of binary content.
    fn raw_blob(&self, repository_id: &str, reference: &str, path: &str) -> Result<Vec<u8>>;
}
