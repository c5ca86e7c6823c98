use std::path::{Path, PathBuf};

use git2::{ErrorCode, ObjectType, Repository as Git2Repository};

use super::blob::{permission_string, BlobContent, BlobMetadata};
use super::commit::CommitInfo;
use super::BlobStore;
use crate::config::DEFAULT_SNIFF_LEN;
use crate::error::{Error, Result};

pub struct Repository {
    repo: Git2Repository,
    path: PathBuf,
    sniff_len: usize,
}

impl Repository {
    pub fn discover() -> Result<Self> {
        Self::from_git2(Git2Repository::discover(".").map_err(open_error)?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_git2(Git2Repository::open(path.as_ref()).map_err(open_error)?)
    }

    fn from_git2(repo: Git2Repository) -> Result<Self> {
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self {
            repo,
            path,
            sniff_len: DEFAULT_SNIFF_LEN,
        })
    }

    pub fn with_sniff_len(mut self, sniff_len: usize) -> Self {
        self.sniff_len = sniff_len;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name of the repository, without a `.git` suffix for bare
    /// repositories.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .map(|s| s.strip_suffix(".git").map(str::to_string).unwrap_or(s))
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn resolve_commit(&self, reference: &str, path: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .repo
            .revparse_single(reference)
            .map_err(|e| lookup_error(e, reference, path))?;

        // Refs that name a tree or blob have no commit to attribute.
        obj.peel_to_commit()
            .map_err(|_| Error::not_found(reference, path))
    }

    /// Find the blob at `path` in `commit`, with its file mode.
    fn find_entry(
        &self,
        commit: &git2::Commit<'_>,
        reference: &str,
        path: &str,
    ) -> Result<(git2::Blob<'_>, i32)> {
        if path.is_empty() {
            return Err(Error::not_found(reference, path));
        }

        let tree = commit.tree()?;
        let entry = tree
            .get_path(Path::new(path))
            .map_err(|e| lookup_error(e, reference, path))?;

        if entry.kind() != Some(ObjectType::Blob) {
            tracing::debug!("{} at {} is {:?}, not a blob", path, reference, entry.kind());
            return Err(Error::not_found(reference, path));
        }

        let blob = self.repo.find_blob(entry.id())?;
        Ok((blob, entry.filemode()))
    }

    fn check_repository(&self, repository_id: &str, reference: &str, path: &str) -> Result<()> {
        if repository_id != self.name() {
            tracing::debug!("repository '{}' is not '{}'", repository_id, self.name());
            return Err(Error::not_found(reference, path));
        }
        Ok(())
    }
}

impl BlobStore for Repository {
    fn fetch_blob(
        &self,
        repository_id: &str,
        reference: &str,
        path: &str,
    ) -> Result<(BlobMetadata, BlobContent)> {
        let path = normalize_path(path);
        self.check_repository(repository_id, reference, path)?;

        let commit = self.resolve_commit(reference, path)?;
        let (blob, filemode) = self.find_entry(&commit, reference, path)?;
        tracing::debug!(
            "resolved {}:{} to blob {} ({} bytes)",
            reference,
            path,
            blob.id(),
            blob.size()
        );

        let content = BlobContent::from_bytes(path, blob.content(), self.sniff_len)?;
        let metadata = BlobMetadata {
            path: path.to_string(),
            byte_size: blob.size() as u64,
            permission_string: permission_string(filemode),
            commit: CommitInfo::from_commit(&commit),
        };

        Ok((metadata, content))
    }

    fn raw_blob(&self, repository_id: &str, reference: &str, path: &str) -> Result<Vec<u8>> {
        let path = normalize_path(path);
        self.check_repository(repository_id, reference, path)?;

        let commit = self.resolve_commit(reference, path)?;
        let (blob, _) = self.find_entry(&commit, reference, path)?;
        Ok(blob.content().to_vec())
    }
}

fn open_error(err: git2::Error) -> Error {
    match err.code() {
        ErrorCode::NotFound => Error::NotARepository(err),
        _ => Error::Git(err),
    }
}

fn lookup_error(err: git2::Error, reference: &str, path: &str) -> Error {
    match err.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous => {
            Error::not_found(reference, path)
        }
        _ => Error::Git(err),
    }
}

fn normalize_path(path: &str) -> &str {
    let mut path = path.trim_start_matches('/');
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.trim_start_matches('/');
    }
    path
}
