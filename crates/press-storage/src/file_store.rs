//! JSON snapshot storage on disk

use crate::memory::MemoryStore;
use crate::snapshot::SiteSnapshot;
use press_core::article::{Article, ArticleCategory, Menu};
use press_core::comment::Comment;
use press_core::error::{PressError, Result};
use press_core::store::{
    CategoryStore, CommentStore, ContentStore, MenuStore, OptionStore, SessionResolver,
};
use press_core::types::{ArticleId, CommentId};
use press_core::user::User;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const SITE_FILE: &str = "site.json";

/// Default data directory (platform data dir, else ~/.press)
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "press", "press")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".press")
        })
}

/// Site storage backed by a single JSON file
///
/// Reads are served from memory. Every mutation, page views included,
/// rewrites the whole `site.json` under one lock before returning, so write
/// cost grows with the site. Suited to small sites.
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Path of the site snapshot
    site_path: PathBuf,
    memory: MemoryStore,
    /// Serializes mutate-then-persist
    write_lock: Mutex<()>,
}

impl FileSystemStorage {
    /// Open the storage in `base_dir`, loading `site.json` when present
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        ensure_dir(&base_dir)?;
        let site_path = base_dir.join(SITE_FILE);

        let snapshot = if site_path.exists() {
            read_snapshot(&site_path)?
        } else {
            debug!("No site file at {:?}, starting empty", site_path);
            SiteSnapshot::default()
        };

        Ok(Self {
            base_dir,
            site_path,
            memory: MemoryStore::from_snapshot(snapshot),
            write_lock: Mutex::new(()),
        })
    }

    /// Open the storage in the default data directory
    pub fn default_location() -> Result<Self> {
        Self::new(default_data_dir())
    }

    /// Replace the stored site with `snapshot` and write it out
    pub fn init_with(base_dir: impl Into<PathBuf>, snapshot: SiteSnapshot) -> Result<Self> {
        let base_dir = base_dir.into();
        ensure_dir(&base_dir)?;
        let site_path = base_dir.join(SITE_FILE);
        atomic_write(&site_path, &snapshot)?;
        info!("Initialized site at {:?}", site_path);

        Ok(Self {
            base_dir,
            site_path,
            memory: MemoryStore::from_snapshot(snapshot),
            write_lock: Mutex::new(()),
        })
    }

    /// Whether a site file exists in `base_dir`
    pub fn exists(base_dir: &Path) -> bool {
        base_dir.join(SITE_FILE).exists()
    }

    /// Base directory of this storage
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Copy of the current site
    pub fn snapshot(&self) -> Result<SiteSnapshot> {
        self.memory.snapshot()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| PressError::Store("write lock poisoned".to_string()))
    }

    /// Apply a mutation to a copy of the site, persist the copy, then swap it in
    ///
    /// Memory only changes once the file write has succeeded.
    fn mutate<T>(&self, op: impl FnOnce(&MemoryStore) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let scratch = MemoryStore::from_snapshot(self.memory.snapshot()?);
        let value = op(&scratch)?;
        let next = scratch.into_snapshot()?;
        atomic_write(&self.site_path, &next)?;
        self.memory.replace(next)?;
        Ok(value)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            PressError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;
        debug!("Created data directory: {:?}", dir);
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<SiteSnapshot> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PressError::FileNotFound(path.to_path_buf())
        } else {
            PressError::Io(e)
        }
    })?;
    let snapshot: SiteSnapshot = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PressError::from(e).with_context(format!("reading {}", path.display())))?;
    snapshot.check_version()?;
    Ok(snapshot)
}

/// Write the snapshot atomically (write to temp, then rename)
fn atomic_write(path: &Path, snapshot: &SiteSnapshot) -> Result<()> {
    let temp_path = path.with_file_name(format!(".{}.tmp", SITE_FILE));

    let temp_file = fs::File::create(&temp_path).map_err(|e| {
        PressError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create temp file: {}", e),
        ))
    })?;
    let mut writer = BufWriter::new(temp_file);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.flush()?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PressError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file: {}", e),
        ))
    })?;

    debug!("Saved site to {:?}", path);
    Ok(())
}

impl ContentStore for FileSystemStorage {
    fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>> {
        ContentStore::find_by_id(&self.memory, id)
    }

    fn find_first_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        self.memory.find_first_by_slug(slug)
    }

    fn inc_view_count(&self, id: ArticleId) -> Result<()> {
        self.mutate(|m| m.inc_view_count(id))
    }

    fn inc_comment_count(&self, id: ArticleId) -> Result<()> {
        self.mutate(|m| m.inc_comment_count(id))
    }

    fn list(&self) -> Result<Vec<Article>> {
        self.memory.list()
    }
}

impl CategoryStore for FileSystemStorage {
    fn find_active_by_article(&self, id: ArticleId) -> Result<Vec<ArticleCategory>> {
        self.memory.find_active_by_article(id)
    }
}

impl CommentStore for FileSystemStorage {
    fn inc_reply_count(&self, id: CommentId) -> Result<()> {
        self.mutate(|m| m.inc_reply_count(id))
    }

    fn save(&self, comment: Comment) -> Result<Comment> {
        self.mutate(|m| m.save(comment))
    }

    fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        CommentStore::find_by_id(&self.memory, id)
    }

    fn list_by_article(&self, id: ArticleId) -> Result<Vec<Comment>> {
        self.memory.list_by_article(id)
    }
}

impl OptionStore for FileSystemStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.memory.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|m| m.set(key, value))
    }
}

impl MenuStore for FileSystemStorage {
    fn list_menus(&self) -> Result<Vec<Menu>> {
        self.memory.list_menus()
    }
}

impl SessionResolver for FileSystemStorage {
    fn current_user(&self, token: Option<&str>) -> Result<Option<User>> {
        self.memory.current_user(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::comment::{CommentBuilder, CommentStatus};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileSystemStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            FileSystemStorage::init_with(temp_dir.path(), SiteSnapshot::sample()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_new_without_site_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp_dir.path().join("data")).unwrap();
        assert!(storage.list().unwrap().is_empty());
        assert!(!FileSystemStorage::exists(storage.base_dir()));
    }

    #[test]
    fn test_init_writes_site_file() {
        let (storage, temp_dir) = create_test_storage();
        assert!(FileSystemStorage::exists(temp_dir.path()));
        assert!(!temp_dir.path().join(".site.json.tmp").exists());
        assert_eq!(storage.list().unwrap().len(), 3);
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let (storage, temp_dir) = create_test_storage();
        storage.inc_view_count(ArticleId(1)).unwrap();
        let saved = storage
            .save(
                CommentBuilder::new(ArticleId(1))
                    .content("persisted")
                    .status(CommentStatus::Normal)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        storage.set("article_comment_review_enable", "true").unwrap();
        drop(storage);

        let reopened = FileSystemStorage::new(temp_dir.path()).unwrap();
        let article = ContentStore::find_by_id(&reopened, ArticleId(1))
            .unwrap()
            .unwrap();
        assert_eq!(article.view_count, 1);
        let comment = CommentStore::find_by_id(&reopened, saved.id.unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(comment.content, "persisted");
        assert_eq!(
            reopened.get_bool("article_comment_review_enable").unwrap(),
            Some(true)
        );
    }

    #[test]
    fn test_failed_mutation_does_not_write() {
        let (storage, temp_dir) = create_test_storage();
        let before = fs::read_to_string(temp_dir.path().join(SITE_FILE)).unwrap();
        assert!(storage.inc_comment_count(ArticleId(404)).is_err());
        let after = fs::read_to_string(temp_dir.path().join(SITE_FILE)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let (storage, temp_dir) = create_test_storage();
        // a directory where the temp file goes makes the write fail
        let blocker = temp_dir.path().join(".site.json.tmp");
        fs::create_dir(&blocker).unwrap();

        let result = storage.save(
            CommentBuilder::new(ArticleId(1))
                .content("lost")
                .status(CommentStatus::Normal)
                .build()
                .unwrap(),
        );
        assert!(result.is_err());
        assert!(storage.list_by_article(ArticleId(1)).unwrap().is_empty());

        fs::remove_dir(&blocker).unwrap();
        storage.inc_view_count(ArticleId(1)).unwrap();
        drop(storage);

        let reopened = FileSystemStorage::new(temp_dir.path()).unwrap();
        assert!(reopened.list_by_article(ArticleId(1)).unwrap().is_empty());
        let article = ContentStore::find_by_id(&reopened, ArticleId(1))
            .unwrap()
            .unwrap();
        assert_eq!(article.view_count, 1);
    }

    #[test]
    fn test_corrupt_site_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SITE_FILE), "{ not json").unwrap();
        assert!(FileSystemStorage::new(temp_dir.path()).is_err());
    }

    #[test]
    fn test_unsupported_version() {
        let temp_dir = TempDir::new().unwrap();
        let mut snapshot = SiteSnapshot::default();
        snapshot.schema_version = "2.0".to_string();
        fs::write(
            temp_dir.path().join(SITE_FILE),
            serde_json::to_string(&snapshot).unwrap(),
        )
        .unwrap();
        assert!(matches!(
            FileSystemStorage::new(temp_dir.path()),
            Err(PressError::Validation(_))
        ));
    }
}
