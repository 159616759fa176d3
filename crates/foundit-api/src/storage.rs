use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

/// Object buckets. Each maps to a subdirectory of the storage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    ItemImages,
    Avatars,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::ItemImages, Bucket::Avatars];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::ItemImages => "item-images",
            Bucket::Avatars => "avatars",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Path inside the bucket: `{owner_id}/{object_id}.{ext}`.
    pub path: String,
    pub url: String,
}

/// Local-disk object store for uploaded images.
///
/// Objects live at `{dir}/{bucket}/{owner_id}/{object_id}.{ext}` and are
/// served back under `{public_base}/storage/{bucket}/...`.
pub struct Storage {
    dir: PathBuf,
    public_base: String,
}

impl Storage {
    pub async fn new(dir: PathBuf, public_base: impl Into<String>) -> Result<Self> {
        for bucket in Bucket::ALL {
            fs::create_dir_all(dir.join(bucket.as_str())).await?;
        }
        info!("Object storage directory: {}", dir.display());
        Ok(Self {
            dir,
            public_base: public_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.dir
    }

    fn object_file(&self, bucket: Bucket, path: &str) -> PathBuf {
        self.dir.join(bucket.as_str()).join(path)
    }

    pub fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/storage/{}/{}", self.public_base, bucket.as_str(), path)
    }

    /// Recover the in-bucket path from a URL this store handed out.
    /// Returns `None` for foreign URLs or anything that isn't `{uuid}/{uuid}.{ext}`.
    pub fn path_from_public_url(&self, bucket: Bucket, url: &str) -> Option<String> {
        let marker = format!("/storage/{}/", bucket.as_str());
        let idx = url.find(&marker)?;
        let path = &url[idx + marker.len()..];
        is_object_path(path).then(|| path.to_string())
    }

    /// Store `data` under a fresh object id in the owner's namespace.
    pub async fn put(&self, bucket: Bucket, owner: Uuid, ext: &str, data: &[u8]) -> Result<StoredObject> {
        let path = format!("{}/{}.{}", owner, Uuid::new_v4(), ext);
        let file_path = self.object_file(bucket, &path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create_new(&file_path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        info!("Stored {} bytes at {}/{}", data.len(), bucket.as_str(), path);
        Ok(StoredObject {
            url: self.public_url(bucket, &path),
            path,
        })
    }

    /// Delete a stored object. Missing objects are not an error.
    pub async fn delete(&self, bucket: Bucket, path: &str) -> Result<()> {
        if !is_object_path(path) {
            bail!("Refusing to delete malformed object path '{}'", path);
        }
        match fs::remove_file(self.object_file(bucket, path)).await {
            Ok(()) => {
                info!("Deleted object {}/{}", bucket.as_str(), path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Object {}/{} already gone", bucket.as_str(), path);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Owner id from an in-bucket path (`{owner_id}/{object_id}.{ext}`).
pub fn object_owner(path: &str) -> Option<Uuid> {
    if !is_object_path(path) {
        return None;
    }
    path.split_once('/').and_then(|(owner, _)| owner.parse().ok())
}

fn is_object_path(path: &str) -> bool {
    let Some((owner, file)) = path.split_once('/') else {
        return false;
    };
    let Some((id, ext)) = file.split_once('.') else {
        return false;
    };
    owner.parse::<Uuid>().is_ok()
        && id.parse::<Uuid>().is_ok()
        && !ext.is_empty()
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_storage() -> Storage {
        let dir = std::env::temp_dir().join(format!("foundit-storage-{}", Uuid::new_v4()));
        Storage::new(dir, "http://localhost:3000/").await.unwrap()
    }

    #[tokio::test]
    async fn test_put_then_delete() {
        let storage = temp_storage().await;
        let owner = Uuid::new_v4();

        let obj = storage.put(Bucket::ItemImages, owner, "png", b"fake-png").await.unwrap();
        assert!(obj.path.starts_with(&owner.to_string()));
        assert!(obj.url.starts_with("http://localhost:3000/storage/item-images/"));

        let on_disk = storage.root().join("item-images").join(&obj.path);
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"fake-png");

        storage.delete(Bucket::ItemImages, &obj.path).await.unwrap();
        assert!(!on_disk.exists());
        // second delete is a no-op
        storage.delete(Bucket::ItemImages, &obj.path).await.unwrap();
    }

    #[tokio::test]
    async fn test_path_from_public_url() {
        let storage = temp_storage().await;
        let obj = storage.put(Bucket::Avatars, Uuid::new_v4(), "jpg", b"x").await.unwrap();

        assert_eq!(storage.path_from_public_url(Bucket::Avatars, &obj.url), Some(obj.path.clone()));
        assert_eq!(storage.path_from_public_url(Bucket::ItemImages, &obj.url), None);
        assert_eq!(
            storage.path_from_public_url(Bucket::Avatars, "https://cdn.example.com/cat.jpg"),
            None
        );
        assert_eq!(
            storage.path_from_public_url(Bucket::Avatars, "http://h/storage/avatars/../../etc/passwd"),
            None
        );
    }

    #[tokio::test]
    async fn test_object_owner() {
        let storage = temp_storage().await;
        let owner = Uuid::new_v4();
        let obj = storage.put(Bucket::ItemImages, owner, "png", b"x").await.unwrap();

        assert_eq!(object_owner(&obj.path), Some(owner));
        assert_eq!(object_owner("not-a-uuid/x.png"), None);
        assert_eq!(object_owner("../secrets.txt"), None);
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let storage = temp_storage().await;
        assert!(storage.delete(Bucket::Avatars, "../secrets.txt").await.is_err());
    }
}
