use std::fs;
use std::io::Write;

use flate2::write::ZlibEncoder;
use topo_hash::{Hasher, ObjectId};
use topo_object::{header, ObjectType};

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Store `content` as an object of `obj_type` and return its id.
    ///
    /// Writing an object that already exists is a no-op. The compressed
    /// bytes go to a temp file in `objects/` first and are renamed into place.
    pub fn write_raw(&self, obj_type: ObjectType, content: &[u8]) -> Result<ObjectId, LooseError> {
        let hdr = header::write_header(obj_type, content.len());
        let oid = {
            let mut hasher = Hasher::new(self.hash_algo);
            hasher.update(&hdr);
            hasher.update(content);
            hasher.finalize()
        };

        if self.contains(&oid) {
            return Ok(oid);
        }

        let final_path = self.object_path(&oid);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = tempfile::NamedTempFile::new_in(&self.objects_dir)?;
        let mut encoder = ZlibEncoder::new(tmp, self.compression_level);
        encoder.write_all(&hdr)?;
        encoder.write_all(content)?;
        let tmp = encoder.finish()?;

        tmp.persist(&final_path).map_err(|e| LooseError::Io(e.error))?;
        log::debug!("wrote {} {}", obj_type, oid);
        Ok(oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_hash::HashAlgorithm;

    #[test]
    fn empty_blob_has_well_known_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path(), HashAlgorithm::Sha1);
        let oid = store.write_raw(ObjectType::Blob, b"").unwrap();
        assert_eq!(oid.to_hex(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
        assert!(store.object_path(&oid).is_file());
    }

    #[test]
    fn rewrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LooseObjectStore::open(dir.path(), HashAlgorithm::Sha1);
        store.set_compression_level(9);
        let a = store.write_raw(ObjectType::Blob, b"same").unwrap();
        let b = store.write_raw(ObjectType::Blob, b"same").unwrap();
        assert_eq!(a, b);
    }
}
