pub mod hasher;
pub mod manifest;

pub mod prelude {
    pub use crate::hasher::{hash_bytes, hash_file};
    pub use crate::manifest::{
        Manifest, ManifestEntry, build_manifest, write_manifest, DEFAULT_MANIFEST_PATH,
        DEFAULT_ROOTS,
    };
}
