//! Reference image resources for graphics tests.
//!
//! Tests name their reference images by a numeric resource id. This crate
//! provides the pieces behind that id:
//!
//! - [`AssetStore`]: raw asset bytes by name ([`MemoryAssets`], [`DirAssets`])
//! - [`ResourceMap`]: the name → id table tests fill with `map_resource`
//! - [`BitmapPool`]: decodes ids into immutable [`Bitmap`]s for one test
//!
//! ```
//! use gfx_resources::{BitmapPool, MemoryAssets, ResourceMap};
//!
//! let store = MemoryAssets::new().with_asset("dot.pbm", b"P1 1 1 1".as_slice());
//! let mut resources = ResourceMap::new(store);
//! assert!(resources.map_resource("dot.pbm", 3));
//!
//! let pool = BitmapPool::new();
//! let bitmap = pool.load_image(&resources, 3).unwrap();
//! assert_eq!((bitmap.width(), bitmap.height()), (1, 1));
//! ```

mod asset_store;
mod bitmap;
mod error;
mod loader;
mod mapper;

pub use asset_store::{AssetStore, DirAssets, MemoryAssets};
pub use bitmap::{Bitmap, BitmapFormat};
pub use error::ResourceError;
pub use loader::BitmapPool;
pub use mapper::ResourceMap;
