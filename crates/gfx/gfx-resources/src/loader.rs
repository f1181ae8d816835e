//! Per-test bitmap pool
//!
//! A [`BitmapPool`] decodes mapped resources on demand and keeps the results
//! for as long as the pool lives. Bitmaps are handed out as [`Rc`] handles so
//! a test can hold on to one while asking for more; everything is released
//! when the pool is dropped at the end of the test.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::bitmap::{Bitmap, BitmapFormat};
use crate::error::ResourceError;
use crate::mapper::ResourceMap;

/// Decoded bitmaps, cached by asset name and pixel format.
#[derive(Debug, Default)]
pub struct BitmapPool {
    cache: RefCell<HashMap<(String, BitmapFormat), Rc<Bitmap>>>,
}

impl BitmapPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load resource `id` as an 8-bit bitmap.
    pub fn load_image(&self, resources: &ResourceMap, id: u32) -> Option<Rc<Bitmap>> {
        self.load_image_ex(resources, id, BitmapFormat::Bit8)
    }

    /// Load resource `id` in `format`.
    ///
    /// Returns `None` when the id is unmapped, the asset cannot be read or
    /// decoded, or the image does not fit `format`. The reason is logged.
    pub fn load_image_ex(
        &self,
        resources: &ResourceMap,
        id: u32,
        format: BitmapFormat,
    ) -> Option<Rc<Bitmap>> {
        match self.try_load(resources, id, format) {
            Ok(bitmap) => Some(bitmap),
            Err(e) => {
                tracing::warn!(id, %format, error = %e, "could not load image");
                None
            }
        }
    }

    /// Load resource `id` in `format`, reporting why it failed.
    pub fn try_load(
        &self,
        resources: &ResourceMap,
        id: u32,
        format: BitmapFormat,
    ) -> Result<Rc<Bitmap>, ResourceError> {
        let name = resources.resolve(id).ok_or(ResourceError::Unmapped(id))?;
        let key = (name.to_owned(), format);
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Ok(Rc::clone(hit));
        }

        let bytes = resources.read(id)?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| ResourceError::Decode {
            name: name.to_owned(),
            source,
        })?;
        let bitmap = Rc::new(Bitmap::from_rgba(&decoded.to_rgba8(), format)?);
        tracing::debug!(
            id,
            name,
            %format,
            width = bitmap.width(),
            height = bitmap.height(),
            "decoded image"
        );

        self.cache.borrow_mut().insert(key, Rc::clone(&bitmap));
        Ok(bitmap)
    }

    /// Number of cached bitmaps
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// `true` if nothing has been decoded yet
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::asset_store::MemoryAssets;

    // 2x1 ASCII pixmap: red, white
    const PPM: &[u8] = b"P3\n2 1\n255\n255 0 0  255 255 255\n";

    fn resources() -> ResourceMap {
        let mut map = ResourceMap::new(
            MemoryAssets::new()
                .with_asset("pair.ppm", PPM)
                .with_asset("junk.ppm", b"not an image".as_slice()),
        );
        assert!(map.map_resource("pair.ppm", 1));
        assert!(map.map_resource("junk.ppm", 2));
        map
    }

    #[test]
    fn loads_and_caches() {
        let map = resources();
        let pool = BitmapPool::new();
        let a = pool.load_image(&map, 1).unwrap();
        let b = pool.load_image(&map, 1).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(pool.len(), 1);
        assert_eq!(a.pixel(0, 0), Some(gfx_types::Color::RED));
        assert_eq!(a.pixel(1, 0), Some(gfx_types::Color::WHITE));
    }

    #[test]
    fn formats_are_cached_separately() {
        let map = resources();
        let pool = BitmapPool::new();
        let bit8 = pool.load_image(&map, 1).unwrap();
        let bit1 = pool.load_image_ex(&map, 1, BitmapFormat::Bit1).unwrap();
        assert_eq!(bit8.format(), BitmapFormat::Bit8);
        assert_eq!(bit1.format(), BitmapFormat::Bit1);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn unmapped_id_is_absent() {
        let map = resources();
        let pool = BitmapPool::new();
        assert!(pool.load_image(&map, 99).is_none());
        assert!(matches!(
            pool.try_load(&map, 99, BitmapFormat::Bit8),
            Err(ResourceError::Unmapped(99))
        ));
        assert!(pool.is_empty());
    }

    #[test]
    fn undecodable_asset_is_absent() {
        let map = resources();
        let pool = BitmapPool::new();
        assert!(pool.load_image(&map, 2).is_none());
        assert!(matches!(
            pool.try_load(&map, 2, BitmapFormat::Bit8),
            Err(ResourceError::Decode { .. })
        ));
    }

    #[test]
    fn two_colors_fit_a_one_bit_palette() {
        let map = resources();
        let pool = BitmapPool::new();
        assert!(pool.load_image_ex(&map, 1, BitmapFormat::Bit1Palette).is_some());
    }
}
