//! Product image list state.
//!
//! The form edits a mixed list of already-persisted images and freshly
//! attached local files. Nothing touches the network until submit: removals
//! of persisted images are soft (queued for deletion), local files wait in
//! memory, and positions plus the primary flag are derived from list order
//! at submit time.

use arenda_core::ImageId;
use uuid::Uuid;

use crate::api::types::{ImagePlacement, ImageUpload, ProductImage};

/// A file attached in this session, not yet uploaded.
#[derive(Debug, Clone)]
pub struct LocalImage {
    /// Stable handle for list operations before a server id exists.
    pub handle: Uuid,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One entry in the editable image list.
#[derive(Debug, Clone)]
pub enum ImageEntry {
    Persisted(ProductImage),
    Local(LocalImage),
}

impl ImageEntry {
    /// Server id, when the entry is persisted.
    #[must_use]
    pub fn image_id(&self) -> Option<ImageId> {
        match self {
            Self::Persisted(image) => Some(image.id),
            Self::Local(_) => None,
        }
    }
}

/// Handle addressing one entry regardless of persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef {
    Persisted(ImageId),
    Local(Uuid),
}

/// The form's editable image list.
///
/// Display order is the vector order; the primary image is tracked by index
/// and follows its entry when the list is rearranged.
#[derive(Debug, Clone, Default)]
pub struct ImageList {
    entries: Vec<ImageEntry>,
    primary: Option<usize>,
    removed: Vec<ImageId>,
}

impl ImageList {
    /// Build the list from a loaded product's images, sorted by position.
    #[must_use]
    pub fn from_persisted(mut images: Vec<ProductImage>) -> Self {
        images.sort_by_key(|image| image.position);
        let primary = images.iter().position(|image| image.is_primary);
        let primary = primary.or(if images.is_empty() { None } else { Some(0) });
        Self {
            entries: images.into_iter().map(ImageEntry::Persisted).collect(),
            primary,
            removed: Vec::new(),
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Whether the list shows no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persisted image ids queued for deletion on submit.
    #[must_use]
    pub fn removed_ids(&self) -> &[ImageId] {
        &self.removed
    }

    /// Whether the entry at `index` is the primary image.
    #[must_use]
    pub fn is_primary(&self, index: usize) -> bool {
        self.primary == Some(index)
    }

    /// Attach a local file at the end of the list.
    ///
    /// The first image added to an empty list becomes primary.
    pub fn add_local(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Uuid {
        let handle = Uuid::new_v4();
        self.entries.push(ImageEntry::Local(LocalImage {
            handle,
            file_name: file_name.into(),
            bytes,
        }));
        if self.primary.is_none() {
            self.primary = Some(self.entries.len() - 1);
        }
        handle
    }

    /// Remove an entry.
    ///
    /// Persisted entries are queued for deletion on submit; local entries
    /// are dropped outright. If the primary image is removed, the first
    /// remaining entry becomes primary.
    pub fn remove(&mut self, target: ImageRef) {
        let Some(index) = self.index_of(target) else {
            return;
        };
        if let ImageEntry::Persisted(image) = &self.entries[index] {
            self.removed.push(image.id);
        }
        self.entries.remove(index);

        self.primary = match self.primary {
            Some(p) if p == index => {
                if self.entries.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Some(p) if p > index => Some(p - 1),
            other => other,
        };
    }

    /// Mark an entry as the primary image.
    pub fn set_primary(&mut self, target: ImageRef) {
        if let Some(index) = self.index_of(target) {
            self.primary = Some(index);
        }
    }

    /// Move an entry to a new display position.
    pub fn move_to(&mut self, target: ImageRef, new_index: usize) {
        let Some(index) = self.index_of(target) else {
            return;
        };
        let new_index = new_index.min(self.entries.len().saturating_sub(1));
        if index == new_index {
            return;
        }
        let primary_ref = self.primary.map(|p| self.entry_ref(p));
        let entry = self.entries.remove(index);
        self.entries.insert(new_index, entry);
        self.primary = primary_ref.and_then(|r| self.index_of(r));
    }

    /// Local files to upload on submit, positioned by final display order.
    ///
    /// Positions are 1-based over the whole visible list, so persisted and
    /// new images interleave correctly.
    #[must_use]
    pub fn pending_uploads(&self) -> Vec<ImageUpload> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                ImageEntry::Local(local) => Some(ImageUpload {
                    file_name: local.file_name.clone(),
                    bytes: local.bytes.clone(),
                    position: position_of(index),
                    is_primary: self.primary == Some(index),
                }),
                ImageEntry::Persisted(_) => None,
            })
            .collect()
    }

    /// Final placements for the persisted images, for one reorder call.
    #[must_use]
    pub fn placements(&self) -> Vec<ImagePlacement> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                ImageEntry::Persisted(image) => Some(ImagePlacement {
                    id: image.id,
                    position: position_of(index),
                    is_primary: self.primary == Some(index),
                }),
                ImageEntry::Local(_) => None,
            })
            .collect()
    }

    fn index_of(&self, target: ImageRef) -> Option<usize> {
        self.entries.iter().position(|entry| match (entry, target) {
            (ImageEntry::Persisted(image), ImageRef::Persisted(id)) => image.id == id,
            (ImageEntry::Local(local), ImageRef::Local(handle)) => local.handle == handle,
            _ => false,
        })
    }

    fn entry_ref(&self, index: usize) -> ImageRef {
        match &self.entries[index] {
            ImageEntry::Persisted(image) => ImageRef::Persisted(image.id),
            ImageEntry::Local(local) => ImageRef::Local(local.handle),
        }
    }
}

const fn position_of(index: usize) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        index as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(id: i32, position: u32, is_primary: bool) -> ProductImage {
        ProductImage {
            id: ImageId::new(id),
            url: format!("https://cdn.example.com/{id}.jpg"),
            position,
            is_primary,
        }
    }

    #[test]
    fn test_first_added_image_becomes_primary() {
        let mut list = ImageList::default();
        let first = list.add_local("a.jpg", vec![1]);
        list.add_local("b.jpg", vec![2]);
        assert!(list.is_primary(0));
        assert!(!list.is_primary(1));
        let _ = first;
    }

    #[test]
    fn test_removing_primary_reassigns_to_first() {
        let mut list = ImageList::from_persisted(vec![
            persisted(1, 1, true),
            persisted(2, 2, false),
            persisted(3, 3, false),
        ]);
        list.remove(ImageRef::Persisted(ImageId::new(1)));
        assert!(list.is_primary(0));
        assert_eq!(list.removed_ids(), &[ImageId::new(1)]);
    }

    #[test]
    fn test_removing_local_leaves_no_deletion() {
        let mut list = ImageList::default();
        let handle = list.add_local("a.jpg", vec![1]);
        list.remove(ImageRef::Local(handle));
        assert!(list.is_empty());
        assert!(list.removed_ids().is_empty());
    }

    #[test]
    fn test_primary_follows_entry_through_moves() {
        let mut list = ImageList::from_persisted(vec![
            persisted(1, 1, false),
            persisted(2, 2, true),
            persisted(3, 3, false),
        ]);
        list.move_to(ImageRef::Persisted(ImageId::new(2)), 0);
        assert!(list.is_primary(0));

        let placements = list.placements();
        assert_eq!(placements[0].id, ImageId::new(2));
        assert_eq!(placements[0].position, 1);
        assert!(placements[0].is_primary);
        assert_eq!(placements[1].id, ImageId::new(1));
        assert_eq!(placements[1].position, 2);
    }

    #[test]
    fn test_pending_uploads_interleave_with_persisted() {
        let mut list = ImageList::from_persisted(vec![persisted(1, 1, true)]);
        let handle = list.add_local("new.jpg", vec![0xFF]);
        list.move_to(ImageRef::Local(handle), 0);

        let uploads = list.pending_uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].position, 1);
        assert!(!uploads[0].is_primary);

        let placements = list.placements();
        assert_eq!(placements[0].position, 2);
        assert!(placements[0].is_primary);
    }

    #[test]
    fn test_from_persisted_sorts_by_position() {
        let list = ImageList::from_persisted(vec![
            persisted(2, 5, false),
            persisted(1, 1, true),
        ]);
        assert_eq!(list.entries()[0].image_id(), Some(ImageId::new(1)));
        assert!(list.is_primary(0));
    }
}
