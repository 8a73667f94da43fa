//! Segments (faculties): the fixed catalog users pick from.
//!
//! Each segment carries an explicit stable id. Postback payloads reference the
//! id, never the position in the catalog, so reordering or inserting entries
//! does not change what an already-delivered button selects.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One selectable segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
  pub id:   u32,
  /// Human-readable name; also the stored value and the remote tag name.
  pub name: String,
}

impl Segment {
  pub fn new(id: u32, name: impl Into<String>) -> Self {
    Self { id, name: name.into() }
  }
}

/// Faculties of the university, in display order.
const DEFAULT_SEGMENTS: [&str; 8] = [
  "คณะวิศวกรรมศาสตร์",
  "คณะวิทยาศาสตร์",
  "คณะบริหารธุรกิจ",
  "คณะนิติศาสตร์",
  "คณะมนุษยศาสตร์",
  "คณะแพทยศาสตร์",
  "คณะสถาปัตยกรรมศาสตร์",
  "คณะศึกษาศาสตร์",
];

/// An ordered, validated list of segments.
///
/// Ids and names are unique. Order only affects how buttons are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentCatalog {
  segments: Vec<Segment>,
}

impl SegmentCatalog {
  /// Build a catalog, rejecting empty lists, blank names and duplicates.
  pub fn new(segments: Vec<Segment>) -> Result<Self> {
    if segments.is_empty() {
      return Err(Error::EmptyCatalog);
    }

    let mut ids   = HashSet::new();
    let mut names = HashSet::new();
    for segment in &segments {
      if segment.name.trim().is_empty() {
        return Err(Error::BlankSegmentName(segment.id));
      }
      if !ids.insert(segment.id) {
        return Err(Error::DuplicateSegmentId(segment.id));
      }
      if !names.insert(segment.name.as_str()) {
        return Err(Error::DuplicateSegmentName(segment.name.clone()));
      }
    }

    Ok(Self { segments })
  }

  pub fn by_id(&self, id: u32) -> Option<&Segment> {
    self.segments.iter().find(|s| s.id == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Segment> { self.segments.iter() }

  pub fn len(&self) -> usize { self.segments.len() }

  pub fn is_empty(&self) -> bool { self.segments.is_empty() }

  /// Up to `limit` segments starting at display position `offset`.
  pub fn page(&self, offset: usize, limit: usize) -> &[Segment] {
    let start = offset.min(self.segments.len());
    let end   = start.saturating_add(limit).min(self.segments.len());
    &self.segments[start..end]
  }
}

impl Default for SegmentCatalog {
  /// The built-in faculty list, with ids `0..8` in display order.
  fn default() -> Self {
    let segments = DEFAULT_SEGMENTS
      .iter()
      .zip(0u32..)
      .map(|(name, id)| Segment::new(id, *name))
      .collect();
    Self { segments }
  }
}
