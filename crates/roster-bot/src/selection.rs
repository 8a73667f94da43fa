//! Segment-selection button templates and their postback payloads.
//!
//! The [`ButtonLayout::Standard`] first page carries catalog entries `0..4`
//! plus a "more" button when the catalog is longer; its second page carries
//! entries `4..8` and entries past the eighth are unreachable.
//! [`ButtonLayout::Compact`] pages through the whole catalog three segments
//! at a time, each page ending in a "more" button while entries remain.

use roster_core::{
  message::{Action, Message, Template},
  segment::{Segment, SegmentCatalog},
};
use serde::Deserialize;

/// Segments per page in the standard layout.
pub const BUTTONS_PER_PAGE: usize = 4;

/// Actions the platform accepts in one buttons template.
pub const MAX_TEMPLATE_ACTIONS: usize = 4;

/// Labels longer than this many characters are truncated.
pub const LABEL_MAX_CHARS: usize = 12;

pub const FACULTY_PREFIX: &str = "faculty_";

pub const MORE_FACULTIES: &str = "more_faculties";

const TITLE: &str = "เลือกคณะของคุณ";
const TEXT: &str = "กรุณาเลือกคณะที่คุณสังกัด";
const ALT_TEXT_MORE: &str = "เลือกคณะของคุณ (เพิ่มเติม)";
const MORE_LABEL: &str = "ดูคณะเพิ่มเติม";

/// How segments are spread across buttons templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLayout {
  /// Four segments plus "more" on the first page. That is one action over
  /// [`MAX_TEMPLATE_ACTIONS`], so the platform may reject the first page
  /// together with any message sent in the same reply.
  #[default]
  Standard,
  /// Three segments plus "more" per page, never over the action limit.
  Compact,
}

impl ButtonLayout {
  fn segments_per_page(self) -> usize {
    match self {
      ButtonLayout::Standard => BUTTONS_PER_PAGE,
      ButtonLayout::Compact => MAX_TEMPLATE_ACTIONS - 1,
    }
  }
}

/// A parsed postback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
  /// `faculty_<id>` with a well-formed id (which may still be unknown).
  Segment(u32),
  /// `more_faculties`, or `more_faculties_<offset>` for a later page.
  More(Option<usize>),
  /// A known prefix followed by something that is not a number.
  Malformed,
  /// Any other payload.
  Unrecognised,
}

impl Selection {
  pub fn parse(data: &str) -> Self {
    if data == MORE_FACULTIES {
      return Selection::More(None);
    }
    if let Some(offset) = data.strip_prefix(MORE_FACULTIES).and_then(|r| r.strip_prefix('_')) {
      return offset.parse().map_or(Selection::Malformed, |o| Selection::More(Some(o)));
    }
    match data.strip_prefix(FACULTY_PREFIX) {
      Some(id) => id.parse().map_or(Selection::Malformed, Selection::Segment),
      None => Selection::Unrecognised,
    }
  }
}

/// Postback payload selecting `segment`.
pub fn segment_data(segment: &Segment) -> String { format!("{FACULTY_PREFIX}{}", segment.id) }

/// Truncate `name` to [`LABEL_MAX_CHARS`] characters, marking the cut.
pub fn button_label(name: &str) -> String {
  if name.chars().count() > LABEL_MAX_CHARS {
    let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
    format!("{head}...")
  } else {
    name.to_owned()
  }
}

fn segment_action(segment: &Segment) -> Action {
  Action::Postback {
    label:        button_label(&segment.name),
    data:         segment_data(segment),
    display_text: segment.name.clone(),
  }
}

fn more_action(data: String) -> Action {
  Action::Postback {
    label:        MORE_LABEL.to_owned(),
    data,
    display_text: MORE_LABEL.to_owned(),
  }
}

fn buttons(alt_text: &str, actions: Vec<Action>) -> Message {
  Message::Template {
    alt_text: alt_text.to_owned(),
    template: Template::Buttons {
      title: TITLE.to_owned(),
      text: TEXT.to_owned(),
      actions,
    },
  }
}

/// Actions for the page starting at catalog position `offset`.
fn page_actions(catalog: &SegmentCatalog, layout: ButtonLayout, offset: usize) -> Vec<Action> {
  let per_page = layout.segments_per_page();
  let mut actions: Vec<Action> = catalog.page(offset, per_page).iter().map(segment_action).collect();

  let next = offset + per_page;
  if next < catalog.len() {
    match layout {
      ButtonLayout::Standard if offset == 0 => actions.push(more_action(MORE_FACULTIES.to_owned())),
      ButtonLayout::Standard => {}
      ButtonLayout::Compact => actions.push(more_action(format!("{MORE_FACULTIES}_{next}"))),
    }
  }
  actions
}

/// The initial selection prompt.
///
/// With [`ButtonLayout::Standard`] and more than four segments this page has
/// five actions, one over [`MAX_TEMPLATE_ACTIONS`].
pub fn first_page(catalog: &SegmentCatalog, layout: ButtonLayout) -> Message {
  buttons(TITLE, page_actions(catalog, layout, 0))
}

/// The follow-up prompt for a "more" button. `offset` defaults to the page
/// after the first. Returns `None` when no segment sits at `offset`.
pub fn more_page(catalog: &SegmentCatalog, layout: ButtonLayout, offset: Option<usize>) -> Option<Message> {
  let offset = offset.unwrap_or(layout.segments_per_page());
  if offset == 0 || offset >= catalog.len() {
    return None;
  }
  Some(buttons(ALT_TEXT_MORE, page_actions(catalog, layout, offset)))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn datas(msg: &Message) -> Vec<String> {
    msg
      .as_template()
      .unwrap()
      .actions()
      .iter()
      .map(|a| a.data().to_owned())
      .collect()
  }

  fn letters(n: u32) -> SegmentCatalog {
    SegmentCatalog::new((0..n).map(|i| Segment::new(i, format!("S{i}"))).collect()).unwrap()
  }

  #[test]
  fn parse_payloads() {
    assert_eq!(Selection::parse("faculty_3"), Selection::Segment(3));
    assert_eq!(Selection::parse("faculty_42"), Selection::Segment(42));
    assert_eq!(Selection::parse("more_faculties"), Selection::More(None));
    assert_eq!(Selection::parse("more_faculties_6"), Selection::More(Some(6)));
    assert_eq!(Selection::parse("more_faculties_x"), Selection::Malformed);
    assert_eq!(Selection::parse("faculty_"), Selection::Malformed);
    assert_eq!(Selection::parse("faculty_-1"), Selection::Malformed);
    assert_eq!(Selection::parse("faculty_x"), Selection::Malformed);
    assert_eq!(Selection::parse("richmenu"), Selection::Unrecognised);
  }

  #[test]
  fn first_page_has_four_segments_and_more() {
    let msg = first_page(&SegmentCatalog::default(), ButtonLayout::Standard);
    assert_eq!(
      datas(&msg),
      ["faculty_0", "faculty_1", "faculty_2", "faculty_3", "more_faculties"]
    );
  }

  #[test]
  fn first_page_without_more_for_short_catalog() {
    let catalog = SegmentCatalog::new(vec![Segment::new(9, "Law"), Segment::new(2, "Arts")]).unwrap();
    assert_eq!(datas(&first_page(&catalog, ButtonLayout::Standard)), ["faculty_9", "faculty_2"]);
    assert_eq!(datas(&first_page(&catalog, ButtonLayout::Compact)), ["faculty_9", "faculty_2"]);
  }

  #[test]
  fn second_page_covers_the_rest_up_to_four() {
    let catalog = SegmentCatalog::default();
    let msg  = more_page(&catalog, ButtonLayout::Standard, None).unwrap();
    let data = datas(&msg);
    assert_eq!(data, ["faculty_4", "faculty_5", "faculty_6", "faculty_7"]);
    let first = datas(&first_page(&catalog, ButtonLayout::Standard));
    assert!(data.iter().all(|d| !first.contains(d)));
  }

  #[test]
  fn standard_layout_drops_entries_past_the_eighth() {
    let data = datas(&more_page(&letters(10), ButtonLayout::Standard, None).unwrap());
    assert_eq!(data, ["faculty_4", "faculty_5", "faculty_6", "faculty_7"]);
  }

  #[test]
  fn compact_layout_stays_within_action_limit_and_reaches_every_segment() {
    let catalog = letters(8);

    let first = datas(&first_page(&catalog, ButtonLayout::Compact));
    assert_eq!(first, ["faculty_0", "faculty_1", "faculty_2", "more_faculties_3"]);

    let second = datas(&more_page(&catalog, ButtonLayout::Compact, Some(3)).unwrap());
    assert_eq!(second, ["faculty_3", "faculty_4", "faculty_5", "more_faculties_6"]);

    let third = datas(&more_page(&catalog, ButtonLayout::Compact, Some(6)).unwrap());
    assert_eq!(third, ["faculty_6", "faculty_7"]);

    for page in [&first, &second, &third] {
      assert!(page.len() <= MAX_TEMPLATE_ACTIONS);
    }
  }

  #[test]
  fn compact_plain_more_payload_opens_second_page() {
    let data = datas(&more_page(&letters(8), ButtonLayout::Compact, None).unwrap());
    assert_eq!(data[0], "faculty_3");
  }

  #[test]
  fn more_page_past_the_end_is_empty() {
    let catalog = letters(5);
    assert!(more_page(&catalog, ButtonLayout::Compact, Some(5)).is_none());
    assert!(more_page(&catalog, ButtonLayout::Compact, Some(0)).is_none());
    assert!(more_page(&letters(4), ButtonLayout::Standard, None).is_none());
  }

  #[test]
  fn layout_reads_from_config_names() {
    let layout: ButtonLayout = serde_json::from_str(r#""compact""#).unwrap();
    assert_eq!(layout, ButtonLayout::Compact);
    assert_eq!(ButtonLayout::default(), ButtonLayout::Standard);
  }

  #[test]
  fn labels_truncate_by_character() {
    assert_eq!(button_label("Law"), "Law");
    assert_eq!(button_label("abcdefghijkl"), "abcdefghijkl");
    assert_eq!(button_label("abcdefghijklm"), "abcdefghijkl...");
    // 17 Thai characters → first 12 plus the marker
    assert_eq!(button_label("คณะวิศวกรรมศาสตร์"), "คณะวิศวกรรมศ...");
  }
}
