use serde_json::Value;

use crate::post::{
	self, Post, SENTIMENT_LABEL_PLACEHOLDER, SENTIMENT_SCORE_PLACEHOLDER,
};

pub const FALLBACK_TITLE: &str = "untitled";
pub const FALLBACK_AUTHOR: &str = "unknown user";

/// Where a field may live on a raw search record.
///
/// Upstream has shipped at least two response generations: one with the
/// descriptive fields under a `note_card` object on the record, another with
/// the same object nested under `model.note_card`. Generations are not
/// uniform within a single response, so the container is detected per
/// record. Adding a further generation means extending [`note_card`] and
/// these tables, not growing a branch chain.
#[derive(Clone, Copy, Debug)]
enum Slot {
	/// Path relative to the detected note-card object.
	Card(&'static [&'static str]),
	/// Path relative to the record root.
	Top(&'static [&'static str]),
}

const ID_SLOTS: &[Slot] = &[Slot::Top(&["id"]), Slot::Top(&["note_id"])];
const TITLE_SLOTS: &[Slot] = &[
	Slot::Card(&["display_title"]),
	Slot::Card(&["title"]),
	Slot::Top(&["display_title"]),
	Slot::Top(&["title"]),
];
const CONTENT_SLOTS: &[Slot] = &[Slot::Card(&["desc"]), Slot::Top(&["desc"])];
const AUTHOR_SLOTS: &[Slot] =
	&[Slot::Card(&["user", "nickname"]), Slot::Top(&["user", "nickname"])];
const LIKES_SLOTS: &[Slot] = &[
	Slot::Card(&["interact_info", "liked_count"]),
	Slot::Top(&["interact_info", "liked_count"]),
];
const CREATED_AT_SLOTS: &[Slot] = &[Slot::Card(&["time"]), Slot::Top(&["time"])];

/// Convert one schema-ambiguous raw record into the canonical post shape.
/// Total: every field has a terminal default, so any JSON value (including
/// the empty object) normalizes without error.
pub fn normalize(raw: &Value, keyword: &str) -> Post {
	let card = note_card(raw);
	let post_id = first_string(raw, card, ID_SLOTS).unwrap_or_default();
	let url = post::explore_url(&post_id);

	Post {
		title: first_string(raw, card, TITLE_SLOTS).unwrap_or_else(|| FALLBACK_TITLE.to_string()),
		content: first_string(raw, card, CONTENT_SLOTS).unwrap_or_default(),
		author: first_string(raw, card, AUTHOR_SLOTS)
			.unwrap_or_else(|| FALLBACK_AUTHOR.to_string()),
		likes: likes(raw, card),
		created_at: first_stamp(raw, card, CREATED_AT_SLOTS).unwrap_or_default(),
		keyword: keyword.to_string(),
		sentiment_score: SENTIMENT_SCORE_PLACEHOLDER,
		sentiment_label: SENTIMENT_LABEL_PLACEHOLDER.to_string(),
		post_id,
		url,
	}
}

/// Detect the note-card container for this record: `note_card` when it is an
/// object, else `model.note_card`.
fn note_card(raw: &Value) -> Option<&Value> {
	[raw.get("note_card"), raw.get("model").and_then(|model| model.get("note_card"))]
		.into_iter()
		.flatten()
		.find(|value| value.is_object())
}

fn resolve<'a>(raw: &'a Value, card: Option<&'a Value>, slot: &Slot) -> Option<&'a Value> {
	let (root, path) = match slot {
		Slot::Card(path) => (card?, *path),
		Slot::Top(path) => (raw, *path),
	};

	path.iter().try_fold(root, |value, key| value.get(key))
}

/// First slot holding a non-empty string.
fn first_string(raw: &Value, card: Option<&Value>, slots: &[Slot]) -> Option<String> {
	slots
		.iter()
		.filter_map(|slot| resolve(raw, card, slot))
		.filter_map(Value::as_str)
		.find(|text| !text.is_empty())
		.map(str::to_string)
}

/// First slot holding a non-zero count. A zero `liked_count` under the note
/// card is indistinguishable from an absent one, so it falls through to the
/// top-level slot; when every slot is zero or absent the count is 0.
fn likes(raw: &Value, card: Option<&Value>) -> u64 {
	LIKES_SLOTS
		.iter()
		.filter_map(|slot| resolve(raw, card, slot))
		.filter_map(count_value)
		.find(|count| *count > 0)
		.unwrap_or(0)
}

/// Counts arrive as JSON numbers or numeric strings depending on the
/// upstream generation; anything else counts as absent.
fn count_value(value: &Value) -> Option<u64> {
	match value {
		Value::Number(number) => number.as_u64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

/// Timestamps are opaque and passed through unparsed; numeric epoch values
/// are stringified as-is.
fn first_stamp(raw: &Value, card: Option<&Value>, slots: &[Slot]) -> Option<String> {
	slots.iter().filter_map(|slot| resolve(raw, card, slot)).find_map(|value| match value {
		Value::String(text) if !text.is_empty() => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	})
}
