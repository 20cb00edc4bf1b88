use std::collections::HashSet;
use std::ops::RangeInclusive;

use uuid::Uuid;

use crate::unity::Document;

/// Range generated fileIds are drawn from.
///
/// Unity's built-in objects use ids below 10 000 and legacy prefab-internal ids
/// stay below 1e9, so nothing Unity writes on its own lands in this range.
pub const ID_RANGE: RangeInclusive<i64> = 1_000_000_000..=9_999_999_999;

const RANDOM_ATTEMPTS: usize = 32;

/// Draw one fileId not present in `existing` and record it there.
pub fn next_id(existing: &mut HashSet<i64>) -> i64 {
	let span = (ID_RANGE.end() - ID_RANGE.start() + 1) as u128;
	for _ in 0..RANDOM_ATTEMPTS {
		let candidate = ID_RANGE.start() + (Uuid::new_v4().as_u128() % span) as i64;
		if candidate != 0 && existing.insert(candidate) {
			return candidate;
		}
	}

	// Dense sets: probe upward from a random start, wrapping once.
	let start = ID_RANGE.start() + (Uuid::new_v4().as_u128() % span) as i64;
	let probe = (start..=*ID_RANGE.end()).chain(*ID_RANGE.start()..start);
	for candidate in probe {
		if existing.insert(candidate) {
			return candidate;
		}
	}
	unreachable!("fileId range exhausted")
}

/// Allocator seeded with every id of a document; ids it hands out never repeat.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
	used: HashSet<i64>,
}

impl IdAllocator {
	/// Seed with the ids already present in `doc`.
	pub fn for_document(doc: &Document) -> Self {
		Self { used: doc.ids() }
	}

	/// Seed with an explicit id set.
	pub fn with_used(used: HashSet<i64>) -> Self {
		Self { used }
	}

	/// Reserve additional ids (for example those of a second document).
	pub fn reserve(&mut self, ids: impl IntoIterator<Item = i64>) {
		self.used.extend(ids);
	}

	/// Fresh, collision-free id.
	pub fn next(&mut self) -> i64 {
		next_id(&mut self.used)
	}

	/// Whether `id` is taken.
	pub fn is_used(&self, id: i64) -> bool {
		self.used.contains(&id)
	}
}
