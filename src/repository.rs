use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("every id up to {} has been used", Id::MAX)]
	IdsExhausted,
}

/// The identifier type shared by every stored entity.
pub type Id = i64;

/// A record that can be stored in a [`Repository`].
///
/// The repository owns identity assignment, so entities only need to
/// expose their id and accept the one they are given.
pub trait Entity: Clone {
	fn id(&self) -> Option<Id>;
	fn set_id(&mut self, id: Id);
}

/// An in-memory collection of entities of a single type.
///
/// Records are iterated in insertion order and looked up by id in constant time.
/// Ids are handed out from a counter that only moves forward, so an id is never
/// given to a second record, even after the first one is removed.
#[derive(Debug)]
pub struct Repository<T> {
	inner: RwLock<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
	/// The largest id ever assigned or stored.
	last_id: Id,
	next_slot: u64,
	/// Maps an id to its insertion slot in `records`.
	slots: HashMap<Id, u64>,
	records: BTreeMap<u64, T>,
}

impl<T> Default for Repository<T> {
	fn default() -> Self {
		Self {
			inner: RwLock::new(Inner {
				last_id: 0,
				next_slot: 0,
				slots: HashMap::new(),
				records: BTreeMap::new(),
			}),
		}
	}
}

impl<T: Entity> Repository<T> {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns every record, in insertion order.
	pub fn all(&self) -> Vec<T> {
		self.inner.read().records.values().cloned().collect()
	}

	/// Returns the record with the given id, if it exists.
	pub fn get(&self, id: Id) -> Option<T> {
		let inner = self.inner.read();

		inner
			.slots
			.get(&id)
			.and_then(|slot| inner.records.get(slot))
			.cloned()
	}

	/// Returns every record matching the predicate, in insertion order.
	pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
		self.inner
			.read()
			.records
			.values()
			.filter(|record| predicate(record))
			.cloned()
			.collect()
	}

	/// Stores the entity, returning it with its id.
	///
	/// An entity without an id is given the next one from the counter and appended.
	/// An entity with an id replaces the record with that id (keeping its position),
	/// or is appended if there is none.
	///
	/// # Errors
	///
	/// Returns [`Error::IdsExhausted`] if the entity has no id and the counter
	/// has already reached [`Id::MAX`]. Nothing is stored in that case.
	pub fn save(&self, mut entity: T) -> Result<T, Error> {
		let mut guard = self.inner.write();
		let inner = &mut *guard;

		let id = if let Some(id) = entity.id() {
			inner.last_id = inner.last_id.max(id);
			id
		} else {
			inner.last_id = inner
				.last_id
				.checked_add(1)
				.ok_or(Error::IdsExhausted)?;
			entity.set_id(inner.last_id);
			inner.last_id
		};

		let slot = if let Some(slot) = inner.slots.get(&id).copied() {
			slot
		} else {
			let slot = inner.next_slot;

			inner.next_slot += 1;
			inner.slots.insert(id, slot);
			slot
		};

		inner.records.insert(slot, entity.clone());
		tracing::debug!(id, "stored record");

		Ok(entity)
	}

	/// Removes the record with the given id, returning whether it existed.
	pub fn remove(&self, id: Id) -> bool {
		let mut guard = self.inner.write();
		let inner = &mut *guard;

		let Some(slot) = inner.slots.remove(&id) else {
			return false;
		};

		inner.records.remove(&slot);
		tracing::debug!(id, "removed record");

		true
	}

	pub fn len(&self) -> usize {
		self.inner.read().records.len()
	}

	/// Removes every record. The id counter is kept, so ids are still never reused.
	#[cfg(test)]
	pub fn clear(&self) {
		let mut inner = self.inner.write();

		inner.slots.clear();
		inner.records.clear();
	}
}

#[cfg(test)]
mod test {
	use std::{sync::Arc, thread};

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	struct Note {
		id: Option<Id>,
		owner: Id,
		text: String,
	}

	impl Entity for Note {
		fn id(&self) -> Option<Id> {
			self.id
		}

		fn set_id(&mut self, id: Id) {
			self.id = Some(id);
		}
	}

	fn note(owner: Id, text: &str) -> Note {
		Note {
			id: None,
			owner,
			text: text.into(),
		}
	}

	#[test]
	fn test_ids_are_unique_and_increasing() {
		let repository = Repository::new();

		let ids = (0..10)
			.map(|i| {
				repository
					.save(note(1, &i.to_string()))
					.unwrap()
					.id
					.unwrap()
			})
			.collect::<Vec<_>>();

		assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
		assert_eq!(repository.len(), 10);
	}

	#[test]
	fn test_save_then_get() {
		let repository = Repository::new();
		let original = note(3, "hello");

		let saved = repository.save(original.clone()).unwrap();
		let fetched = repository.get(saved.id.unwrap()).unwrap();

		assert_eq!(fetched, saved);
		assert_eq!(
			Note {
				id: None,
				..fetched
			},
			original
		);
	}

	#[test]
	fn test_remove_exactly_one() {
		let repository = Repository::new();

		repository.save(note(1, "a")).unwrap();
		let id = repository.save(note(1, "b")).unwrap().id.unwrap();
		repository.save(note(1, "c")).unwrap();

		assert!(repository.remove(id));
		assert!(repository.get(id).is_none());
		assert_eq!(
			repository
				.all()
				.into_iter()
				.map(|n| n.text)
				.collect::<Vec<_>>(),
			["a", "c"]
		);
	}

	#[test]
	fn test_remove_missing_is_noop() {
		let repository = Repository::new();

		repository.save(note(1, "a")).unwrap();

		assert!(!repository.remove(42));
		assert_eq!(repository.all().len(), 1);
	}

	#[test]
	fn test_ids_are_never_reused() {
		let repository = Repository::new();

		let first = repository.save(note(1, "a")).unwrap().id.unwrap();
		repository.remove(first);
		let second = repository.save(note(1, "b")).unwrap().id.unwrap();

		assert!(second > first);

		repository.clear();
		assert_eq!(repository.len(), 0);

		let third = repository.save(note(1, "c")).unwrap().id.unwrap();

		assert!(third > second);
	}

	#[test]
	fn test_find_keeps_insertion_order() {
		let repository = Repository::new();

		repository.save(note(1, "first")).unwrap();
		repository.save(note(1, "second")).unwrap();
		repository.save(note(2, "other")).unwrap();

		let found = repository.find(|n| n.owner == 1);

		assert_eq!(
			found.into_iter().map(|n| n.text).collect::<Vec<_>>(),
			["first", "second"]
		);
		assert_eq!(repository.all().len(), 3);
	}

	#[test]
	fn test_upsert_with_explicit_id() {
		let repository = Repository::new();

		let a = repository.save(note(1, "a")).unwrap();
		repository.save(note(1, "b")).unwrap();

		repository
			.save(Note {
				text: "a2".into(),
				..a
			})
			.unwrap();

		assert_eq!(
			repository
				.all()
				.into_iter()
				.map(|n| n.text)
				.collect::<Vec<_>>(),
			["a2", "b"]
		);

		let explicit = repository
			.save(Note {
				id: Some(100),
				..note(1, "explicit")
			})
			.unwrap();

		assert_eq!(explicit.id, Some(100));
		assert_eq!(repository.save(note(1, "next")).unwrap().id, Some(101));
	}

	#[test]
	fn test_concurrent_saves_get_distinct_ids() {
		let repository = Arc::new(Repository::new());

		let handles = (0..8)
			.map(|_| {
				let repository = Arc::clone(&repository);

				thread::spawn(move || {
					(0..100)
						.map(|_| repository.save(note(1, "x")).unwrap().id.unwrap())
						.collect::<Vec<_>>()
				})
			})
			.collect::<Vec<_>>();

		let mut ids = handles
			.into_iter()
			.flat_map(|handle| handle.join().unwrap())
			.collect::<Vec<_>>();

		ids.sort_unstable();
		ids.dedup();

		assert_eq!(ids.len(), 800);
		assert_eq!(repository.len(), 800);
	}

	#[test]
	fn test_ids_exhausted() {
		let repository = Repository::new();

		repository
			.save(Note {
				id: Some(Id::MAX),
				..note(1, "last")
			})
			.unwrap();

		assert!(matches!(
			repository.save(note(1, "overflow")),
			Err(Error::IdsExhausted)
		));
		assert_eq!(repository.len(), 1);

		let replaced = repository
			.save(Note {
				id: Some(Id::MAX),
				..note(1, "replaced")
			})
			.unwrap();

		assert_eq!(replaced.text, "replaced");
		assert_eq!(repository.len(), 1);
	}
}
