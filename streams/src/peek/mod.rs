use std::io::{ Seek, SeekFrom, };
use std::ops::{ Deref, DerefMut, };

use crate::{ BinaryCursor, StreamError, };

/// Scoped reposition of a `BinaryCursor`. Creating the guard seeks to the target, dropping it seeks back to where the
/// cursor was when the guard was created. The restore runs exactly once, however the scope is left: falling off the
/// end, an early `return`, a `?`, or a panic unwinding through it.
///
/// The guard dereferences to the cursor, so reads, writes and further (nested) peeks go through it. Nested guards
/// borrow their parent, so they are always restored before it.
///
/// Only the position is restored. Bytes written while peeking stay written.
#[derive(Debug)]
pub struct PeekGuard<'a, S: Seek> {
	cursor: &'a mut BinaryCursor<S>,
	saved: u64,
	restored: bool,
}

impl<'a, S: Seek> PeekGuard<'a, S> {
	pub(crate) fn new(cursor: &'a mut BinaryCursor<S>, target: SeekFrom) -> Result<Self, StreamError> {
		let saved = cursor.tell()?;
		cursor.seek(target)?;

		log::trace!("peek from offset {} to {:?}", saved, target);

		Ok(PeekGuard {
			cursor,
			saved,
			restored: false,
		})
	}

	/// Offset the cursor returns to when the guard ends.
	pub fn saved_position(&self) -> u64 {
		self.saved
	}

	/// Ends the peek now, reporting whether seeking back succeeded.
	pub fn restore(mut self) -> Result<u64, StreamError> {
		self.restore_once()
	}

	fn restore_once(&mut self) -> Result<u64, StreamError> {
		self.restored = true;
		log::trace!("peek restoring offset {}", self.saved);
		self.cursor.seek(SeekFrom::Start(self.saved))
	}
}

impl<'a, S: Seek> Deref for PeekGuard<'a, S> {
	type Target = BinaryCursor<S>;

	fn deref(&self) -> &Self::Target {
		self.cursor
	}
}

impl<'a, S: Seek> DerefMut for PeekGuard<'a, S> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.cursor
	}
}

impl<'a, S: Seek> Drop for PeekGuard<'a, S> {
	fn drop(&mut self) {
		if self.restored {
			return;
		}

		// drop cannot hand the error back, so it is logged rather than lost
		if let Err(error) = self.restore_once() {
			log::error!("could not restore peeked stream to offset {}: {}", self.saved, error);
		}
	}
}

impl<S: Seek> BinaryCursor<S> {
	/// Temporarily moves the cursor to `target`. See `PeekGuard`.
	pub fn peek(&mut self, target: SeekFrom) -> Result<PeekGuard<'_, S>, StreamError> {
		PeekGuard::new(self, target)
	}

	/// Runs `body` with the cursor moved to `target`, then moves it back. Unlike dropping a `PeekGuard`, a failure to
	/// move back is returned: on its own if `body` succeeded, chained onto the body's error otherwise.
	pub fn peek_with<T, F>(&mut self, target: SeekFrom, body: F) -> Result<T, StreamError>
	where
		F: FnOnce(&mut BinaryCursor<S>) -> Result<T, StreamError>,
	{
		let mut guard = self.peek(target)?;
		let result = body(&mut *guard);
		let saved = guard.saved_position();

		match (result, guard.restore()) {
			(Ok(value), Ok(_)) => Ok(value),
			(Ok(_), Err(restore)) => Err(restore),
			(Err(original), Ok(_)) => Err(original),
			(Err(original), Err(restore)) => Err(StreamError::RestoreFailed {
				original: Box::new(original),
				saved,
				restore: Box::new(restore),
			}),
		}
	}
}
