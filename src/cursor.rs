/// A collection with an internal position that can be stepped in both directions.
///
/// Unlike [`Iterator`], stepping hands out references into the collection and the
/// position survives between calls, so a caller can walk forwards, change
/// direction, and walk back.
pub trait Cursor {
    type Item;

    /// Returns the element at the current position and steps forward
    fn next_item(&mut self) -> Option<&Self::Item>;

    /// Returns the element at the current position and steps backward
    fn prev_item(&mut self) -> Option<&Self::Item>;

    /// Moves the position back to the first element
    fn rewind(&mut self);
}

/// Step a [`Cursor`] backwards. The counterpart of calling `next` on an iterator.
pub fn prev<C: Cursor>(cursor: &mut C) -> Option<&C::Item> {
    cursor.prev_item()
}

/// Step a [`Cursor`] forwards.
pub fn next<C: Cursor>(cursor: &mut C) -> Option<&C::Item> {
    cursor.next_item()
}
