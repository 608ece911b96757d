use crate::core::{Item, PickerError, Result};
use im::Vector;
use rand::Rng;

/// Pick one item uniformly at random. The item stays in the collection.
pub fn pick<'a, R>(items: &'a Vector<Item>, rng: &mut R) -> Result<&'a Item>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Err(PickerError::NoItemsAvailable);
    }
    let index = rng.random_range(0..items.len());
    items.get(index).ok_or(PickerError::NoItemsAvailable)
}
