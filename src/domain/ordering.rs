//! Order-index maintenance shared by columns and tasks.
//!
//! Every sibling list (the columns of a board, the tasks of a column) carries
//! a zero-based `order` that must stay contiguous. Rather than shifting
//! sub-ranges, callers rebuild the affected list in display order and
//! renumber it from scratch, which also repairs any earlier drift.

/// Something that carries a display position among its siblings
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

impl<T: Ordered + ?Sized> Ordered for &mut T {
    fn order(&self) -> usize {
        (**self).order()
    }

    fn set_order(&mut self, order: usize) {
        (**self).set_order(order)
    }
}

/// Stable sort by `order`; items with equal order keep their relative position
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

/// Assigns `order = index` to every item
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index);
    }
}

/// Sorts then renumbers, returning whether any order value changed
pub fn compact<T: Ordered>(items: &mut [T]) -> bool {
    sort_by_order(items);
    let mut changed = false;
    for (index, item) in items.iter_mut().enumerate() {
        if item.order() != index {
            item.set_order(index);
            changed = true;
        }
    }
    changed
}

/// Inserts `item` at `index`, clamped to the end of the list.
///
/// Returns the position the item actually landed at.
pub fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let position = index.min(items.len());
    items.insert(position, item);
    position
}

/// True when the order values are exactly `0..n` in some arrangement
pub fn is_contiguous<'a, T, I>(items: I) -> bool
where
    T: Ordered + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut orders: Vec<usize> = items.into_iter().map(|item| item.order()).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(index, order)| index == *order)
}
