//! Ordered collection editing primitives.
//!
//! Instrument lists, ensemble membership and movement lists are all ordered
//! sequences whose order is musically meaningful, so they share these
//! index-validated routines. `reorder` uses a two-phase remove/insert with a
//! confirmation step: the user previews the tentative order before it
//! replaces the committed one.

use thiserror::Error;

use crate::models::{Instrument, Movement};
use crate::prompt::{self, Prompter};

/// Elements that can show a one-line label in an indexed listing.
pub trait Labeled {
    fn label(&self) -> String;
}

impl Labeled for Instrument {
    fn label(&self) -> String {
        self.part_name()
    }
}

impl Labeled for Movement {
    fn label(&self) -> String {
        let mut parts = vec![format!("Movement {}", self.num)];
        if let Some(tempo) = &self.tempo {
            parts.push(tempo.clone());
        }
        if let Some(time) = &self.time {
            parts.push(time.clone());
        }
        if let Some(key) = &self.key {
            parts.push(key.clone());
        }
        parts.join(" - ")
    }
}

impl Labeled for String {
    fn label(&self) -> String {
        self.clone()
    }
}

/// Index errors from [`delete_at`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// `(index, label)` pairs in current order. Side-effect free; used purely
/// for display.
pub fn list_with_indexes<T: Labeled>(items: &[T]) -> impl Iterator<Item = (usize, String)> + '_ {
    items.iter().enumerate().map(|(idx, item)| (idx, item.label()))
}

/// Print the indexed listing through the prompter.
pub fn show_indexed<T: Labeled>(prompt: &mut impl Prompter, items: &[T]) {
    for (idx, label) in list_with_indexes(items) {
        prompt.show(&format!("{idx}: {label}"));
    }
}

/// Remove and return the element at `index`. The sequence is untouched when
/// the index is out of range.
pub fn delete_at<T>(items: &mut Vec<T>, index: usize) -> Result<T, CollectionError> {
    if index >= items.len() {
        return Err(CollectionError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

/// Interactive reorder dialog.
///
/// Repeatedly: pick a source index (blank finishes), preview the sequence
/// with the element removed, pick a destination index (the end is allowed),
/// preview the result and confirm. An unconfirmed move discards the
/// tentative order and the loop restarts from the committed sequence.
pub fn reorder<T, P>(prompt: &mut P, items: &[T]) -> std::io::Result<Vec<T>>
where
    T: Labeled + Clone,
    P: Prompter,
{
    let mut current = items.to_vec();
    loop {
        if current.is_empty() {
            break;
        }
        show_indexed(prompt, &current);
        let Some(src) = prompt::index(
            prompt,
            "Enter the index of the element to move or press enter to finish: ",
            current.len() - 1,
            true,
        )?
        else {
            break;
        };
        let mut tentative = current.clone();
        let moved = tentative.remove(src);
        show_indexed(prompt, &tentative);
        // Insertion may target the end, so the bound is len, not len - 1.
        let dst = prompt::index(
            prompt,
            &format!("Enter the index to insert {}: ", moved.label()),
            tentative.len(),
            false,
        )?
        .unwrap_or(tentative.len());
        tentative.insert(dst, moved);
        prompt.show("New order:");
        show_indexed(prompt, &tentative);
        if prompt::confirm(prompt, "Is this correct?", true)? {
            current = tentative;
        }
    }
    Ok(current)
}
