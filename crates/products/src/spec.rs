//! Ordered specification tables.
//!
//! Display order is the array order; `sort_order` is resequenced to
//! `0..n` after every edit so the persisted order always matches what the
//! operator arranged, with no gaps and no duplicates.

use serde::{Deserialize, Serialize};

/// Quick spec line shown in list cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub sort_order: u32,
}

/// Full spec line; `group_name` buckets lines into titled sections on the
/// detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSpec {
    pub name: String,
    pub value: String,
    pub group_name: String,
    #[serde(default)]
    pub sort_order: u32,
}

pub trait SortOrdered {
    fn set_sort_order(&mut self, order: u32);
}

impl SortOrdered for Spec {
    fn set_sort_order(&mut self, order: u32) {
        self.sort_order = order;
    }
}

impl SortOrdered for FullSpec {
    fn set_sort_order(&mut self, order: u32) {
        self.sort_order = order;
    }
}

fn resequence<T: SortOrdered>(specs: &mut [T]) {
    for (index, spec) in specs.iter_mut().enumerate() {
        spec.set_sort_order(index as u32);
    }
}

/// Append a line at the end of the table.
pub fn push_spec<T: SortOrdered>(specs: &mut Vec<T>, spec: T) {
    specs.push(spec);
    resequence(specs);
}

/// Move a line from one position to another; out-of-range indices leave
/// the table untouched.
pub fn move_spec<T: SortOrdered>(specs: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= specs.len() || to >= specs.len() {
        return false;
    }
    let spec = specs.remove(from);
    specs.insert(to, spec);
    resequence(specs);
    true
}

/// Remove a line; out-of-range indices leave the table untouched.
pub fn remove_spec<T: SortOrdered>(specs: &mut Vec<T>, index: usize) -> bool {
    if index >= specs.len() {
        return false;
    }
    specs.remove(index);
    resequence(specs);
    true
}
