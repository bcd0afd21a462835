//! # AVL Tree
//!
//! A height-balanced binary search tree mapping `Key` to `Value`. It is the
//! per-bucket payload of [`AvlChainedTable`](crate::avl_chained::AvlChainedTable)
//! but knows nothing about hashing and can be used on its own.
//!
//! Every node exclusively owns its children (`Option<Box<Node>>`), so a
//! rotation is a local relinking of owned boxes and no node is ever reachable
//! from two places. After each insert or remove, every node on the path back
//! to the root satisfies:
//! - `height == 1 + max(height(left), height(right))`
//! - `height(left) - height(right)` is in `{-1, 0, 1}`

use std::cmp::Ordering;
use std::fmt;

use crate::types::{Entry, Key, Value};

type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
struct Node {
    key: Key,
    value: Value,
    height: i32,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: Key, value: Value) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[inline]
    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

#[inline]
fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |n| n.height)
}

#[inline]
fn balance(link: &Link) -> i32 {
    link.as_ref().map_or(0, |n| n.balance())
}

/// Lifts the left child of `y` into its place.
///
/// Heights are recomputed bottom-up: `y` (now the lower node) first.
fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Lifts the right child of `x` into its place.
fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Restores balance at `node` after `key` was inserted somewhere below it.
fn rebalance_after_insert(mut node: Box<Node>, key: Key) -> Box<Node> {
    let bal = node.balance();
    if bal > 1 {
        let left_key = node.left.as_ref().map_or(key, |l| l.key);
        if key < left_key {
            return rotate_right(node);
        }
        if key > left_key {
            node.left = node.left.take().map(rotate_left);
            return rotate_right(node);
        }
    } else if bal < -1 {
        let right_key = node.right.as_ref().map_or(key, |r| r.key);
        if key > right_key {
            return rotate_left(node);
        }
        if key < right_key {
            node.right = node.right.take().map(rotate_right);
            return rotate_left(node);
        }
    }
    node
}

/// Restores balance at `node` after a removal below it.
///
/// The removed key is gone, so the rotation shape is chosen from the balance
/// of the heavier child instead.
fn rebalance_after_remove(mut node: Box<Node>) -> Box<Node> {
    let bal = node.balance();
    if bal > 1 {
        if balance(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if bal < -1 {
        if balance(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert_node(link: Link, key: Key, value: Value, previous: &mut Option<Value>) -> Box<Node> {
    let Some(mut node) = link else {
        return Node::new(key, value);
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, value, previous)),
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, value, previous))
        }
        Ordering::Equal => {
            *previous = Some(std::mem::replace(&mut node.value, value));
            return node;
        }
    }

    if previous.is_some() {
        // Overwrite below: the shape did not change.
        return node;
    }
    node.update_height();
    rebalance_after_insert(node, key)
}

fn min_entry(mut node: &Node) -> (Key, Value) {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    (node.key, node.value)
}

fn remove_node(link: Link, key: Key, removed: &mut Option<Value>) -> Link {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = remove_node(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_node(node.right.take(), key, removed),
        Ordering::Equal => {
            *removed = Some(node.value);
            match (node.left.take(), node.right.take()) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    // Take over the successor's key and value only; this node
                    // keeps its own links.
                    let (succ_key, succ_value) = min_entry(&right);
                    node.key = succ_key;
                    node.value = succ_value;
                    node.left = Some(left);
                    let mut successor = None;
                    node.right = remove_node(Some(right), succ_key, &mut successor);
                }
            }
        }
    }

    if removed.is_none() {
        return Some(node);
    }
    node.update_height();
    Some(rebalance_after_remove(node))
}

fn write_sideways(link: &Link, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    if let Some(node) = link {
        write_sideways(&node.right, f, depth + 1)?;
        writeln!(f, "{:indent$}({},{})", "", node.key, node.value, indent = depth * 2)?;
        write_sideways(&node.left, f, depth + 1)?;
    }
    Ok(())
}

/// An ordered map from `Key` to `Value` kept height-balanced.
#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, or overwrites its value in place.
    ///
    /// # Returns
    /// The previous value if the key was already present.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        let mut previous = None;
        self.root = Some(insert_node(self.root.take(), key, value, &mut previous));
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: Key) -> Option<Value> {
        let mut removed = None;
        self.root = remove_node(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        let mut link = &self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(node.value),
            }
        }
        None
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; 0 when empty, 1 for a single node.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn min(&self) -> Option<Entry> {
        self.root
            .as_deref()
            .map(|root| Entry::from(min_entry(root)))
    }

    pub fn max(&self) -> Option<Entry> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(Entry::new(node.key, node.value))
    }

    /// In-order (ascending key) iterator.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.len,
        };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Consumes the tree, yielding its entries in pre-order.
    ///
    /// Nodes are released one by one as they are visited.
    pub fn into_entries(mut self) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            entries.push(Entry::new(node.key, node.value));
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
        }
        entries
    }

    /// Writes the tree sideways: right subtree first, two spaces per level,
    /// starting at `depth`.
    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write_sideways(&self.root, f, depth)
    }
}

impl fmt::Display for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(Entry::new(node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
