//! Class naming policy
//!
//! A nested class is named after the key that owns it, with the first
//! character upper-cased and the rest left untouched. No collision handling:
//! `user` and `User` both become `User`.

/// Derives class names from property keys
#[derive(Debug, Clone, Copy, Default)]
pub struct NameAllocator;

impl NameAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Class name for the value stored under `key`
    pub fn class_name_for(&self, key: &str) -> String {
        capitalize(key)
    }
}

/// Upper-case the first character, keep the rest as is
///
/// Characters without a case (digits, punctuation, most CJK) pass through,
/// and a first character may expand (`ß` becomes `SS`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
