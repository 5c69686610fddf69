//! Dictionaries for word flagging.
//!
//! The easy-word allow-list and the hard-word suggestion map.

pub mod easy_words;
pub mod suggestions;
