//! Vocabulary word type.

use std::{
	cmp::Ordering,
	fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// A vocabulary word and the word-group number it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
	/// Word-group number
	pub number: u16,
	/// Textual representation
	pub text: String,
}

impl Word {
	/// Creates a new word.
	pub fn new(number: u16, text: impl Into<String>) -> Self {
		Self {
			number,
			text: text.into(),
		}
	}
}

/// Words order by their text, byte by byte. Equal texts fall back to the number.
impl Ord for Word {
	fn cmp(&self, other: &Self) -> Ordering {
		self.text.cmp(&other.text).then(self.number.cmp(&other.number))
	}
}

impl PartialOrd for Word {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Display for Word {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.text, self.number)
	}
}
