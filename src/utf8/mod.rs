pub mod char;
pub mod string;

pub use char::{any_char, char_set, none_in_set, none_of, one_of, word_char};
pub use string::{literal, nothing};
