pub mod word_buffer;

pub use word_buffer::{CompletedWord, WordBuffer, is_word_char};
