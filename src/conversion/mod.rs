pub mod injector;

pub use injector::{InjectionError, TextInjector, TranscriptInjector};
