//! Layout remapping between US QWERTY and Russian JCUKEN.
//!
//! Everything here is pure: no I/O, no allocation beyond the output strings.

pub mod text;

pub use text::{
    case::CasePattern,
    mapping::{
        ConversionDirection, Script, conversion_direction_by_keys, conversion_direction_for_text,
        convert_auto, convert_with_direction, detect_script, maps_to_letter,
    },
    word::Word,
};
