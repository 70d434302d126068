//! Audio container adapters around the signal core

pub mod wav;

pub use wav::{export_wav, import_wav, import_wav_channel};
