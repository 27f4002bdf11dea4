pub mod algo;
pub mod cancel;
pub mod codec;
pub mod compute;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod report;
pub mod verify;
pub mod walk;
