pub mod interaction;
pub mod ready;
pub mod voice;
