pub mod oauth;
pub mod slides;

pub use slides::GoogleSlides;
