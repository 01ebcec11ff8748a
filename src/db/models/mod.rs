mod anuncio;
mod user;

pub use anuncio::*;
pub use user::*;
