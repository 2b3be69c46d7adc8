pub mod expand;
pub mod inspect;
pub mod open;
pub mod saves;
