pub mod agari;
pub mod meld;
pub mod score;
pub mod yaku;
