pub mod book;
pub mod category;
pub mod chapter;
pub mod chapter_unit_mapping;
pub mod meaning_example;
pub mod meaning_snyant;
pub mod unit;
pub mod voca;
pub mod voca_dr;
pub mod voca_meaning;
pub mod voca_type;
