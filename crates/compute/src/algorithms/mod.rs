pub mod clustering;
pub mod library_match;
pub mod name_match;
pub mod similarity;
