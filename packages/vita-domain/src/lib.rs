pub mod criteria;
pub mod filter;
pub mod listing;
pub mod name_index;
pub mod record;
pub mod vocabulary;
