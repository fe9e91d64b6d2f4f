pub mod picker;
pub mod rows;
pub mod search;
pub mod time;
