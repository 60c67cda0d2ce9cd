pub mod about;
pub mod add;
pub mod do_reminded;
pub mod edit;
pub mod mark;
pub mod remind;
pub mod remove;
pub mod timed;
pub mod view;
