//! Mixed-script text: decode, classify, segment, then measure/draw run by run.

pub mod layout;
pub mod run;
pub mod script;
pub mod segment;
pub mod utf8;
