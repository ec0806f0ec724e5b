mod complete;

pub use complete::*;
