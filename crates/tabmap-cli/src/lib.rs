//! Library side of the `tabmap` command line tool.

pub mod logging;
pub mod pipeline;
