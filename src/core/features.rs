//! Features exposed by the command line tool.

pub mod translator;
