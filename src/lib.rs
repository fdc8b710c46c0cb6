pub mod answers;
pub mod assemble;
pub mod browser;
pub mod category;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod feature;
pub mod gh;
pub mod git;
pub mod lint;
pub mod locate;
pub mod logging;
pub mod pr_type;
pub mod prompt;
pub mod publish;
pub mod source;
pub mod subprocess;
pub mod template;
pub mod tools;
pub mod wizard;
