pub mod aggregate;
pub mod compare;
pub mod dictionary;
pub mod levenshtein;
pub mod miner;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod selector;
pub mod splitter;
pub mod trace;
