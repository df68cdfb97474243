//! Options Flow Module
//!
//! Flags option contracts whose traded volume outruns open interest and
//! ranks them, per chain and across symbols.

pub mod classifier;
pub mod contracts;
pub mod screener;

pub use classifier::{classify, classify_now, summarize, ChainSummary, UNUSUAL_RATIO_THRESHOLD};
pub use contracts::{
    ClassifiedChain, ClassifiedContract, ContractType, ExpirationGroup, OptionChain, OptionContract,
};
pub use screener::{screen_unusual, UnusualOption};
