//! 拓扑工厂
//!
//! 每次调用都返回一张全新构建、独立拥有的拓扑，没有共享的默认状态。

pub mod fat_tree;
pub mod small;

pub use fat_tree::{FatTreeLayout, FatTreeOpts, build_fat_tree};
pub use small::{greedy_line, one_switch, three_switch, two_switch, two_switch_narrow};
