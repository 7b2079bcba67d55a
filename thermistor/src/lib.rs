#![cfg_attr(not(any(test, feature = "std")), no_std)]
pub mod bsp;
pub mod config;
pub mod edt;
pub mod fault;
pub mod reader;
pub mod report;
pub mod steinhart_hart;
