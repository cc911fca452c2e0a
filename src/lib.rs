pub mod cli;
pub mod demo;
pub mod ffi;
pub mod logging;

// 导出 dyn_array 供二进制和集成测试使用
pub use dyn_array;
