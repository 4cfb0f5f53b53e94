pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod evaluator;
pub mod output;
pub mod widget;
