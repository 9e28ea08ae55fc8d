//! Core library: input selection, validation, submission, rendering and the
//! view controller that ties them together.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod render;
pub mod selector;
pub mod submission;
pub mod validator;
pub mod view;
