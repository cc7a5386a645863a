//! Data module for the Tron wallet backend

pub mod db;
pub mod tron;
