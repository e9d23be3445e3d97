pub mod activities;
pub mod app_config;
pub mod auth;
pub mod db;
pub mod lifecycle;
pub mod middleware;
pub mod orm;
pub mod push;
pub mod storage;
pub mod web;
