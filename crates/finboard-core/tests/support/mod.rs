#![allow(dead_code)]

pub mod dashboard_testkit;
