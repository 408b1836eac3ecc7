//! Shared integration-test helpers.

#![allow(dead_code)]

pub mod fake_api;

use hn_rerank::story::Story;

pub fn titles(stories: &[Story]) -> Vec<&str> {
    stories.iter().map(|s| s.title.as_str()).collect()
}
