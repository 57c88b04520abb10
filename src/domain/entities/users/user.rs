//! User Entity Implementation
//!
//! 캐시에 저장되는 데모 사용자 엔티티입니다.

use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// 모든 필드는 비어 있을 수 있으며, 값이 없는 필드도 `null`로 직렬화됩니다.
/// 캐시에는 `redis_demo.User` 태그로 저장됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub scores: Option<Vec<i32>>,
}

crate::cache_value!(User => "redis_demo.User");

impl User {
    pub fn new(name: impl Into<String>, age: i32, scores: Vec<i32>) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
            scores: Some(scores),
        }
    }
}
