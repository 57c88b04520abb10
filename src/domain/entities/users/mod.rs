//! Users Entity Module
//!
//! 캐시 데모에서 사용하는 사용자 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new("kim", 20, vec![90, 85]);
//! cache.set_with_expiry("user:kim", &user, 3600).await;
//! ```

pub mod user;

pub use user::User;
