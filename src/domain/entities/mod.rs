//! # Domain Entities Module
//!
//! 캐시에 저장되는 도메인 엔티티들을 정의합니다.
//!
//! ## 캐시 값 등록
//!
//! 엔티티를 캐시에 저장하려면 `serde` 직렬화와 함께 타입 태그를 등록해야 합니다.
//! 태그는 저장된 바이트에 함께 기록되어, 읽을 때 요청한 타입과 다르면 거부됩니다.
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! pub struct Order { /* ... */ }
//!
//! cache_value!(Order => "shop.Order");
//! ```
//!
//! 태그는 저장 형식의 일부이므로, 한 번 배포한 뒤에는 바꾸지 않아야 합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! entities/
//! ├── mod.rs
//! └── users/
//!     ├── mod.rs
//!     └── user.rs     ← User 엔티티
//! ```

pub mod users;
