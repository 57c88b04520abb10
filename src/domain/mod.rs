//! # Domain Layer Module
//!
//! 캐시 파사드를 통해 저장되는 도메인 객체를 모아 둔 계층입니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `implements Serializable` | `cache_value!` 등록 | 캐시 저장 가능 타입 표시 |
//! | `@class` 타입 정보 | 타입 태그 | 역직렬화 시 구체 타입 확인 |
//! | Lombok `@Data` | `#[derive(...)]` | 접근자/비교/복제 |

pub mod entities;

pub use entities::users::User;
